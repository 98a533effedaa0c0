//! Prompts for the narrative-generation service.
//!
//! The parser does not talk to any language model itself. It renders the
//! parsed pleading to text and hands out the prompts; sending them is the
//! caller's business.

use regex::Regex;
use serde::Serialize;

use crate::error::Result;

const SYSTEM_DEFENCE: &str = include_str!("../prompts/system_defence.txt");
const SYSTEM_PLACEHOLDERS: &str = include_str!("../prompts/system_placeholders.txt");

/// Default pattern of a template placeholder, e.g. `[• Datum]`.
pub const DEFAULT_PLACEHOLDER_PATTERN: &str = r"\[\s*•[^\]]*\]";

/// Placeholder count assumed when no template is given or none match.
pub const FALLBACK_PLACEHOLDER_COUNT: usize = 45;

/// Share of placeholders (in percent) the model is asked to fill.
const MIN_FILL_PERCENT: usize = 80;

/// System and user prompt for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Placeholder-filling prompt plus the number of values the answer must contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderPrompt {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub placeholder_count: usize,
}

/// Turn a JavaScript regex literal such as `/\[\s*•[^\]]*\]/g` into a
/// pattern for the `regex` crate.
///
/// The `i`, `m` and `s` flags become inline flags; other flags are dropped.
/// Anything that is not a `/pattern/flags` literal is returned unchanged.
#[must_use]
pub fn normalize_placeholder_pattern(pattern: &str) -> String {
    let literal = pattern.strip_prefix('/').and_then(|rest| {
        let end = rest.rfind('/')?;
        let (body, flags) = (&rest[..end], &rest[end + 1..]);
        flags
            .chars()
            .all(|c| "dgimsuvy".contains(c))
            .then_some((body, flags))
    });

    let Some((body, flags)) = literal else {
        return pattern.to_string();
    };

    let inline: String = flags.chars().filter(|c| "ims".contains(*c)).collect();
    if inline.is_empty() {
        body.to_string()
    } else {
        format!("(?{inline}){body}")
    }
}

/// Count the placeholders in a template.
pub fn count_placeholders(template: &str, pattern: &str) -> Result<usize> {
    let regex = Regex::new(&normalize_placeholder_pattern(pattern))?;
    Ok(regex.find_iter(template).count())
}

/// Build the prompt asking for a structured counter-argumentation.
///
/// The rendered pleading is appended to the system prompt; the user prompt is
/// empty.
#[must_use]
pub fn build_defence_prompt(document_text: &str) -> Prompt {
    let mut system = String::from(SYSTEM_DEFENCE);
    system.push_str("\n#Klageschrift:\n");
    system.push_str(document_text);
    system.push_str("\n\n");

    Prompt {
        system,
        user: String::new(),
    }
}

/// Build the prompt asking for the placeholder values of a response template.
pub fn build_placeholder_prompt(
    document_text: &str,
    template: Option<&str>,
    pattern: &str,
) -> Result<PlaceholderPrompt> {
    let template = template.unwrap_or_default();
    let counted = if template.is_empty() {
        0
    } else {
        count_placeholders(template, pattern)?
    };
    let expected = if counted == 0 {
        FALLBACK_PLACEHOLDER_COUNT
    } else {
        counted
    };
    tracing::debug!(counted, expected, "Counted template placeholders");

    let mut user = String::new();
    user.push_str("#Aufgabe\n");
    user.push_str(
        "Fülle das Template für die Klageantwort aus. Gib ein JSON-Array mit allen \
         ausgefüllten Platzhaltertexten zurück.\n\n",
    );
    user.push_str(&format!(
        "Die Platzhalter im Template folgen diesem Regex-Muster: {pattern}\n\
         Suche alle Textstellen, die diesem Muster entsprechen, und fülle sie passend aus.\n"
    ));

    if counted > 0 {
        let min_filled = counted * MIN_FILL_PERCENT / 100;
        user.push_str(&format!(
            "\nIm Template wurden genau {counted} Platzhalter gefunden. Das Array MUSS exakt \
             {counted} Einträge enthalten.\n\
             Fülle mindestens {min_filled} Platzhalter aus und verwende höchstens {} null-Werte.\n",
            counted - min_filled
        ));
    }

    user.push_str("\n#Klageschrift\n");
    user.push_str(document_text);
    user.push_str("\n\n#Template für Klageantwort\n");
    user.push_str(template);

    let system = SYSTEM_PLACEHOLDERS
        .trim_end()
        .replace("{count}", &expected.to_string());

    Ok(PlaceholderPrompt {
        prompt: Prompt { system, user },
        placeholder_count: expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "Rechtsbegehren\n1. [• Antrag]\n\nBasel, [ • Datum ]\n[•]";

    #[test]
    fn test_normalize_js_literal() {
        assert_eq!(
            normalize_placeholder_pattern(r"/\[\s*•[^\]]*\]/g"),
            r"\[\s*•[^\]]*\]"
        );
        assert_eq!(normalize_placeholder_pattern("/x+/gi"), "(?i)x+");
        assert_eq!(normalize_placeholder_pattern("/x+/"), "x+");
    }

    #[test]
    fn test_normalize_leaves_plain_patterns() {
        assert_eq!(normalize_placeholder_pattern(DEFAULT_PLACEHOLDER_PATTERN), DEFAULT_PLACEHOLDER_PATTERN);
        assert_eq!(normalize_placeholder_pattern("/usr/local"), "/usr/local");
        assert_eq!(normalize_placeholder_pattern("ending"), "ending");
    }

    #[test]
    fn test_count_placeholders() {
        assert_eq!(count_placeholders(TEMPLATE, DEFAULT_PLACEHOLDER_PATTERN).unwrap(), 3);
        assert_eq!(count_placeholders(TEMPLATE, r"/\[\s*•[^\]]*\]/g").unwrap(), 3);
        assert_eq!(count_placeholders("keine Platzhalter", DEFAULT_PLACEHOLDER_PATTERN).unwrap(), 0);
    }

    #[test]
    fn test_count_placeholders_invalid_pattern() {
        assert!(count_placeholders(TEMPLATE, "[unclosed").is_err());
    }

    #[test]
    fn test_build_defence_prompt() {
        let prompt = build_defence_prompt("Rechtsbegehren:\n1. Die Klage sei abzuweisen;");

        assert!(prompt.system.starts_with("Du bist ein erfahrener Rechtsanwalt"));
        assert!(prompt
            .system
            .ends_with("#Klageschrift:\nRechtsbegehren:\n1. Die Klage sei abzuweisen;\n\n"));
        assert!(prompt.user.is_empty());
    }

    #[test]
    fn test_build_placeholder_prompt_with_template() {
        let result =
            build_placeholder_prompt("DOKUMENT", Some(TEMPLATE), DEFAULT_PLACEHOLDER_PATTERN).unwrap();

        assert_eq!(result.placeholder_count, 3);
        assert!(result.prompt.system.ends_with("genau 3 Werten."));
        assert!(result.prompt.user.contains("exakt 3 Einträge"));
        assert!(result.prompt.user.contains("mindestens 2 Platzhalter"));
        assert!(result.prompt.user.contains("höchstens 1 null-Werte"));
        assert!(result.prompt.user.contains("#Klageschrift\nDOKUMENT\n"));
        assert!(result.prompt.user.ends_with(TEMPLATE));
    }

    #[test]
    fn test_build_placeholder_prompt_without_template() {
        let result = build_placeholder_prompt("DOKUMENT", None, DEFAULT_PLACEHOLDER_PATTERN).unwrap();

        assert_eq!(result.placeholder_count, FALLBACK_PLACEHOLDER_COUNT);
        assert!(result.prompt.system.contains("genau 45 Werten"));
        assert!(!result.prompt.user.contains("exakt"));
        assert!(result.prompt.user.ends_with("#Template für Klageantwort\n"));
    }
}
