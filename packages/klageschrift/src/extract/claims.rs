//! Extraction of the claims list ("Rechtsbegehren").

use crate::config::{ClaimNumbering, CLAIMS_END_MARKER, CLAIMS_START_MARKER};
use crate::error::{ParseError, Result, Section};
use crate::types::Span;

use super::predicates::starts_with_digit;

/// Extract the numbered claims between "Rechtsbegehren" and "Begründung".
///
/// A fragment whose first non-whitespace character is a digit closes the
/// claim collected so far. With [`ClaimNumbering::Boundary`] that fragment is
/// dropped, with [`ClaimNumbering::Keep`] it opens the next claim. Fragment
/// texts are concatenated as they are and each closed claim is trimmed. A
/// blank claim closed by a number is skipped; the claim closed by
/// "Begründung" is always kept, even when it is empty.
///
/// # Examples
/// ```
/// use klageschrift::config::ClaimNumbering;
/// use klageschrift::extract::extract_claims;
/// use klageschrift::types::Span;
///
/// let spans: Vec<Span> = ["Rechtsbegehren", "1. ", "Die Klage sei abzuweisen;", "Begründung"]
///     .into_iter()
///     .map(Span::plain)
///     .collect();
/// let claims = extract_claims(&spans, ClaimNumbering::Boundary).unwrap();
/// assert_eq!(claims, vec!["Die Klage sei abzuweisen;"]);
/// ```
pub fn extract_claims(spans: &[Span], numbering: ClaimNumbering) -> Result<Vec<String>> {
    let mut claims = Vec::new();
    let mut line = String::new();
    let mut collecting = false;
    let mut found_end = false;

    for span in spans {
        let text = span.text.as_str();

        if text.contains(CLAIMS_START_MARKER) {
            collecting = true;
            continue;
        }
        if !collecting {
            continue;
        }

        if starts_with_digit(text) {
            close_claim(&mut claims, &mut line);
            if numbering == ClaimNumbering::Keep {
                line.push_str(text);
            }
            continue;
        }
        if text.contains(CLAIMS_END_MARKER) {
            claims.push(line.trim().to_string());
            found_end = true;
            break;
        }

        line.push_str(text);
    }

    if !collecting {
        return Err(ParseError::SectionNotFound(Section::Claims));
    }
    if !found_end {
        tracing::warn!("Claims list not terminated by '{CLAIMS_END_MARKER}', keeping pending text");
        close_claim(&mut claims, &mut line);
    }

    tracing::debug!(count = claims.len(), "Extracted claims");
    Ok(claims)
}

/// Move the pending line into the claims list at a number boundary, unless it is blank.
fn close_claim(claims: &mut Vec<String>, line: &mut String) {
    let claim = line.trim();
    if !claim.is_empty() {
        claims.push(claim.to_string());
    }
    line.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spans(texts: &[&str]) -> Vec<Span> {
        texts.iter().copied().map(Span::plain).collect()
    }

    fn sample() -> Vec<Span> {
        spans(&[
            "Rechtsbegehren",
            "1. Die Klage sei",
            " abzuweisen;",
            "2. ",
            "Alles zulasten",
            " der Klägerin",
            "Begründung",
        ])
    }

    #[test]
    fn test_numbered_fragment_is_boundary() {
        let claims = extract_claims(&sample(), ClaimNumbering::Boundary).unwrap();

        // The fragment carrying the number only separates claims
        assert_eq!(claims, vec!["abzuweisen;", "Alles zulasten der Klägerin"]);
    }

    #[test]
    fn test_numbered_fragment_kept() {
        let claims = extract_claims(&sample(), ClaimNumbering::Keep).unwrap();
        assert_eq!(
            claims,
            vec!["1. Die Klage sei abzuweisen;", "2. Alles zulasten der Klägerin"]
        );
    }

    #[test]
    fn test_text_before_start_marker_ignored() {
        let claims = extract_claims(
            &spans(&["Klageantwort", "Rechtsbegehren", "1. ", "Abweisung", "Begründung", "2. ", "x"]),
            ClaimNumbering::Boundary,
        )
        .unwrap();
        assert_eq!(claims, vec!["Abweisung"]);
    }

    #[test]
    fn test_missing_start_marker() {
        let err = extract_claims(&spans(&["1. ", "Abweisung"]), ClaimNumbering::Boundary).unwrap_err();
        assert!(matches!(err, ParseError::SectionNotFound(Section::Claims)));
    }

    #[test]
    fn test_missing_end_marker_keeps_pending_claim() {
        let claims = extract_claims(
            &spans(&["Rechtsbegehren", "1. ", "Abweisung", "2. ", "Kosten"]),
            ClaimNumbering::Boundary,
        )
        .unwrap();
        assert_eq!(claims, vec!["Abweisung", "Kosten"]);
    }

    #[test]
    fn test_blank_claim_between_numbers_skipped() {
        let claims = extract_claims(
            &spans(&["Rechtsbegehren", "1. ", "2. ", "Kosten", "3. ", "Anerkennung", "Begründung"]),
            ClaimNumbering::Boundary,
        )
        .unwrap();
        assert_eq!(claims, vec!["Kosten", "Anerkennung"]);
    }

    #[test]
    fn test_empty_final_claim_kept() {
        let claims = extract_claims(
            &spans(&["Rechtsbegehren", "1. A", "2. ", "Begründung"]),
            ClaimNumbering::Boundary,
        )
        .unwrap();
        assert_eq!(claims, vec![""]);

        let claims = extract_claims(&spans(&["Rechtsbegehren", "Begründung"]), ClaimNumbering::Boundary).unwrap();
        assert_eq!(claims, vec![""]);
    }
}
