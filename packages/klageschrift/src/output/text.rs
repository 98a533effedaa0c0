//! Canonical plain-text rendering.
//!
//! The rendering is prose for humans and for downstream text consumers. It is
//! deterministic but lossy, so it is never parsed back.

use std::fmt;

use crate::types::{Address, Argument, Document, Entity, Header, Justification};

/// Title preceding the rendered header.
pub const HEADER_TITLE: &str = "Header:";

/// Title preceding the claims list.
pub const CLAIMS_TITLE: &str = "Rechtsbegehren:";

/// Title preceding the argument sections.
pub const JUSTIFICATION_TITLE: &str = "Begründung:";

/// Line between the parties of the header.
pub const PARTY_SEPARATOR: &str = "------------";

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.po_box {
            Some(po_box) => write!(f, "Address: {}, {}, {}", self.street, po_box, self.city),
            None => write!(f, "Address: {}, {}", self.street, self.city),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(role) = self.role {
            writeln!(f, "{}", role.as_str())?;
        }
        writeln!(f, "{}", self.name)?;
        if let Some(descriptor) = &self.descriptor {
            writeln!(f, "{descriptor}")?;
        }
        write!(f, "{}", self.address)?;
        if let Some(representative) = &self.representative {
            write!(f, "\nRepresented by:\n{representative}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{PARTY_SEPARATOR}\n{}\n{PARTY_SEPARATOR}\n{}",
            self.court, self.plaintiff, self.defendant
        )
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.statement)?;
        for item in &self.evidence {
            write!(f, "\n- {item}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = [
            ("I. Formelles", &self.formalities),
            ("II. Zuständigkeit", &self.jurisdiction),
            ("III. Materielles", &self.facts),
        ];

        for (index, (title, arguments)) in sections.into_iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            f.write_str(title)?;
            for argument in arguments {
                write!(f, "\n{argument}")?;
            }
        }
        Ok(())
    }
}

impl Document {
    /// Canonical text, optionally preceded by the header.
    #[must_use]
    pub fn render(&self, include_header: bool) -> String {
        render_document(self, include_header)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_document(self, false))
    }
}

/// Render a document as canonical text.
///
/// Layout: optional header, the claims as a 1-indexed list, then the three
/// argument sections. Each argument is its statement followed by one
/// `- evidence` line per citation.
///
/// # Examples
/// ```
/// use klageschrift::output::render_document;
/// use klageschrift::types::{Address, Argument, Document, Entity, Header, Justification};
///
/// let party = |name: &str| Entity::new(name, Address::new("Freie Strasse 45", "4001 Basel"));
/// let document = Document::new(
///     Header::new(party("Zivilgericht"), party("Klägerin AG"), party("Peter Meister")),
///     vec!["Die Klage sei abzuweisen;".to_string()],
///     Justification {
///         facts: vec![Argument::new("Der Vertrag ist nichtig.", vec!["Zeuge A".to_string()])],
///         ..Justification::default()
///     },
/// );
///
/// let text = render_document(&document, false);
/// assert!(text.starts_with("Rechtsbegehren:\n1. Die Klage sei abzuweisen;\n"));
/// assert!(text.ends_with("III. Materielles\nDer Vertrag ist nichtig.\n- Zeuge A"));
/// ```
#[must_use]
pub fn render_document(document: &Document, include_header: bool) -> String {
    let mut out = String::new();

    if include_header {
        out.push_str(HEADER_TITLE);
        out.push('\n');
        out.push_str(&document.header.to_string());
        out.push_str("\n\n");
    }

    out.push_str(CLAIMS_TITLE);
    out.push('\n');
    for (index, claim) in document.claims.iter().enumerate() {
        out.push_str(&format!("{}. {claim}\n", index + 1));
    }

    out.push('\n');
    out.push_str(JUSTIFICATION_TITLE);
    out.push('\n');
    out.push_str(&document.justification.to_string());

    out.trim().to_string()
}
