//! Positional and content heuristics used by the extractors.
//!
//! Each heuristic is load-bearing and fragile: it encodes an assumption about
//! how the pleading is typeset rather than a schema. They are kept here as
//! named predicates so the assumptions stay visible and testable.

use crate::config::{PO_BOX_MARKER, POSTAL_CODE_PREFIX_LEN};

/// Check whether a line opens with a postal code.
///
/// The first (up to) four characters must all be ASCII digits. Used to detect
/// the city line that closes the court address block ("4001 Basel").
///
/// # Examples
/// ```
/// use klageschrift::extract::predicates::starts_with_postal_code;
///
/// assert!(starts_with_postal_code("4001 Basel"));
/// assert!(!starts_with_postal_code("Postfach 964"));
/// ```
#[must_use]
pub fn starts_with_postal_code(line: &str) -> bool {
    let mut prefix = line.chars().take(POSTAL_CODE_PREFIX_LEN).peekable();
    prefix.peek().is_some() && prefix.all(|c| c.is_ascii_digit())
}

/// Check whether the first non-whitespace character is a digit.
///
/// Numbered claims ("1. Die Klage sei ...") are recognized this way.
#[must_use]
pub fn starts_with_digit(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}

/// Find the PO box component of a party block.
///
/// Returns the first component containing "Postfach".
#[must_use]
pub fn find_po_box<'a>(components: &[&'a str]) -> Option<&'a str> {
    components
        .iter()
        .copied()
        .find(|component| component.contains(PO_BOX_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_postal_code() {
        assert!(starts_with_postal_code("4001 Basel"));
        assert!(starts_with_postal_code("8002 Zürich"));
        assert!(starts_with_postal_code("4410"));
    }

    #[test]
    fn test_starts_with_postal_code_short_numeric_line() {
        // Fewer than four characters still count when all of them are digits
        assert!(starts_with_postal_code("12"));
    }

    #[test]
    fn test_starts_with_postal_code_rejects() {
        assert!(!starts_with_postal_code(""));
        assert!(!starts_with_postal_code("Baumleingasse 5"));
        assert!(!starts_with_postal_code("400A Basel"));
        assert!(!starts_with_postal_code("CH-4001 Basel"));
    }

    #[test]
    fn test_starts_with_digit() {
        assert!(starts_with_digit("1. Die Klage sei"));
        assert!(starts_with_digit("   2. "));
        assert!(!starts_with_digit(" abzuweisen;"));
        assert!(!starts_with_digit(""));
        assert!(!starts_with_digit("   "));
    }

    #[test]
    fn test_find_po_box() {
        let components = ["Zivilgericht", "Baumleingasse 5", "Postfach 964", "4001 Basel"];
        assert_eq!(find_po_box(&components), Some("Postfach 964"));
    }

    #[test]
    fn test_find_po_box_absent() {
        let components = ["Peter Meister", "Werbegrafiker", "Klingentalstrasse 41", "4057 Basel"];
        assert_eq!(find_po_box(&components), None);
    }

    #[test]
    fn test_find_po_box_first_match_wins() {
        let components = ["Name", "Postfach 1", "Postfach 2"];
        assert_eq!(find_po_box(&components), Some("Postfach 1"));
    }
}
