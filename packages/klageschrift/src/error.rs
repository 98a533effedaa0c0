//! Error and warning types for the parser.
//!
//! Uses the dual-error pattern: `ParseError` for failures that stop an
//! extraction pass, and `ParseWarning` for recoverable conditions that are
//! collected on the parse outcome instead of aborting it.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Named region of a pleading that an extraction pass looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Court,
    Plaintiff,
    Defendant,
    Claims,
    Formalities,
    Jurisdiction,
    Facts,
}

impl Section {
    /// Human-readable section name as it appears in the pleading.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Court => "Gericht",
            Self::Plaintiff => "Klägerin",
            Self::Defendant => "Beklagter",
            Self::Claims => "Rechtsbegehren",
            Self::Formalities => "Formelles",
            Self::Jurisdiction => "Zuständigkeit",
            Self::Facts => "Materielles",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required marker never appeared in the span stream.
    #[error("Section not found: {0}")]
    SectionNotFound(Section),

    /// A party block did not split into one of the recognized shapes.
    #[error("Malformed party block ({component_count} components, expected 3 to 5): '{raw_text}'")]
    MalformedPartyBlock {
        raw_text: String,
        component_count: usize,
    },

    /// An argument extractor was requested for a section outside the justification.
    #[error("Not an argument section: {0}")]
    NotAnArgumentSection(Section),

    /// No argument section starts with the given marker.
    #[error("No argument section starts with marker '{0}'")]
    UnknownSectionMarker(String),

    /// Parser configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Placeholder pattern could not be compiled.
    #[error("Invalid placeholder pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;

fn kept_suffix(partial: &str) -> String {
    if partial.is_empty() {
        String::new()
    } else {
        format!(", kept '{partial}'")
    }
}

/// Recoverable condition encountered while extracting a document.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// The stream ended, or the end marker appeared, inside an evidence window.
    /// The partial evidence text has still been kept.
    #[error("Truncated evidence in {section}: expected {missing} more span(s) after 'BO:'{}", kept_suffix(.partial))]
    TruncatedEvidenceWindow {
        section: Section,
        partial: String,
        missing: usize,
    },

    /// An optional section could not be located and is left empty.
    #[error("Section not found, left empty: {section}")]
    SectionMissing { section: Section },

    /// A representative block did not start with the expected prefix and was ignored.
    #[error("Representative block for {section} ignored (missing 'vertreten durch RA' prefix): '{raw_text}'")]
    RepresentativePrefixMissing { section: Section, raw_text: String },

    /// Evidence was collected without any statement to attach it to.
    #[error("Evidence without statement dropped in {section}: {evidence:?}")]
    OrphanedEvidence {
        section: Section,
        evidence: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_not_found_display() {
        let err = ParseError::SectionNotFound(Section::Plaintiff);
        assert_eq!(err.to_string(), "Section not found: Klägerin");
    }

    #[test]
    fn test_malformed_party_block_display() {
        let err = ParseError::MalformedPartyBlock {
            raw_text: "Peter Meister, Basel".to_string(),
            component_count: 2,
        };
        assert!(err.to_string().contains("2 components"));
        assert!(err.to_string().contains("Peter Meister, Basel"));
    }

    #[test]
    fn test_truncated_evidence_display() {
        let warning = ParseWarning::TruncatedEvidenceWindow {
            section: Section::Facts,
            partial: "Zeuge A".to_string(),
            missing: 1,
        };
        assert_eq!(
            warning.to_string(),
            "Truncated evidence in Materielles: expected 1 more span(s) after 'BO:', kept 'Zeuge A'"
        );
    }

    #[test]
    fn test_truncated_evidence_display_without_partial() {
        let warning = ParseWarning::TruncatedEvidenceWindow {
            section: Section::Formalities,
            partial: String::new(),
            missing: 2,
        };
        assert_eq!(
            warning.to_string(),
            "Truncated evidence in Formelles: expected 2 more span(s) after 'BO:'"
        );
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let warning = ParseWarning::SectionMissing {
            section: Section::Jurisdiction,
        };
        let json = serde_json::to_string(&warning).unwrap();
        assert_eq!(json, r#"{"kind":"section_missing","section":"jurisdiction"}"#);
    }
}
