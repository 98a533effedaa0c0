//! Configuration constants and parser settings.
//!
//! The marker constants are the literal substrings the extractors look for in
//! the span stream. They are matched with `str::contains`, so a marker also
//! hits inside longer fragments (e.g. "gegen" inside "entgegen").

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result, Section};

/// Start of the court address block ("An das Zivilgericht ...").
pub const COURT_MARKER: &str = "An das";

/// Start of the plaintiff party block.
pub const PLAINTIFF_START_MARKER: &str = "in Sachen";

/// Ends the plaintiff party block; also arms the defendant scan.
pub const PLAINTIFF_ROLE_MARKER: &str = "Klägerin";

/// Ends the defendant party block.
pub const DEFENDANT_ROLE_MARKER: &str = "Beklagter";

/// Literal terminator of the plaintiff representative block.
pub const AGAINST_MARKER: &str = "gegen";

/// Prefix of a representative block.
pub const REPRESENTATIVE_PREFIX: &str = "vertreten durch RA ";

/// Token identifying a PO box component of a party block.
pub const PO_BOX_MARKER: &str = "Postfach";

/// Delimiter between the components of a flattened party block.
pub const COMPONENT_DELIMITER: &str = ", ";

/// Start of the claims list.
pub const CLAIMS_START_MARKER: &str = "Rechtsbegehren";

/// End of the claims list.
pub const CLAIMS_END_MARKER: &str = "Begründung";

/// Opens an evidence window inside an argument section.
pub const EVIDENCE_MARKER: &str = "BO:";

/// Default number of spans captured after an evidence marker.
pub const DEFAULT_EVIDENCE_WINDOW: usize = 2;

/// Number of leading characters inspected by the postal-code heuristic.
pub const POSTAL_CODE_PREFIX_LEN: usize = 4;

/// Minimum number of lines a court block must have.
pub const MIN_COURT_LINES: usize = 4;

/// Start and end marker bounding one argument section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMarkers {
    pub start: &'static str,
    pub end: &'static str,
}

/// "I. Formelles", ended by the "II" heading.
pub const FORMALITIES_MARKERS: SectionMarkers = SectionMarkers {
    start: "Formelles",
    end: "II",
};

/// "II. Zuständigkeit", ended by the "III" heading.
pub const JURISDICTION_MARKERS: SectionMarkers = SectionMarkers {
    start: "Zuständigkeit",
    end: "III",
};

/// "III. Materielles", ended by the interest claim.
pub const FACTS_MARKERS: SectionMarkers = SectionMarkers {
    start: "Materielles",
    end: "Zinsanspruch",
};

/// Markers of an argument section, `None` for sections outside the justification.
#[must_use]
pub fn argument_markers(section: Section) -> Option<SectionMarkers> {
    match section {
        Section::Formalities => Some(FORMALITIES_MARKERS),
        Section::Jurisdiction => Some(JURISDICTION_MARKERS),
        Section::Facts => Some(FACTS_MARKERS),
        Section::Court | Section::Plaintiff | Section::Defendant | Section::Claims => None,
    }
}

/// How the plaintiff's representative block is terminated.
///
/// Both layouts occur in practice: some pleadings put a literal "gegen"
/// between the parties, others go straight to the emphasized defendant name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RepresentativeTerminator {
    /// Stop at the first span containing "gegen".
    #[default]
    Gegen,
    /// Stop at the first emphasized (bold) span.
    Emphasized,
}

/// What happens to the fragment that starts with a claim number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ClaimNumbering {
    /// The numbered fragment only marks the boundary and is dropped.
    #[default]
    Boundary,
    /// The numbered fragment opens the next claim.
    Keep,
}

/// Tunable parser behavior.
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```
/// use klageschrift::config::{ParserConfig, RepresentativeTerminator};
///
/// let config = ParserConfig::from_yaml("representative_terminator: emphasized").unwrap();
/// assert_eq!(config.representative_terminator, RepresentativeTerminator::Emphasized);
/// assert_eq!(config.evidence_window, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Terminator of the plaintiff representative block.
    pub representative_terminator: RepresentativeTerminator,

    /// Number of spans that make up one evidence citation after "BO:".
    pub evidence_window: usize,

    /// Start a new argument with the first statement span after an evidence
    /// window. When `false` that span joins the current statement.
    pub flush_after_evidence: bool,

    /// Treatment of numbered claim fragments.
    pub claim_numbering: ClaimNumbering,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            representative_terminator: RepresentativeTerminator::default(),
            evidence_window: DEFAULT_EVIDENCE_WINDOW,
            flush_after_evidence: false,
            claim_numbering: ClaimNumbering::default(),
        }
    }
}

impl ParserConfig {
    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded parser configuration");
        Self::from_yaml(&yaml)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.evidence_window == 0 {
            return Err(ParseError::InvalidConfig(
                "evidence_window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
