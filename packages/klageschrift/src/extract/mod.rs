//! Marker-driven extractors that turn the span stream into document parts.
//!
//! Every extractor performs its own pass over the complete stream, so the
//! passes are independent of each other and can run in any order.

mod arguments;
mod claims;
mod header;
mod person;
pub mod predicates;

pub use arguments::{extract_arguments, ArgumentExtractor};
pub use claims::extract_claims;
pub use header::{extract_court, extract_defendant, extract_header, extract_plaintiff};
pub use person::build_person;

use crate::error::ParseWarning;

/// Value produced by an extraction pass, with the non-fatal issues found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<T> {
    pub value: T,
    pub warnings: Vec<ParseWarning>,
}

impl<T> Extraction<T> {
    /// Wrap a value without warnings.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Attach warnings.
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<ParseWarning>) -> Self {
        self.warnings = warnings;
        self
    }
}
