//! Assembly of a complete document from the individual extraction passes.

use std::path::Path;

use serde::Serialize;

use crate::config::ParserConfig;
use crate::error::{ParseError, ParseWarning, Result, Section};
use crate::extract::{extract_claims, extract_header, ArgumentExtractor, Extraction};
use crate::source::load_spans;
use crate::types::{Argument, Document, Justification, Span};

/// Result of parsing a pleading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    pub document: Document,

    /// Recoverable issues found while parsing. Never fatal.
    pub warnings: Vec<ParseWarning>,
}

/// Parse a span stream into a document.
///
/// The header is required: a missing or malformed court, plaintiff or
/// defendant fails the parse. Claims and argument sections are optional; a
/// section whose start marker never appears is left empty and reported as
/// [`ParseWarning::SectionMissing`].
pub fn parse_spans(spans: &[Span], config: &ParserConfig) -> Result<ParsedDocument> {
    config.validate()?;
    let mut warnings = Vec::new();

    let header = extract_header(spans, config.representative_terminator)?;
    warnings.extend(header.warnings);

    let claims = optional_section(
        Section::Claims,
        extract_claims(spans, config.claim_numbering).map(Extraction::new),
        &mut warnings,
    )?;

    let mut arguments = |section: Section| -> Result<Vec<Argument>> {
        let extractor = ArgumentExtractor::for_section(section)
            .ok_or(ParseError::NotAnArgumentSection(section))?
            .with_evidence_window(config.evidence_window)
            .with_flush_after_evidence(config.flush_after_evidence);
        optional_section(section, extractor.extract(spans), &mut warnings)
    };
    let justification = Justification {
        formalities: arguments(Section::Formalities)?,
        jurisdiction: arguments(Section::Jurisdiction)?,
        facts: arguments(Section::Facts)?,
    };

    tracing::info!(
        claims = claims.len(),
        formalities = justification.formalities.len(),
        jurisdiction = justification.jurisdiction.len(),
        facts = justification.facts.len(),
        warnings = warnings.len(),
        "Parsed document"
    );

    Ok(ParsedDocument {
        document: Document::new(header.value, claims, justification),
        warnings,
    })
}

/// Load a JSON span dump and parse it.
pub fn parse_file(path: &Path, config: &ParserConfig) -> Result<ParsedDocument> {
    let spans = load_spans(path)?;
    parse_spans(&spans, config)
}

/// Turn a missing section into an empty one plus a warning.
fn optional_section<T: Default>(
    section: Section,
    result: Result<Extraction<T>>,
    warnings: &mut Vec<ParseWarning>,
) -> Result<T> {
    match result {
        Ok(extraction) => {
            warnings.extend(extraction.warnings);
            Ok(extraction.value)
        }
        Err(ParseError::SectionNotFound(missing)) if missing == section => {
            tracing::warn!(section = %section, "Section not found, leaving it empty");
            warnings.push(ParseWarning::SectionMissing { section });
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

/// Arguments of all three sections, in document order.
#[must_use]
pub fn all_arguments(justification: &Justification) -> Vec<&Argument> {
    justification
        .formalities
        .iter()
        .chain(&justification.jurisdiction)
        .chain(&justification.facts)
        .collect()
}
