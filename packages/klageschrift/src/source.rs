//! Loading of span streams produced by the text-extraction backend.
//!
//! The backend dumps the spans of a PDF as a JSON array in reading order.
//! Each element carries the text and either an explicit `emphasized` flag or
//! the `font` name, in which case bold fonts count as emphasized:
//!
//! ```json
//! [
//!   {"text": "in Sachen", "font": "Arial"},
//!   {"text": "Muller & Janser AG, ", "font": "Arial-BoldMT"},
//!   {"text": "Klägerin", "emphasized": false}
//! ]
//! ```

use std::path::Path;

use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::types::Span;

/// Span as written by the extraction backend.
#[derive(Debug, Deserialize)]
struct RawSpan {
    text: String,
    #[serde(default)]
    emphasized: Option<bool>,
    #[serde(default)]
    font: Option<String>,
}

impl RawSpan {
    fn into_span(self) -> Span {
        let emphasized = self
            .emphasized
            .unwrap_or_else(|| self.font.as_deref().is_some_and(is_bold_font));
        Span {
            text: self.text.nfc().collect(),
            emphasized,
        }
    }
}

/// Check whether a font name denotes a bold face (e.g. "Arial-BoldMT").
#[must_use]
pub fn is_bold_font(font: &str) -> bool {
    font.contains("Bold")
}

/// Parse a JSON span dump.
///
/// Text is normalized to Unicode NFC so that decomposed umlauts still match
/// the markers. Spans that are blank after trimming are dropped.
pub fn spans_from_json(json: &str) -> Result<Vec<Span>> {
    let raw: Vec<RawSpan> = serde_json::from_str(json)?;
    let total = raw.len();

    let spans: Vec<Span> = raw
        .into_iter()
        .map(RawSpan::into_span)
        .filter(|span| !span.text.trim().is_empty())
        .collect();

    tracing::debug!(total, kept = spans.len(), "Loaded span stream");
    Ok(spans)
}

/// Read a JSON span dump from disk.
pub fn load_spans(path: &Path) -> Result<Vec<Span>> {
    let json = std::fs::read_to_string(path)?;
    spans_from_json(&json)
}
