//! Extraction of argument sections from the "Begründung".
//!
//! Each section is bounded by a start and an end marker and consists of
//! statements, each optionally followed by evidence citations introduced by
//! "BO:" (Beweisofferte). The scan is an explicit state machine:
//!
//! ```text
//!            start marker           "BO:"
//!   Idle ─────────────────▶ Statement ──────▶ Evidence(window)
//!                              ▲                   │
//!                              └───── remaining = 0┘
//! ```
//!
//! An evidence citation is always the next `window` spans after the marker
//! (two by default). The marker does not bound the citation, the span count
//! does. A pleading that spreads a citation over more spans is mis-captured
//! without any signal, except when the stream runs out inside the window.

use crate::config::{argument_markers, SectionMarkers, DEFAULT_EVIDENCE_WINDOW, EVIDENCE_MARKER};
use crate::error::{ParseError, ParseWarning, Result, Section};
use crate::types::{Argument, Span};

use super::Extraction;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Start marker not seen yet.
    Idle,
    /// Collecting statement text. `evidence_closed` is set right after an
    /// evidence window has been completed.
    Statement { evidence_closed: bool },
    /// Collecting evidence text, `remaining` spans still to go.
    Evidence { remaining: usize },
}

/// Outcome of feeding one span to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

/// Extractor for one marker-bounded argument section.
///
/// # Examples
/// ```
/// use klageschrift::error::Section;
/// use klageschrift::extract::ArgumentExtractor;
/// use klageschrift::types::Span;
///
/// let spans: Vec<Span> = ["Formelles", "Der Vertrag ist", "nichtig.", "BO:", "Beweis", "A", "II"]
///     .into_iter()
///     .map(Span::plain)
///     .collect();
///
/// let arguments = ArgumentExtractor::for_section(Section::Formalities)
///     .unwrap()
///     .extract(&spans)
///     .unwrap()
///     .value;
/// assert_eq!(arguments[0].statement, "Der Vertrag ist nichtig.");
/// assert_eq!(arguments[0].evidence, vec!["Beweis A"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentExtractor {
    section: Section,
    start_marker: String,
    end_marker: String,
    evidence_window: usize,
    flush_after_evidence: bool,
}

impl ArgumentExtractor {
    /// Create an extractor for arbitrary markers.
    #[must_use]
    pub fn new(
        section: Section,
        start_marker: impl Into<String>,
        end_marker: impl Into<String>,
    ) -> Self {
        Self {
            section,
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
            evidence_window: DEFAULT_EVIDENCE_WINDOW,
            flush_after_evidence: false,
        }
    }

    /// Create an extractor with the standard markers of a justification section.
    ///
    /// Returns `None` for sections outside the justification.
    #[must_use]
    pub fn for_section(section: Section) -> Option<Self> {
        let SectionMarkers { start, end } = argument_markers(section)?;
        Some(Self::new(section, start, end))
    }

    /// Set the number of spans captured after each "BO:" marker.
    ///
    /// A window of zero is treated as one.
    #[must_use]
    pub fn with_evidence_window(mut self, window: usize) -> Self {
        self.evidence_window = window.max(1);
        self
    }

    /// Start a new argument with the first statement span after an evidence window.
    #[must_use]
    pub fn with_flush_after_evidence(mut self, flush: bool) -> Self {
        self.flush_after_evidence = flush;
        self
    }

    /// Section this extractor produces.
    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    /// Scan the full span stream and return the arguments of this section.
    ///
    /// Scanning stops at the end marker, or at the end of the stream when the
    /// end marker never appears. Pending statement and evidence text is kept
    /// in both cases.
    pub fn extract(&self, spans: &[Span]) -> Result<Extraction<Vec<Argument>>> {
        let mut machine = Machine::new(self);

        for span in spans {
            let text = span.text.trim();
            if text.is_empty() {
                continue;
            }
            if machine.step(text) == Step::Stop {
                break;
            }
        }

        if machine.state == State::Idle {
            return Err(ParseError::SectionNotFound(self.section));
        }

        let extraction = machine.finish();
        tracing::debug!(
            section = %self.section,
            arguments = extraction.value.len(),
            "Extracted argument section"
        );
        Ok(extraction)
    }
}

/// Extract one argument section with default settings.
///
/// The start marker must be that of a justification section; it names the
/// section in errors and warnings. Use [`ArgumentExtractor::new`] for other
/// markers.
pub fn extract_arguments(
    spans: &[Span],
    start_marker: &str,
    end_marker: &str,
) -> Result<Extraction<Vec<Argument>>> {
    let section = [Section::Formalities, Section::Jurisdiction, Section::Facts]
        .into_iter()
        .find(|section| argument_markers(*section).is_some_and(|m| m.start == start_marker))
        .ok_or_else(|| ParseError::UnknownSectionMarker(start_marker.to_string()))?;
    ArgumentExtractor::new(section, start_marker, end_marker).extract(spans)
}

/// Mutable scan state for one extraction run.
struct Machine<'a> {
    extractor: &'a ArgumentExtractor,
    state: State,
    statement: String,
    evidence_items: Vec<String>,
    evidence: String,
    completed: Vec<Argument>,
    warnings: Vec<ParseWarning>,
}

impl<'a> Machine<'a> {
    fn new(extractor: &'a ArgumentExtractor) -> Self {
        Self {
            extractor,
            state: State::Idle,
            statement: String::new(),
            evidence_items: Vec::new(),
            evidence: String::new(),
            completed: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Feed one trimmed span text.
    fn step(&mut self, text: &str) -> Step {
        if self.state != State::Idle && text.contains(self.extractor.end_marker.as_str()) {
            return Step::Stop;
        }

        if text.contains(self.extractor.start_marker.as_str()) {
            self.enter_statement();
            return Step::Continue;
        }

        match self.state {
            State::Idle => {}
            State::Statement { evidence_closed } => self.on_statement(text, evidence_closed),
            State::Evidence { remaining } => self.on_evidence(text, remaining),
        }
        Step::Continue
    }

    fn enter_statement(&mut self) {
        if let State::Evidence { remaining } = self.state {
            self.close_truncated_evidence(remaining);
        }
        self.state = State::Statement {
            evidence_closed: false,
        };
    }

    fn on_statement(&mut self, text: &str, evidence_closed: bool) {
        if text.contains(EVIDENCE_MARKER) {
            self.state = State::Evidence {
                remaining: self.extractor.evidence_window,
            };
            return;
        }

        if evidence_closed && self.extractor.flush_after_evidence && !self.statement.is_empty() {
            self.flush_argument();
            self.statement.push_str(text);
        } else {
            self.statement.push(' ');
            self.statement.push_str(text);
        }

        self.state = State::Statement {
            evidence_closed: false,
        };
    }

    fn on_evidence(&mut self, text: &str, remaining: usize) {
        self.evidence.push(' ');
        self.evidence.push_str(text);

        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.evidence_items.push(self.evidence.trim().to_string());
            self.evidence.clear();
            self.state = State::Statement {
                evidence_closed: true,
            };
        } else {
            self.state = State::Evidence { remaining };
        }
    }

    /// Keep partial evidence when a window is cut short, and report it.
    fn close_truncated_evidence(&mut self, remaining: usize) {
        let partial = self.evidence.trim().to_string();
        tracing::warn!(
            section = %self.extractor.section,
            missing = remaining,
            partial = %partial,
            "Evidence window cut short"
        );
        self.warnings.push(ParseWarning::TruncatedEvidenceWindow {
            section: self.extractor.section,
            partial: partial.clone(),
            missing: remaining,
        });
        if !partial.is_empty() {
            self.evidence_items.push(partial);
        }
        self.evidence.clear();
    }

    fn flush_argument(&mut self) {
        let statement = std::mem::take(&mut self.statement);
        let evidence = std::mem::take(&mut self.evidence_items);
        self.completed.push(Argument::new(statement.trim(), evidence));
    }

    fn finish(mut self) -> Extraction<Vec<Argument>> {
        if let State::Evidence { remaining } = self.state {
            self.close_truncated_evidence(remaining);
        }

        if !self.statement.trim().is_empty() {
            self.flush_argument();
        } else if !self.evidence_items.is_empty() {
            self.warnings.push(ParseWarning::OrphanedEvidence {
                section: self.extractor.section,
                evidence: std::mem::take(&mut self.evidence_items),
            });
        }

        Extraction::new(self.completed).with_warnings(self.warnings)
    }
}
