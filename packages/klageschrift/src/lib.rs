//! Klageschrift parser - Reconstruct a Swiss civil pleading from text spans.
//!
//! This crate takes the styled text spans extracted from a pleading PDF
//! (text plus a bold flag, in reading order) and rebuilds the court, the
//! parties with their representatives, the claims ("Rechtsbegehren") and the
//! three argument sections of the justification ("Begründung").
//!
//! # Example
//!
//! ```
//! use klageschrift::{parse_spans, ParserConfig, Span};
//!
//! let spans = vec![
//!     Span::plain("An das"),
//!     Span::plain("Zivilgericht Basel-Stadt"),
//!     Span::plain("Baumleingasse 5"),
//!     Span::plain("Postfach 964"),
//!     Span::plain("4001 Basel"),
//!     Span::plain("in Sachen"),
//!     Span::bold("Muller & Janser AG, "),
//!     Span::plain("Scheideggstrasse 66, 8002 Zürich"),
//!     Span::plain("Klägerin"),
//!     Span::plain("gegen"),
//!     Span::bold("Peter Meister, "),
//!     Span::plain("Klingentalstrasse 41, 4057 Basel"),
//!     Span::plain("Beklagter"),
//!     Span::bold("betreffend Forderung"),
//! ];
//!
//! let parsed = parse_spans(&spans, &ParserConfig::default()).unwrap();
//! assert_eq!(parsed.document.header.defendant.name, "Peter Meister");
//! // Claims and argument sections are missing and reported as warnings
//! assert_eq!(parsed.warnings.len(), 4);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Marker constants and parser settings
//! - [`types`]: Core data types (Span, Entity, Header, Argument, Document)
//! - [`error`]: Error and warning types, Result alias
//! - [`source`]: Loading of JSON span dumps
//! - [`extract`]: Header, claims and argument extractors
//! - [`parser`]: Assembly of the complete document
//! - [`output`]: Text rendering, JSON and YAML output
//! - [`prompt`]: Prompts for the narrative-generation service
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod parser;
pub mod prompt;
pub mod source;
pub mod types;

// Re-export main functions
pub use parser::{parse_file, parse_spans, ParsedDocument};

// Re-export commonly used items
pub use config::ParserConfig;
pub use error::{ParseError, ParseWarning, Result, Section};
pub use types::{Address, Argument, Document, Entity, Header, Justification, Role, Span};
