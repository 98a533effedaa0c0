//! Rendering and serialization of parsed documents.

mod text;
mod writer;

pub use text::{render_document, CLAIMS_TITLE, HEADER_TITLE, JUSTIFICATION_TITLE, PARTY_SEPARATOR};
pub use writer::{generate, generate_json, generate_yaml, save, OutputFormat};
