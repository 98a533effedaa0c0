//! Structured output of parse results.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use super::text::render_document;
use crate::error::{ParseWarning, Result};
use crate::parser::ParsedDocument;
use crate::types::Document;

/// Output format of the `parse` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Canonical plain-text rendering.
    #[default]
    Text,
    /// Pretty-printed JSON of the document and its warnings.
    Json,
    /// YAML of the document and its warnings.
    Yaml,
}

/// Serialized form: the document plus the warnings of the run that produced it.
#[derive(Debug, Serialize)]
struct Report<'a> {
    document: &'a Document,
    #[serde(skip_serializing_if = "no_warnings")]
    warnings: &'a [ParseWarning],
}

fn no_warnings(warnings: &&[ParseWarning]) -> bool {
    warnings.is_empty()
}

impl<'a> From<&'a ParsedDocument> for Report<'a> {
    fn from(parsed: &'a ParsedDocument) -> Self {
        Self {
            document: &parsed.document,
            warnings: &parsed.warnings,
        }
    }
}

/// Generate pretty-printed JSON with a trailing newline.
pub fn generate_json(parsed: &ParsedDocument) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&Report::from(parsed))?;
    json.push('\n');
    Ok(json)
}

/// Generate YAML with a document start marker and no trailing whitespace.
pub fn generate_yaml(parsed: &ParsedDocument) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(&Report::from(parsed))?;
    let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Generate the output for `format`.
///
/// `include_header` only affects the text format; structured formats always
/// carry the full document.
pub fn generate(parsed: &ParsedDocument, format: OutputFormat, include_header: bool) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut text = render_document(&parsed.document, include_header);
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Json => generate_json(parsed),
        OutputFormat::Yaml => generate_yaml(parsed),
    }
}

/// Write `content` to `path`.
///
/// Writes to a hidden temp file next to the target, syncs it and renames it
/// over the target, so an existing file is never left half-written.
pub fn save(content: &str, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote output");

    Ok(())
}
