//! Integration tests for the command-line interface.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_klageschrift"))
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("klageschrift")
        .join(name)
}

#[test]
fn test_parse_prints_text() {
    cli()
        .arg("parse")
        .arg(fixture("spans.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Rechtsbegehren:\n1. Der Beklagte sei zu verurteilen"))
        .stdout(predicate::str::contains("III. Materielles\n"))
        .stdout(predicate::str::contains("Header:").not())
        .stderr(predicate::str::contains("warning:").not());
}

#[test]
fn test_parse_with_header() {
    cli()
        .args(["parse", "--header"])
        .arg(fixture("spans.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Header:\nCourt\nZivilgericht Basel-Stadt\n"));
}

#[test]
fn test_parse_json_output() {
    let output = cli()
        .args(["parse", "--format", "json"])
        .arg(fixture("spans.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["document"]["header"]["plaintiff"]["name"], "Muller & Janser AG");
    assert_eq!(value["document"]["claims"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_parse_writes_output_file() {
    let output_dir = TempDir::new().unwrap();
    let output_path = output_dir.path().join("klage.yaml");

    cli()
        .args(["parse", "--format", "yaml", "-o"])
        .arg(&output_path)
        .arg(fixture("spans.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to:"))
        .stdout(predicate::str::contains("Peter Meister"));

    let content = fs::read_to_string(&output_path).unwrap();
    assert!(content.starts_with("---\n"));
    assert!(content.contains("name: Dr. Sandro Maurer"));
}

#[test]
fn test_parse_reports_missing_sections() {
    cli()
        .arg("parse")
        .arg(fixture("header_only.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Rechtsbegehren:\n\nBegründung:"))
        .stderr(predicate::str::contains("Section not found, left empty: Rechtsbegehren"))
        .stderr(predicate::str::contains("Section not found, left empty: Materielles"));
}

#[test]
fn test_parse_fails_without_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spans.json");
    fs::write(&path, r#"[{"text": "Rechtsbegehren"}, {"text": "Begründung"}]"#).unwrap();

    cli()
        .arg("parse")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Section not found: Gericht"));
}

#[test]
fn test_parse_missing_file() {
    cli()
        .args(["parse", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: IO error"));
}

#[test]
fn test_parse_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("parser.yaml");
    fs::write(&config, "evidence_window: 0\n").unwrap();

    cli()
        .arg("parse")
        .arg("--config")
        .arg(&config)
        .arg(fixture("spans.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("evidence_window must be at least 1"));
}

#[test]
fn test_inspect() {
    cli()
        .arg("inspect")
        .arg(fixture("spans.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Text: Einschreiben | Emphasized: true"))
        .stdout(predicate::str::contains("Text: An das | Emphasized: false"))
        .stdout(predicate::str::contains("Text: Klägerin | Emphasized: false"));
}

#[test]
fn test_prompt_defence() {
    cli()
        .arg("prompt")
        .arg(fixture("spans.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("#Klageschrift:\nHeader:\nCourt\n"))
        .stdout(predicate::str::contains("\"materielles\""));
}

#[test]
fn test_prompt_placeholders() {
    cli()
        .args(["prompt", "--kind", "placeholders", "--template"])
        .arg(fixture("template.txt"))
        .arg(fixture("spans.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("genau 4 Werten"))
        .stdout(predicate::str::contains("#Template für Klageantwort\nKlageantwort\n"))
        .stderr(predicate::str::contains("Expected values: 4"));
}

#[test]
fn test_prompt_json() {
    let output = cli()
        .args(["prompt", "--json", "--kind", "placeholders"])
        .arg(fixture("spans.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["system"].as_str().unwrap().contains("genau 45 Werten"));
    assert!(value["user"].as_str().unwrap().contains("#Klageschrift\nHeader:"));
}
