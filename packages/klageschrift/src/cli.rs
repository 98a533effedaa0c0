//! Command-line interface for the Klageschrift parser.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use crate::config::{ClaimNumbering, ParserConfig, RepresentativeTerminator};
use crate::error::{ParseWarning, Result};
use crate::output::{generate, save, OutputFormat};
use crate::parser::{all_arguments, parse_spans, ParsedDocument};
use crate::prompt::{build_defence_prompt, build_placeholder_prompt, Prompt, DEFAULT_PLACEHOLDER_PATTERN};
use crate::source::load_spans;

/// Klageschrift parser - Reconstruct parties, claims and arguments from a pleading.
#[derive(Parser)]
#[command(name = "klageschrift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Parser settings that can be overridden per run.
#[derive(Debug, clap::Args)]
pub struct ParserArgs {
    /// Parser configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How the plaintiff's representative block ends
    #[arg(long, value_enum)]
    pub terminator: Option<RepresentativeTerminator>,

    /// Number of spans captured after each "BO:" marker
    #[arg(long)]
    pub evidence_window: Option<usize>,

    /// Treatment of the numbered claim fragments
    #[arg(long, value_enum)]
    pub claim_numbering: Option<ClaimNumbering>,

    /// Start a new argument after each evidence citation
    #[arg(long)]
    pub flush_after_evidence: bool,
}

impl ParserArgs {
    /// Load the configuration file, if any, and apply the overrides.
    pub fn resolve(&self) -> Result<ParserConfig> {
        let mut config = match &self.config {
            Some(path) => ParserConfig::load(path)?,
            None => ParserConfig::default(),
        };

        if let Some(terminator) = self.terminator {
            config.representative_terminator = terminator;
        }
        if let Some(window) = self.evidence_window {
            config.evidence_window = window;
        }
        if let Some(numbering) = self.claim_numbering {
            config.claim_numbering = numbering;
        }
        if self.flush_after_evidence {
            config.flush_after_evidence = true;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Which prompt the `prompt` command builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PromptKind {
    /// Structured counter-argumentation.
    #[default]
    Defence,
    /// Values for the placeholders of a response template.
    Placeholders,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a span dump (JSON) into a structured document.
    Parse {
        /// JSON file with the extracted text spans
        spans: PathBuf,

        #[command(flatten)]
        parser: ParserArgs,

        /// Include the header (court and parties) in text output
        #[arg(long)]
        header: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the prompt for the narrative-generation service.
    Prompt {
        /// JSON file with the extracted text spans
        spans: PathBuf,

        #[command(flatten)]
        parser: ParserArgs,

        /// Kind of prompt
        #[arg(short, long, value_enum, default_value_t = PromptKind::Defence)]
        kind: PromptKind,

        /// Response template whose placeholders are to be filled
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Placeholder pattern; JavaScript literals like /.../g are accepted
        #[arg(long, default_value = DEFAULT_PLACEHOLDER_PATTERN)]
        placeholder_regex: String,

        /// Print the prompt as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the span stream as the parser sees it.
    Inspect {
        /// JSON file with the extracted text spans
        spans: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            spans,
            parser,
            header,
            format,
            output,
        } => parse_command(&spans, &parser, header, format, output.as_deref()),
        Commands::Prompt {
            spans,
            parser,
            kind,
            template,
            placeholder_regex,
            json,
        } => prompt_command(
            &spans,
            &parser,
            kind,
            template.as_deref(),
            &placeholder_regex,
            json,
        ),
        Commands::Inspect { spans } => inspect_command(&spans),
    }
}

/// Load spans and parse them with the resolved configuration.
fn load_and_parse(spans_path: &Path, parser: &ParserArgs) -> Result<ParsedDocument> {
    let config = parser.resolve()?;
    let spans = load_spans(spans_path)?;
    let parsed = parse_spans(&spans, &config)?;
    report_warnings(&parsed.warnings);
    Ok(parsed)
}

/// Execute the parse command.
fn parse_command(
    spans_path: &Path,
    parser: &ParserArgs,
    header: bool,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let parsed = load_and_parse(spans_path, parser)?;
    let content = generate(&parsed, format, header)?;

    let Some(output_path) = output else {
        print!("{content}");
        return Ok(());
    };

    save(&content, output_path)?;

    let document = &parsed.document;
    println!(
        "{} {}",
        style("Parsed").bold(),
        style(spans_path.display()).cyan()
    );
    println!("  Plaintiff: {}", style(&document.header.plaintiff.name).green());
    println!("  Defendant: {}", style(&document.header.defendant.name).green());
    println!("  Claims: {}", document.claims.len());
    println!("  Arguments: {}", all_arguments(&document.justification).len());
    if !parsed.warnings.is_empty() {
        println!("  Warnings: {}", style(parsed.warnings.len()).yellow().bold());
    }
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Execute the prompt command.
fn prompt_command(
    spans_path: &Path,
    parser: &ParserArgs,
    kind: PromptKind,
    template: Option<&Path>,
    placeholder_regex: &str,
    json: bool,
) -> Result<()> {
    let parsed = load_and_parse(spans_path, parser)?;
    let document_text = parsed.document.render(true);

    let (prompt, placeholder_count) = match kind {
        PromptKind::Defence => (build_defence_prompt(&document_text), None),
        PromptKind::Placeholders => {
            let template_text = template.map(std::fs::read_to_string).transpose()?;
            let result =
                build_placeholder_prompt(&document_text, template_text.as_deref(), placeholder_regex)?;
            (result.prompt, Some(result.placeholder_count))
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&prompt)?);
        return Ok(());
    }

    print_prompt(&prompt);
    if let Some(count) = placeholder_count {
        eprintln!("{} {count}", style("Expected values:").bold());
    }
    Ok(())
}

/// Execute the inspect command.
fn inspect_command(spans_path: &Path) -> Result<()> {
    let spans = load_spans(spans_path)?;
    for span in &spans {
        let text = if span.emphasized {
            style(&span.text).bold()
        } else {
            style(&span.text)
        };
        println!("Text: {text} | Emphasized: {}", span.emphasized);
    }
    eprintln!("{} spans", style(spans.len()).cyan());
    Ok(())
}

fn print_prompt(prompt: &Prompt) {
    println!("{}", style("# System").bold());
    println!("{}", prompt.system);
    if !prompt.user.is_empty() {
        println!("{}", style("# User").bold());
        println!("{}", prompt.user);
    }
}

/// Print warnings to stderr so they never mix with the document on stdout.
fn report_warnings(warnings: &[ParseWarning]) {
    for warning in warnings {
        eprintln!("{} {warning}", style("warning:").yellow().bold());
    }
}
