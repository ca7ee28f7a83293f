//! REVDIFF command-line interface.
//!
//! This is the main entry point for the revdiff CLI tool. It uses clap for
//! argument parsing and wires together the library modules to analyze two
//! revisions of a text document.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use revdiff::{
    format_report, AnalysisConfig, Analyzer, Document, OutputFormat, OutputOptions,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// REVDIFF - Universal document revision analyzer
///
/// Compares two revisions of a text document, scores their word-set
/// similarity, and classifies each change semantically (numbers, versions,
/// dates, URLs, emails) instead of dumping raw line differences.
#[derive(Parser)]
#[command(name = "revdiff")]
#[command(version)]
#[command(about = "Universal document revision analyzer", long_about = None)]
#[command(author = "REVDIFF Contributors")]
struct Cli {
    /// First revision to compare
    #[arg(value_name = "FILE1")]
    file1: PathBuf,

    /// Second revision to compare
    #[arg(value_name = "FILE2")]
    file2: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// Difference percentage above which the pair counts as significantly different
    #[arg(short, long, default_value = "30")]
    tolerance: f64,

    /// Compare words case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// Keep blank lines when comparing word sets
    #[arg(long)]
    preserve_whitespace: bool,

    /// Hide structural shifts in the output
    #[arg(long)]
    no_structural: bool,

    /// Maximum length for displayed descriptions
    #[arg(long, default_value = "120")]
    max_value_length: usize,

    /// Verbose output (show analysis progress)
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (only show changes, suppress summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// JSON representation
    Json,
    /// Plain text (no colors)
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if cli.verbose {
        eprintln!("Loading {}...", cli.file1.display());
    }

    let old = Document::from_path(&cli.file1)
        .with_context(|| format!("Failed to load first file: {}", cli.file1.display()))?;

    if cli.verbose {
        eprintln!("Loading {}...", cli.file2.display());
    }

    let new = Document::from_path(&cli.file2)
        .with_context(|| format!("Failed to load second file: {}", cli.file2.display()))?;

    if cli.verbose {
        eprintln!("Analyzing...");
    }

    let config = AnalysisConfig {
        tolerance_percentage: cli.tolerance,
        case_sensitive: cli.case_sensitive,
        ignore_whitespace: !cli.preserve_whitespace,
        ..Default::default()
    };

    let mut analyzer = Analyzer::with_config(config).context("Invalid analysis configuration")?;
    analyzer.add_document(old);
    analyzer.add_document(new);

    let report = analyzer
        .universal_analyze()
        .context("Failed to analyze documents")?;

    if cli.verbose {
        eprintln!("Formatting output...");
    }

    let output_options = OutputOptions {
        show_structural: !cli.no_structural,
        max_value_length: cli.max_value_length,
    };

    let output_format: OutputFormat = cli.format.into();
    let output = format_report(&report, &output_format, &output_options)
        .context("Failed to format analysis output")?;

    if !cli.quiet {
        println!("{}", output);
    } else {
        for line in output.lines() {
            if !line.starts_with("Summary:") && !line.trim().is_empty() {
                println!("{}", line);
            }
        }
    }

    let has_differences = !report.universal_analysis.real_changes.is_empty()
        || report.basic_analysis.is_significantly_different;
    if has_differences {
        Ok(1)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Terminal),
            OutputFormat::Terminal
        );
        assert_eq!(OutputFormat::from(OutputFormatArg::Json), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Plain),
            OutputFormat::Plain
        );
    }
}
