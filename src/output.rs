//! Output formatting for analysis reports.
//!
//! This module handles formatting analysis reports in various output
//! formats (terminal with colors, JSON, plain text). It provides control
//! over what is displayed and how values are formatted.
//!
//! # Examples
//!
//! ```
//! use revdiff::{Analyzer, format_report, OutputFormat, OutputOptions};
//!
//! let mut analyzer = Analyzer::new();
//! analyzer.add_text("Hello world", "old");
//! analyzer.add_text("Completely different content", "new");
//! let report = analyzer.universal_analyze().unwrap();
//!
//! let output = format_report(&report, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.contains("Summary:"));
//! ```

use crate::error::OutputError;
use crate::report::{AnalysisReport, ChangeKind, ChangeRecord, StructuralShift};
use colored::*;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// JSON representation of the full report
    Json,
    /// Plain text, no colors (suitable for piping)
    Plain,
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Show structural shifts alongside real changes
    pub show_structural: bool,
    /// Maximum length for displayed descriptions (truncate if longer)
    pub max_value_length: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            show_structural: true,
            max_value_length: 120,
        }
    }
}

/// Formats an analysis report according to the specified format and options.
///
/// # Arguments
///
/// * `report` - The report to format
/// * `format` - The output format (Terminal, JSON, or Plain)
/// * `options` - Formatting options
///
/// # Returns
///
/// Returns the formatted string on success, or an [`OutputError`] when
/// serialization fails.
pub fn format_report(
    report: &AnalysisReport,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_terminal(report, options)),
        OutputFormat::Json => format_json(report),
        OutputFormat::Plain => Ok(format_plain(report, options)),
    }
}

/// Formats a report for terminal output with colors.
///
/// Color scheme:
/// - Additions: green (bright_green for symbols)
/// - Deletions: red (bright_red for symbols)
/// - Modifications: yellow (bright_yellow for symbols)
/// - Structural shifts: dim white
fn format_terminal(report: &AnalysisReport, options: &OutputOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}%\n",
        "Similarity:".bold(),
        report.basic_analysis.similarity_percentage
    ));

    let changes = &report.universal_analysis.real_changes;
    let shifts = &report.universal_analysis.structural_changes;

    if changes.is_empty() && (shifts.is_empty() || !options.show_structural) {
        output.push_str(&"No changes detected.".dimmed().to_string());
        output.push('\n');
        return output;
    }

    output.push('\n');
    for change in changes {
        output.push_str(&format_change_terminal(change, options));
        output.push('\n');
    }
    if options.show_structural {
        for shift in shifts {
            output.push_str(&format_shift(shift, options).dimmed().to_string());
            output.push('\n');
        }
    }

    output.push('\n');
    output.push_str(&format_summary(report));
    output
}

/// Formats a single change for terminal output.
fn format_change_terminal(change: &ChangeRecord, options: &OutputOptions) -> String {
    let description = truncate(&change.description, options.max_value_length);
    match change.kind {
        ChangeKind::LineAddition | ChangeKind::WordsAdded => {
            format!("{} {}", "+".bright_green(), description.green())
        }
        ChangeKind::LineDeletion | ChangeKind::WordsRemoved => {
            format!("{} {}", "-".bright_red(), description.red())
        }
        _ => format!("{} {}", "•".bright_yellow(), description.yellow()),
    }
}

/// Formats a report as pretty-printed JSON.
///
/// The structure mirrors the serialized [`AnalysisReport`] exactly:
/// `basic_analysis`, `universal_analysis`, and `summary` sections.
fn format_json(report: &AnalysisReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

/// Formats a report for plain text output (no colors).
///
/// Uses the same layout as terminal output but without ANSI color codes.
fn format_plain(report: &AnalysisReport, options: &OutputOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Similarity: {}%\n",
        report.basic_analysis.similarity_percentage
    ));

    let changes = &report.universal_analysis.real_changes;
    let shifts = &report.universal_analysis.structural_changes;

    if changes.is_empty() && (shifts.is_empty() || !options.show_structural) {
        output.push_str("No changes detected.\n");
        return output;
    }

    output.push('\n');
    for change in changes {
        output.push_str(&format_change_plain(change, options));
        output.push('\n');
    }
    if options.show_structural {
        for shift in shifts {
            output.push_str(&format_shift(shift, options));
            output.push('\n');
        }
    }

    output.push('\n');
    output.push_str(&format_summary(report));
    output
}

/// Formats a single change for plain text output.
fn format_change_plain(change: &ChangeRecord, options: &OutputOptions) -> String {
    let description = truncate(&change.description, options.max_value_length);
    match change.kind {
        ChangeKind::LineAddition | ChangeKind::WordsAdded => format!("+ {}", description),
        ChangeKind::LineDeletion | ChangeKind::WordsRemoved => format!("- {}", description),
        _ => format!("• {}", description),
    }
}

fn format_shift(shift: &StructuralShift, options: &OutputOptions) -> String {
    format!("~ {}", truncate(&shift.description, options.max_value_length))
}

/// Formats the summary block shared by terminal and plain output.
fn format_summary(report: &AnalysisReport) -> String {
    let summary = &report.summary;
    format!(
        "Summary: {} ({} changes, {} structural, impact: {})",
        summary.overall_assessment,
        summary.real_changes_count,
        summary.structural_changes_count,
        summary.change_impact.as_str()
    )
}

/// Truncates a display string, appending an ellipsis when shortened.
fn truncate(value: &str, max_length: usize) -> String {
    if value.chars().count() <= max_length {
        return value.to_string();
    }
    let mut truncated: String = value.chars().take(max_length).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;

    fn report_for(old: &str, new: &str) -> AnalysisReport {
        let mut analyzer = Analyzer::new();
        analyzer.add_text(old, "old");
        analyzer.add_text(new, "new");
        analyzer.universal_analyze().unwrap()
    }

    // Enough shared vocabulary to stay above the detailed-mode threshold
    // when a single token changes.
    fn roadmap(budget: &str) -> String {
        format!(
            "Project roadmap overview\n\
             The team plans delivery across four quarters this year\n\
             Budget: {} units\n\
             Risks include vendor delays and hiring gaps\n\
             Contact remains unchanged for now",
            budget
        )
    }

    #[test]
    fn test_plain_no_changes() {
        let report = report_for("same text", "same text");
        let output = format_plain(&report, &OutputOptions::default());
        assert!(output.contains("Similarity: 100%"));
        assert!(output.contains("No changes detected."));
    }

    #[test]
    fn test_plain_with_changes() {
        let report = report_for(&roadmap("100"), &roadmap("150"));
        let output = format_plain(&report, &OutputOptions::default());
        assert!(output.contains("• Numeric value changed from 100 to 150"));
        assert!(output.contains("Summary: Minor changes only"));
        assert!(output.contains("impact: moderate"));
    }

    #[test]
    fn test_plain_symbols_for_additions_and_deletions() {
        let report = report_for("Line 1\nLine 2", "Line 1\nNew line\nLine 2");
        let output = format_plain(&report, &OutputOptions::default());
        assert!(output.contains("+ Line added: New line"));

        let report = report_for("Line 1\nOld line\nLine 2", "Line 1\nLine 2");
        let output = format_plain(&report, &OutputOptions::default());
        assert!(output.contains("- Line removed: Old line"));
    }

    #[test]
    fn test_plain_structural_shift_toggle() {
        let report = report_for(
            "Closing line\nalpha\nbeta\ngamma",
            "alpha\nbeta\ngamma\nClosing line",
        );
        let output = format_plain(&report, &OutputOptions::default());
        assert!(output.contains("~ Line shifted from position 1 to 4"));

        let hidden = OutputOptions {
            show_structural: false,
            ..Default::default()
        };
        let output = format_plain(&report, &hidden);
        assert!(!output.contains("~ Line shifted"));
    }

    #[test]
    fn test_json_contract_sections() {
        let report = report_for(&roadmap("100"), &roadmap("150"));
        let output = format_json(&report).unwrap();
        assert!(output.contains("\"basic_analysis\""));
        assert!(output.contains("\"universal_analysis\""));
        assert!(output.contains("\"summary\""));
        assert!(output.contains("\"similarity_percentage\""));
        assert!(output.contains("\"type\": \"numeric_change\""));
        assert!(output.contains("\"analysis_method\": \"detailed_line_diff\""));
    }

    #[test]
    fn test_terminal_no_changes() {
        let report = report_for("same", "same");
        let output = format_terminal(&report, &OutputOptions::default());
        assert!(output.contains("No changes detected."));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 80), "short");
        let long = "x".repeat(200);
        let truncated = truncate(&long, 80);
        assert_eq!(truncated.chars().count(), 83);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_format_report_dispatch() {
        let report = report_for("a b c", "a b c");
        let options = OutputOptions::default();
        assert!(format_report(&report, &OutputFormat::Plain, &options).is_ok());
        assert!(format_report(&report, &OutputFormat::Json, &options).is_ok());
        assert!(format_report(&report, &OutputFormat::Terminal, &options).is_ok());
    }
}
