//! REVDIFF - Universal document revision analyzer.
//!
//! This library compares two revisions of a text document, measures their
//! word-set similarity, and classifies each detected change semantically
//! (numeric values, versions, dates, URLs, emails, list edits) instead of
//! reporting raw line differences.
//!
//! # Example
//!
//! ```no_run
//! use revdiff::{Analyzer, Document, format_report, OutputFormat, OutputOptions};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load two revisions
//! let old = Document::from_path(Path::new("report_v1.txt"))?;
//! let new = Document::from_path(Path::new("report_v2.txt"))?;
//!
//! // Run the universal analysis
//! let mut analyzer = Analyzer::new();
//! analyzer.add_document(old);
//! analyzer.add_document(new);
//! let report = analyzer.universal_analyze()?;
//!
//! // Format the output
//! let output = format_report(&report, &OutputFormat::Terminal, &OutputOptions::default())?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod align;
pub mod analyzer;
pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod matching;
pub mod output;
pub mod patterns;
pub mod report;
pub mod segment;
pub mod wordset;

// Re-export commonly used types for convenience
pub use analyzer::{block_level_changes, detailed_line_analysis, word_set_analysis, Analyzer};
pub use config::AnalysisConfig;
pub use document::{Document, SourceFormat};
pub use error::{AnalysisError, LoadError, OutputError, RevdiffError};
pub use output::{format_report, OutputFormat, OutputOptions};
pub use report::{
    AnalysisMethod, AnalysisReport, AnalysisSummary, ChangeCategory, ChangeKind, ChangeRecord,
    Impact, StructuralShift, UniversalAnalysis,
};
pub use wordset::{compare, compare_all, Comparison, ComparisonOutcome};
