//! Coarse word-set comparison.
//!
//! This is the baseline layer of the analysis: two documents are reduced to
//! normalized word sets and scored by overlap. The result feeds both the
//! standalone pairwise comparison API and the strategy decision of the
//! universal analyzer (detailed line diff vs. word-set fallback).
//!
//! # Examples
//!
//! ```
//! use revdiff::{compare, AnalysisConfig, Document};
//!
//! let a = Document::from_text("Hello world", "a");
//! let b = Document::from_text("Hello world", "b");
//! let result = compare(&a, &b, &AnalysisConfig::default());
//!
//! assert_eq!(result.similarity_percentage, 100.0);
//! assert!(!result.is_significantly_different);
//! ```

use crate::config::AnalysisConfig;
use crate::document::Document;
use crate::error::AnalysisError;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;

/// Coarse comparison of two documents.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Comparison {
    /// 2·|A∩B| / (|A|+|B|) · 100, rounded to 2 decimals
    pub similarity_percentage: f64,
    /// (|A−B| + |B−A|) / (|A|+|B|) · 100, rounded to 2 decimals
    pub difference_percentage: f64,
    /// Number of words present in both documents
    pub common_words: usize,
    /// Words only in the first document
    pub unique_words_file1: usize,
    /// Words only in the second document
    pub unique_words_file2: usize,
    /// Whether difference_percentage strictly exceeds the tolerance
    pub is_significantly_different: bool,
}

/// Result of the pairwise comparison over all registered documents.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonOutcome {
    pub documents: Vec<Document>,
    /// One entry per unordered pair (i < j), in registration order
    pub comparison_matrix: Vec<Comparison>,
    pub tolerance_threshold: f64,
    pub analysis_timestamp: String,
}

/// Compares two documents by word-set overlap.
///
/// When exactly one side declares that its extraction already collapsed
/// blank lines (PDF sources), the other side is normalized the same way so
/// heterogeneous-source comparisons stay fair.
///
/// Both percentages are rounded to two decimals. Two empty documents are
/// identical by definition: similarity 100, difference 0.
pub fn compare(a: &Document, b: &Document, config: &AnalysisConfig) -> Comparison {
    let normalization_involved = a.requires_normalization() || b.requires_normalization();

    let words_a = extract_words(
        &a.content,
        config,
        normalization_involved && !a.requires_normalization(),
    );
    let words_b = extract_words(
        &b.content,
        config,
        normalization_involved && !b.requires_normalization(),
    );

    let common_words = words_a.intersection(&words_b).count();
    let unique_words_file1 = words_a.difference(&words_b).count();
    let unique_words_file2 = words_b.difference(&words_a).count();

    let total_words = words_a.len() + words_b.len();
    let (similarity_percentage, difference_percentage) = if total_words == 0 {
        (100.0, 0.0)
    } else {
        let similarity = (common_words * 2) as f64 / total_words as f64 * 100.0;
        let difference = (unique_words_file1 + unique_words_file2) as f64 / total_words as f64 * 100.0;
        (round2(similarity), round2(difference))
    };

    Comparison {
        similarity_percentage,
        difference_percentage,
        common_words,
        unique_words_file1,
        unique_words_file2,
        is_significantly_different: difference_percentage > config.tolerance_percentage,
    }
}

/// Compares every unordered pair of the given documents.
///
/// # Errors
///
/// Returns [`AnalysisError::NotEnoughDocuments`] when fewer than two
/// documents are supplied.
pub fn compare_all(
    documents: &[Document],
    config: &AnalysisConfig,
) -> Result<ComparisonOutcome, AnalysisError> {
    if documents.len() < 2 {
        return Err(AnalysisError::NotEnoughDocuments {
            count: documents.len(),
        });
    }

    let mut comparison_matrix = Vec::new();
    for i in 0..documents.len() {
        for j in (i + 1)..documents.len() {
            comparison_matrix.push(compare(&documents[i], &documents[j], config));
        }
    }

    Ok(ComparisonOutcome {
        documents: documents.to_vec(),
        comparison_matrix,
        tolerance_threshold: config.tolerance_percentage,
        analysis_timestamp: Utc::now().to_rfc3339(),
    })
}

/// Extracts the normalized word set from a text payload.
///
/// Case is folded per configuration, tokens are split on whitespace (or
/// walked per line when whitespace preservation is requested), and each
/// token is reduced to its word/digit characters. Empty tokens are dropped.
fn extract_words(text: &str, config: &AnalysisConfig, normalize_structure: bool) -> HashSet<String> {
    if text.is_empty() {
        return HashSet::new();
    }

    let text = if config.case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    };

    let text = if normalize_structure {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        text
    };

    let raw_tokens: Vec<&str> = if config.ignore_whitespace {
        text.split_whitespace().collect()
    } else {
        text.split('\n')
            .flat_map(|line| line.split_whitespace())
            .collect()
    };

    raw_tokens
        .into_iter()
        .filter_map(|token| {
            let cleaned: String = token
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                Some(cleaned)
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
