//! Analysis configuration.
//!
//! [`AnalysisConfig`] is an immutable value object supplied at analyzer
//! construction. The two block thresholds are deliberately configurable:
//! the defaults (0.6 accept, 0.98 keep) are policy constants carried over
//! from the original comparison behavior, not derived values.

use crate::error::AnalysisError;
use serde::Serialize;

/// Configuration for document comparison.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisConfig {
    /// Difference percentage above which two documents are flagged as
    /// significantly different (strict comparison)
    pub tolerance_percentage: f64,
    /// Compare words case-sensitively
    pub case_sensitive: bool,
    /// Tokenize on any whitespace; when false, line boundaries are walked
    /// explicitly before splitting
    pub ignore_whitespace: bool,
    /// Enable coarse word-set change records
    pub enable_word_analysis: bool,
    /// Enable the detailed line-level analysis path
    pub enable_line_analysis: bool,
    /// Minimum Jaccard similarity for a greedy block match to be accepted
    pub block_match_threshold: f64,
    /// Jaccard similarity at or above which a matched block pair is
    /// treated as unchanged
    pub block_keep_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tolerance_percentage: 30.0,
            case_sensitive: false,
            ignore_whitespace: true,
            enable_word_analysis: true,
            enable_line_analysis: true,
            block_match_threshold: 0.6,
            block_keep_threshold: 0.98,
        }
    }
}

impl AnalysisConfig {
    /// Validates ranges: tolerance must be within 0..=100 and both block
    /// thresholds within 0..=1.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(0.0..=100.0).contains(&self.tolerance_percentage) {
            return Err(AnalysisError::invalid_config(format!(
                "tolerance_percentage must be between 0 and 100, got {}",
                self.tolerance_percentage
            )));
        }
        if !(0.0..=1.0).contains(&self.block_match_threshold) {
            return Err(AnalysisError::invalid_config(format!(
                "block_match_threshold must be between 0 and 1, got {}",
                self.block_match_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.block_keep_threshold) {
            return Err(AnalysisError::invalid_config(format!(
                "block_keep_threshold must be between 0 and 1, got {}",
                self.block_keep_threshold
            )));
        }
        Ok(())
    }
}
