//! Universal analysis orchestrator.
//!
//! Drives the full pipeline for one document pair: coarse word-set
//! comparison decides the strategy (detailed line diff for near-identical
//! documents, word-set fallback otherwise), the chosen path produces
//! classified change records and structural shifts, and the aggregate
//! summary is derived at the end. Each analysis is a pure function of the
//! registered documents and the configuration; the analyzer holds no state
//! across calls beyond the document list itself.
//!
//! # Examples
//!
//! ```
//! use revdiff::Analyzer;
//!
//! let mut analyzer = Analyzer::new();
//! analyzer.add_text("Roadmap item one", "old");
//! analyzer.add_text("Roadmap item one", "new");
//!
//! let report = analyzer.universal_analyze().unwrap();
//! assert_eq!(report.basic_analysis.similarity_percentage, 100.0);
//! assert!(report.universal_analysis.real_changes.is_empty());
//! ```

use crate::align::{align, OpTag};
use crate::classify;
use crate::config::AnalysisConfig;
use crate::document::Document;
use crate::error::AnalysisError;
use crate::matching::{diff_blocks, match_blocks, BlockOp};
use crate::report::{
    AnalysisMethod, AnalysisReport, AnalysisSummary, ChangeCategory, ChangeKind, ChangeRecord,
    Impact, StructuralShift, UniversalAnalysis,
};
use crate::segment::{normalize_text, segment};
use crate::wordset::{self, ComparisonOutcome};
use tracing::debug;

/// Word-set similarity at or above which a pair is considered similar
/// enough for meaningful line alignment.
const DETAILED_SIMILARITY_THRESHOLD: f64 = 95.0;

/// Number of word samples listed in a word-set change description.
const WORD_SAMPLE_LIMIT: usize = 10;

/// Document comparison engine.
///
/// Register two (or, for the coarse pairwise matrix, more) documents and
/// run an analysis. Instances are not shareable across threads mid-update;
/// construct one per comparison when embedding in a concurrent service.
#[derive(Debug, Default)]
pub struct Analyzer {
    documents: Vec<Document>,
    config: AnalysisConfig,
}

impl Analyzer {
    /// Creates an analyzer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfig`] when the configuration is
    /// out of range.
    pub fn with_config(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self {
            documents: Vec::new(),
            config,
        })
    }

    /// Registers a document.
    pub fn add_document(&mut self, document: Document) -> &mut Self {
        self.documents.push(document);
        self
    }

    /// Registers an in-memory text segment.
    pub fn add_text(&mut self, text: impl Into<String>, name: impl Into<String>) -> &mut Self {
        self.documents.push(Document::from_text(text, name));
        self
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn document_names(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.name.as_str()).collect()
    }

    /// Removes all registered documents.
    pub fn clear(&mut self) {
        self.documents.clear();
    }

    /// Coarse pairwise word-set comparison over all registered documents.
    ///
    /// # Errors
    ///
    /// Fails when fewer than two documents are registered.
    pub fn analyze(&self) -> Result<ComparisonOutcome, AnalysisError> {
        wordset::compare_all(&self.documents, &self.config)
    }

    /// Full universal analysis of exactly two registered documents.
    ///
    /// Runs the coarse comparison, picks the analysis strategy, classifies
    /// changes, and derives the summary.
    ///
    /// # Errors
    ///
    /// Fails unless exactly two documents are registered.
    pub fn universal_analyze(&self) -> Result<AnalysisReport, AnalysisError> {
        if self.documents.len() != 2 {
            return Err(AnalysisError::UniversalDocumentCount {
                count: self.documents.len(),
            });
        }

        let old = &self.documents[0];
        let new = &self.documents[1];
        let basic_analysis = wordset::compare(old, new, &self.config);

        let universal_analysis = if basic_analysis.similarity_percentage
            >= DETAILED_SIMILARITY_THRESHOLD
            && self.config.enable_line_analysis
        {
            debug!(
                similarity = basic_analysis.similarity_percentage,
                "running detailed line analysis"
            );
            detailed_line_analysis(&old.content, &new.content)
        } else {
            debug!(
                similarity = basic_analysis.similarity_percentage,
                "falling back to word-set analysis"
            );
            word_set_analysis(&old.content, &new.content, &self.config)
        };

        let summary = summarize(&universal_analysis);

        Ok(AnalysisReport {
            basic_analysis,
            universal_analysis,
            summary,
        })
    }
}

/// Detailed line-by-line analysis for near-identical documents.
///
/// The whole-document line alignment is the authoritative source of change
/// records; structural shifts are located separately from lines whose
/// trimmed content matches across versions at a displaced position.
pub fn detailed_line_analysis(old_content: &str, new_content: &str) -> UniversalAnalysis {
    let old_lines: Vec<&str> = old_content.split('\n').collect();
    let new_lines: Vec<&str> = new_content.split('\n').collect();

    let mut real_changes = Vec::new();
    collect_line_changes(&old_lines, &new_lines, &mut real_changes);

    let structural_changes = structural_shifts(&old_lines, &new_lines);
    let total_changes = real_changes.len() + structural_changes.len();

    UniversalAnalysis {
        real_changes,
        structural_changes,
        total_changes,
        analysis_method: AnalysisMethod::DetailedLineDiff,
    }
}

/// Coarse word-set fallback for dissimilar documents: one record for the
/// added word set, one for the removed word set.
pub fn word_set_analysis(
    old_content: &str,
    new_content: &str,
    config: &AnalysisConfig,
) -> UniversalAnalysis {
    let mut real_changes = Vec::new();

    let old_lower = old_content.to_lowercase();
    let new_lower = new_content.to_lowercase();
    let old_words: std::collections::HashSet<&str> = old_lower.split_whitespace().collect();
    let new_words: std::collections::HashSet<&str> = new_lower.split_whitespace().collect();

    if config.enable_word_analysis {
        let added: Vec<&str> = {
            let mut words: Vec<&str> = new_words.difference(&old_words).copied().collect();
            words.sort_unstable();
            words
        };
        let removed: Vec<&str> = {
            let mut words: Vec<&str> = old_words.difference(&new_words).copied().collect();
            words.sort_unstable();
            words
        };

        if !added.is_empty() {
            real_changes.push(ChangeRecord {
                kind: ChangeKind::WordsAdded,
                description: format!("Added {} new words", added.len()),
                old_content: String::new(),
                new_content: word_sample(&added),
                old_values: None,
                new_values: None,
                impact: Impact::Moderate,
                change_category: ChangeCategory::ContentAddition,
            });
        }

        if !removed.is_empty() {
            real_changes.push(ChangeRecord {
                kind: ChangeKind::WordsRemoved,
                description: format!("Removed {} words", removed.len()),
                old_content: word_sample(&removed),
                new_content: String::new(),
                old_values: None,
                new_values: None,
                impact: Impact::Moderate,
                change_category: ChangeCategory::ContentDeletion,
            });
        }
    }

    let total_changes = real_changes.len();
    UniversalAnalysis {
        real_changes,
        structural_changes: Vec::new(),
        total_changes,
        analysis_method: AnalysisMethod::BasicWordDiff,
    }
}

/// Block-level change extraction: segment both versions into structural
/// blocks, pair them greedily, then drill into modified pairs with the
/// line alignment. Kept pairs that changed position become structural
/// moves; unmatched blocks decompose into per-line additions/deletions.
pub fn block_level_changes(
    old_content: &str,
    new_content: &str,
    config: &AnalysisConfig,
) -> Vec<ChangeRecord> {
    let old_blocks = segment(&normalize_text(old_content));
    let new_blocks = segment(&normalize_text(new_content));
    let matches = match_blocks(&old_blocks, &new_blocks, config.block_match_threshold);
    let ops = diff_blocks(
        &old_blocks,
        &new_blocks,
        &matches,
        config.block_keep_threshold,
    );
    debug!(
        old_blocks = old_blocks.len(),
        new_blocks = new_blocks.len(),
        matched = matches.len(),
        "block matching complete"
    );

    let mut changes = Vec::new();
    for op in &ops {
        match op {
            BlockOp::Keep {
                old_index,
                new_index,
                content,
                ..
            } => {
                if old_index != new_index {
                    changes.push(ChangeRecord {
                        kind: ChangeKind::StructuralMove,
                        description: "Block moved to different position".to_string(),
                        old_content: content.clone(),
                        new_content: content.clone(),
                        old_values: None,
                        new_values: None,
                        impact: Impact::None,
                        change_category: ChangeCategory::Formatting,
                    });
                }
            }
            BlockOp::Modify {
                old_content,
                new_content,
                ..
            } => {
                let old_lines: Vec<&str> = old_content.split('\n').collect();
                let new_lines: Vec<&str> = new_content.split('\n').collect();
                collect_line_changes(&old_lines, &new_lines, &mut changes);
            }
            BlockOp::Delete { content, .. } => {
                for line in content.split('\n').filter(|l| !l.trim().is_empty()) {
                    changes.push(classify::line_deletion(line));
                }
            }
            BlockOp::Insert { content, .. } => {
                for line in content.split('\n').filter(|l| !l.trim().is_empty()) {
                    changes.push(classify::line_addition(line));
                }
            }
        }
    }

    changes
}

/// Walks the alignment opcodes of two line sequences and appends one
/// change record per non-blank changed line.
///
/// Equal runs are skipped. Inside a replace run the first `min(lenA,lenB)`
/// lines are paired positionally for classification; remaining lines of
/// the longer side are pure insertions or deletions.
fn collect_line_changes(old_lines: &[&str], new_lines: &[&str], changes: &mut Vec<ChangeRecord>) {
    for op in align(old_lines, new_lines) {
        match op.tag {
            OpTag::Equal => continue,
            OpTag::Insert => {
                for &line in &new_lines[op.new.clone()] {
                    if !line.trim().is_empty() {
                        changes.push(classify::line_addition(line));
                    }
                }
            }
            OpTag::Delete => {
                for &line in &old_lines[op.old.clone()] {
                    if !line.trim().is_empty() {
                        changes.push(classify::line_deletion(line));
                    }
                }
            }
            OpTag::Replace => {
                let common = op.old.len().min(op.new.len());

                for offset in 0..common {
                    let old_line = old_lines[op.old.start + offset];
                    let new_line = new_lines[op.new.start + offset];
                    if old_line.trim() != new_line.trim() {
                        let record = classify::classify_line_change(old_line, new_line)
                            .unwrap_or_else(|| classify::simple_modification(old_line, new_line));
                        changes.push(record);
                    }
                }

                for &line in &old_lines[op.old.start + common..op.old.end] {
                    if !line.trim().is_empty() {
                        changes.push(classify::line_deletion(line));
                    }
                }
                for &line in &new_lines[op.new.start + common..op.new.end] {
                    if !line.trim().is_empty() {
                        changes.push(classify::line_addition(line));
                    }
                }
            }
        }
    }
}

/// Locates lines whose trimmed content occurs in both versions at a
/// position displaced by more than one line.
fn structural_shifts(old_lines: &[&str], new_lines: &[&str]) -> Vec<StructuralShift> {
    let mut shifts = Vec::new();

    for (i, old_line) in old_lines.iter().enumerate() {
        let trimmed = old_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(j) = new_lines.iter().position(|l| l.trim() == trimmed) {
            if i.abs_diff(j) > 1 {
                shifts.push(StructuralShift::new(trimmed, i + 1, j + 1));
            }
        }
    }

    shifts
}

/// Derives the aggregate summary from an analysis.
fn summarize(analysis: &UniversalAnalysis) -> AnalysisSummary {
    let real = &analysis.real_changes;
    let structural = &analysis.structural_changes;

    let overall_assessment = if real.is_empty() && structural.is_empty() {
        "No significant changes detected"
    } else if real.len() <= 2 && structural.is_empty() {
        "Minor changes only"
    } else if real.len() > 10 {
        "Major content changes"
    } else {
        "Moderate changes detected"
    }
    .to_string();

    let change_impact = if real.iter().any(|c| c.impact == Impact::Major) {
        Impact::Major
    } else if real.iter().any(|c| c.impact == Impact::Moderate) {
        Impact::Moderate
    } else {
        Impact::Minor
    };

    let mut change_categories: Vec<ChangeCategory> = Vec::new();
    for change in real {
        if !change_categories.contains(&change.change_category) {
            change_categories.push(change.change_category);
        }
    }
    change_categories.sort_by_key(|c| c.as_str());

    AnalysisSummary {
        real_changes_count: real.len(),
        structural_changes_count: structural.len(),
        overall_assessment,
        change_impact,
        change_categories,
    }
}

fn word_sample(words: &[&str]) -> String {
    let mut sample = words
        .iter()
        .take(WORD_SAMPLE_LIMIT)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if words.len() > WORD_SAMPLE_LIMIT {
        sample.push_str("...");
    }
    sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_analyze_requires_two_documents() {
        let mut analyzer = Analyzer::new();
        analyzer.add_text("only one", "a");
        let err = analyzer.universal_analyze().unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::UniversalDocumentCount { count: 1 }
        ));

        analyzer.add_text("two", "b");
        analyzer.add_text("three", "c");
        let err = analyzer.universal_analyze().unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::UniversalDocumentCount { count: 3 }
        ));
    }

    #[test]
    fn test_identical_documents_produce_no_changes() {
        let text = "# Roadmap\n\n1. First milestone\n2. Second milestone";
        let mut analyzer = Analyzer::new();
        analyzer.add_text(text, "old");
        analyzer.add_text(text, "new");

        let report = analyzer.universal_analyze().unwrap();
        assert_eq!(report.basic_analysis.similarity_percentage, 100.0);
        assert_eq!(report.basic_analysis.difference_percentage, 0.0);
        assert!(report.universal_analysis.real_changes.is_empty());
        assert!(report.universal_analysis.structural_changes.is_empty());
        assert_eq!(
            report.universal_analysis.analysis_method,
            AnalysisMethod::DetailedLineDiff
        );
        assert_eq!(
            report.summary.overall_assessment,
            "No significant changes detected"
        );
    }

    #[test]
    fn test_dissimilar_documents_use_word_mode() {
        let mut analyzer = Analyzer::new();
        analyzer.add_text("Hello world", "old");
        analyzer.add_text("Completely different content", "new");

        let report = analyzer.universal_analyze().unwrap();
        assert!(report.basic_analysis.is_significantly_different);
        assert_eq!(
            report.universal_analysis.analysis_method,
            AnalysisMethod::BasicWordDiff
        );

        let kinds: Vec<ChangeKind> = report
            .universal_analysis
            .real_changes
            .iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(kinds, vec![ChangeKind::WordsAdded, ChangeKind::WordsRemoved]);
    }

    #[test]
    fn test_word_mode_descriptions_and_samples() {
        let analysis =
            word_set_analysis("alpha beta", "alpha gamma delta", &AnalysisConfig::default());
        let added = &analysis.real_changes[0];
        assert_eq!(added.kind, ChangeKind::WordsAdded);
        assert_eq!(added.description, "Added 2 new words");
        assert_eq!(added.new_content, "delta, gamma");
        assert_eq!(added.impact, Impact::Moderate);

        let removed = &analysis.real_changes[1];
        assert_eq!(removed.kind, ChangeKind::WordsRemoved);
        assert_eq!(removed.old_content, "beta");
    }

    #[test]
    fn test_word_mode_sample_truncation() {
        let old = "common";
        let new = "common a b c d e f g h i j k l";
        let analysis = word_set_analysis(old, new, &AnalysisConfig::default());
        let added = &analysis.real_changes[0];
        assert!(added.new_content.ends_with("..."));
        assert_eq!(added.description, "Added 12 new words");
    }

    #[test]
    fn test_detailed_single_line_addition() {
        let analysis = detailed_line_analysis("Line 1\nLine 2", "Line 1\nNew line\nLine 2");
        let kinds: Vec<ChangeKind> =
            analysis.real_changes.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ChangeKind::LineAddition]);
        assert_eq!(analysis.real_changes[0].new_content, "New line");
        assert_eq!(analysis.real_changes[0].description, "Line added: New line");
    }

    #[test]
    fn test_detailed_single_line_deletion() {
        let analysis = detailed_line_analysis("Line 1\nOld line\nLine 2", "Line 1\nLine 2");
        let kinds: Vec<ChangeKind> =
            analysis.real_changes.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ChangeKind::LineDeletion]);
    }

    #[test]
    fn test_detailed_replace_classifies_pairs() {
        let analysis = detailed_line_analysis(
            "Budget: 100 units\nOwner: alice@example.com",
            "Budget: 150 units\nOwner: bob@example.com",
        );
        let kinds: Vec<ChangeKind> =
            analysis.real_changes.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ChangeKind::NumericChange, ChangeKind::EmailChange]
        );
    }

    #[test]
    fn test_detailed_replace_with_uneven_lengths() {
        let analysis = detailed_line_analysis("alpha one\nbeta two", "gamma three");
        // One positional pair plus one leftover deletion
        let kinds: Vec<ChangeKind> =
            analysis.real_changes.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ChangeKind::ContentModification, ChangeKind::LineDeletion]
        );
    }

    #[test]
    fn test_detailed_skips_blank_lines() {
        let analysis = detailed_line_analysis("kept\n", "kept\n\n\n");
        assert!(analysis.real_changes.is_empty());
    }

    #[test]
    fn test_structural_shift_detection() {
        // "Closing line" moves from position 1 to position 4
        let analysis = detailed_line_analysis(
            "Closing line\nalpha\nbeta\ngamma",
            "alpha\nbeta\ngamma\nClosing line",
        );
        assert_eq!(analysis.structural_changes.len(), 1);
        let shift = &analysis.structural_changes[0];
        assert_eq!(shift.old_position, 1);
        assert_eq!(shift.new_position, 4);
        assert_eq!(shift.shift_distance, 3);
        assert_eq!(shift.impact, Impact::None);
        assert_eq!(shift.change_category, ChangeCategory::Formatting);
    }

    #[test]
    fn test_shift_of_one_position_is_ignored() {
        let analysis = detailed_line_analysis("Line 1\nLine 2", "Line 1\nNew line\nLine 2");
        // "Line 2" moved by exactly one position, below the threshold
        assert!(analysis.structural_changes.is_empty());
    }

    #[test]
    fn test_summary_minor_changes() {
        let analysis = detailed_line_analysis("Line 1\nLine 2", "Line 1\nNew line\nLine 2");
        let summary = summarize(&analysis);
        assert_eq!(summary.real_changes_count, 1);
        assert_eq!(summary.overall_assessment, "Minor changes only");
        assert_eq!(summary.change_impact, Impact::Minor);
        assert_eq!(
            summary.change_categories,
            vec![ChangeCategory::ContentAddition]
        );
    }

    #[test]
    fn test_summary_impact_dominance() {
        let analysis = detailed_line_analysis(
            "count 10\nprose line here\nmore\nfiller\ntext",
            "count 99\nprose line changed\nmore\nfiller\ntext",
        );
        let summary = summarize(&analysis);
        // 10 -> 99 is an 890% relative change
        assert_eq!(summary.change_impact, Impact::Major);
    }

    #[test]
    fn test_summary_major_content_changes_text() {
        let old: String = (0..12).map(|i| format!("item number {}\n", i)).collect();
        let new: String = (0..12).map(|i| format!("item number {} changed\n", i)).collect();
        let analysis = detailed_line_analysis(&old, &new);
        assert!(analysis.real_changes.len() > 10);
        let summary = summarize(&analysis);
        assert_eq!(summary.overall_assessment, "Major content changes");
    }

    #[test]
    fn test_block_level_changes_drills_into_modified_blocks() {
        let old = "# Plan\n\nShip the release by 3 Mar 2024\nKeep capacity at 100 nodes";
        let new = "# Plan\n\nShip the release by 3 Apr 2024\nKeep capacity at 100 nodes";
        let changes = block_level_changes(old, new, &AnalysisConfig::default());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::DateChange);
    }

    #[test]
    fn test_block_level_changes_unmatched_blocks() {
        let old = "alpha beta gamma delta";
        let new = "completely unrelated words here";
        let changes = block_level_changes(old, new, &AnalysisConfig::default());
        let kinds: Vec<ChangeKind> = changes.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ChangeKind::LineDeletion, ChangeKind::LineAddition]
        );
    }

    #[test]
    fn test_analyze_pairwise_matrix() {
        let mut analyzer = Analyzer::new();
        analyzer.add_text("a b c", "one");
        analyzer.add_text("a b d", "two");

        let outcome = analyzer.analyze().unwrap();
        assert_eq!(outcome.comparison_matrix.len(), 1);
        assert_eq!(outcome.documents.len(), 2);
    }

    #[test]
    fn test_analyze_requires_documents() {
        let analyzer = Analyzer::new();
        assert!(matches!(
            analyzer.analyze(),
            Err(AnalysisError::NotEnoughDocuments { count: 0 })
        ));
    }

    #[test]
    fn test_with_config_validates() {
        let config = AnalysisConfig {
            tolerance_percentage: 200.0,
            ..Default::default()
        };
        assert!(Analyzer::with_config(config).is_err());
    }

    #[test]
    fn test_clear_documents() {
        let mut analyzer = Analyzer::new();
        analyzer.add_text("a", "one").add_text("b", "two");
        assert_eq!(analyzer.document_count(), 2);
        assert_eq!(analyzer.document_names(), vec!["one", "two"]);
        analyzer.clear();
        assert_eq!(analyzer.document_count(), 0);
    }
}
