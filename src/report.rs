//! Closed result data model for universal analysis.
//!
//! The original comparison backend shipped loosely-shaped payloads; here
//! every record is a tagged struct with a closed field set so downstream
//! consumers get compile-time guarantees. Serialized field names and
//! nesting are part of the public contract and must not drift.

use crate::wordset::Comparison;
use serde::Serialize;

/// Semantic change type, the closed enumeration of record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    NumericChange,
    VersionChange,
    DateChange,
    UrlChange,
    EmailChange,
    LineAddition,
    LineDeletion,
    ContentModification,
    StructuralMove,
    WordsAdded,
    WordsRemoved,
    NumberingUpdate,
    ListItemChange,
}

/// Impact tier of a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    None,
    Minor,
    Moderate,
    Major,
}

impl Impact {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::None => "none",
            Impact::Minor => "minor",
            Impact::Moderate => "moderate",
            Impact::Major => "major",
        }
    }
}

/// Category tag used for the summary histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    DataModification,
    VersionUpdate,
    DateUpdate,
    UrlUpdate,
    ContactUpdate,
    ContentAddition,
    ContentDeletion,
    ContentModification,
    Content,
    Formatting,
}

impl ChangeCategory {
    /// Stable name used when sorting categories for the summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeCategory::DataModification => "data_modification",
            ChangeCategory::VersionUpdate => "version_update",
            ChangeCategory::DateUpdate => "date_update",
            ChangeCategory::UrlUpdate => "url_update",
            ChangeCategory::ContactUpdate => "contact_update",
            ChangeCategory::ContentAddition => "content_addition",
            ChangeCategory::ContentDeletion => "content_deletion",
            ChangeCategory::ContentModification => "content_modification",
            ChangeCategory::Content => "content",
            ChangeCategory::Formatting => "formatting",
        }
    }
}

/// One classified content change.
///
/// Immutable: produced once per detected change, never merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRecord {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub description: String,
    pub old_content: String,
    pub new_content: String,
    /// Extracted pattern matches on the old side, for pattern-typed changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_values: Option<Vec<String>>,
    /// Extracted pattern matches on the new side, for pattern-typed changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_values: Option<Vec<String>>,
    pub impact: Impact,
    pub change_category: ChangeCategory,
}

/// Position-only relocation of a line, with no content delta.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralShift {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: String,
    pub content: String,
    /// 1-based position in the old document
    pub old_position: usize,
    /// 1-based position in the new document
    pub new_position: usize,
    pub shift_distance: usize,
    /// Always [`Impact::None`]
    pub impact: Impact,
    /// Always [`ChangeCategory::Formatting`]
    pub change_category: ChangeCategory,
}

impl StructuralShift {
    pub fn new(content: &str, old_position: usize, new_position: usize) -> Self {
        Self {
            kind: "structural_shift",
            description: format!(
                "Line shifted from position {} to {} due to insertions/deletions",
                old_position, new_position
            ),
            content: content.to_string(),
            old_position,
            new_position,
            shift_distance: old_position.abs_diff(new_position),
            impact: Impact::None,
            change_category: ChangeCategory::Formatting,
        }
    }
}

/// Strategy the orchestrator chose for the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMethod {
    DetailedLineDiff,
    BasicWordDiff,
}

/// Fine-grained analysis output.
#[derive(Debug, Clone, Serialize)]
pub struct UniversalAnalysis {
    pub real_changes: Vec<ChangeRecord>,
    pub structural_changes: Vec<StructuralShift>,
    pub total_changes: usize,
    pub analysis_method: AnalysisMethod,
}

/// Aggregate summary derived from an analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub real_changes_count: usize,
    pub structural_changes_count: usize,
    pub overall_assessment: String,
    pub change_impact: Impact,
    pub change_categories: Vec<ChangeCategory>,
}

/// Complete analysis result for one document pair.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub basic_analysis: Comparison,
    pub universal_analysis: UniversalAnalysis,
    pub summary: AnalysisSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_kind_serialization() {
        let json = serde_json::to_string(&ChangeKind::NumericChange).unwrap();
        assert_eq!(json, "\"numeric_change\"");
        let json = serde_json::to_string(&ChangeKind::ListItemChange).unwrap();
        assert_eq!(json, "\"list_item_change\"");
    }

    #[test]
    fn test_impact_ordering() {
        assert!(Impact::None < Impact::Minor);
        assert!(Impact::Minor < Impact::Moderate);
        assert!(Impact::Moderate < Impact::Major);
    }

    #[test]
    fn test_impact_serialization() {
        assert_eq!(serde_json::to_string(&Impact::None).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&Impact::Major).unwrap(), "\"major\"");
    }

    #[test]
    fn test_structural_shift_fixed_fields() {
        let shift = StructuralShift::new("Line 2", 2, 5);
        assert_eq!(shift.shift_distance, 3);
        assert_eq!(shift.impact, Impact::None);
        assert_eq!(shift.change_category, ChangeCategory::Formatting);
        assert!(shift.description.contains("position 2 to 5"));
    }

    #[test]
    fn test_change_record_omits_absent_values() {
        let record = ChangeRecord {
            kind: ChangeKind::LineAddition,
            description: "Line added: x".to_string(),
            old_content: String::new(),
            new_content: "x".to_string(),
            old_values: None,
            new_values: None,
            impact: Impact::Minor,
            change_category: ChangeCategory::ContentAddition,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"line_addition\""));
        assert!(!json.contains("old_values"));
    }

    #[test]
    fn test_category_sort_key() {
        let mut cats = vec![
            ChangeCategory::Formatting,
            ChangeCategory::Content,
            ChangeCategory::DataModification,
        ];
        cats.sort_by_key(|c| c.as_str());
        assert_eq!(
            cats,
            vec![
                ChangeCategory::Content,
                ChangeCategory::DataModification,
                ChangeCategory::Formatting,
            ]
        );
    }
}
