//! Change classification for aligned line pairs.
//!
//! Given the old and new version of one line, runs the pattern library in
//! priority order to decide the most specific change type, then falls back
//! to structural checks (renumbering, list items) and finally to a generic
//! content modification. Classification is total: every non-blank pair
//! yields some record, one way or another.
//!
//! # Examples
//!
//! ```
//! use revdiff::classify::classify_line_change;
//! use revdiff::report::ChangeKind;
//!
//! let change = classify_line_change("Budget: 100 units", "Budget: 150 units").unwrap();
//! assert_eq!(change.kind, ChangeKind::NumericChange);
//! ```

use crate::patterns::{self, PatternKind};
use crate::report::{ChangeCategory, ChangeKind, ChangeRecord, Impact};

/// Maximum trimmed line length considered for pattern classification.
/// Longer prose lines produce too many false positives.
const MAX_CLASSIFIABLE_LEN: usize = 200;

/// Classifies one changed line pair.
///
/// Returns `None` when either trimmed side is empty or exceeds the length
/// cutoff; callers fall back to [`simple_modification`] in that case.
/// Otherwise a record is always produced: a pattern-typed change, a
/// renumbering/list-item change, or the generic content modification.
pub fn classify_line_change(old_line: &str, new_line: &str) -> Option<ChangeRecord> {
    let old = old_line.trim();
    let new = new_line.trim();

    if old.is_empty() || new.is_empty() {
        return None;
    }
    if old.chars().count() > MAX_CLASSIFIABLE_LEN || new.chars().count() > MAX_CLASSIFIABLE_LEN {
        return None;
    }

    if let Some(change) = detect_pattern_change(old, new) {
        return Some(change);
    }

    Some(general_change(old, new))
}

/// Runs the recognizers in priority order; the first whose extracted
/// matches are present on both sides and differ wins.
fn detect_pattern_change(old_line: &str, new_line: &str) -> Option<ChangeRecord> {
    for recognizer in patterns::recognizers() {
        let old_values = recognizer.extract(old_line);
        let new_values = recognizer.extract(new_line);

        if !old_values.is_empty() && !new_values.is_empty() && old_values != new_values {
            return Some(pattern_change(
                recognizer.kind(),
                old_line,
                new_line,
                old_values,
                new_values,
            ));
        }
    }
    None
}

fn pattern_change(
    kind: PatternKind,
    old_line: &str,
    new_line: &str,
    old_values: Vec<String>,
    new_values: Vec<String>,
) -> ChangeRecord {
    let old_joined = old_values.join(", ");
    let new_joined = new_values.join(", ");

    let (change_kind, description, impact, category) = match kind {
        PatternKind::Numeric => (
            ChangeKind::NumericChange,
            format!("Numeric value changed from {} to {}", old_joined, new_joined),
            assess_numeric_impact(&old_values, &new_values),
            ChangeCategory::DataModification,
        ),
        PatternKind::Version => (
            ChangeKind::VersionChange,
            format!("Version changed from {} to {}", old_joined, new_joined),
            assess_version_impact(&old_values, &new_values),
            ChangeCategory::VersionUpdate,
        ),
        PatternKind::Date => (
            ChangeKind::DateChange,
            format!("Date changed from {} to {}", old_joined, new_joined),
            Impact::Minor,
            ChangeCategory::DateUpdate,
        ),
        PatternKind::Url => (
            ChangeKind::UrlChange,
            format!("URL changed from {} to {}", old_joined, new_joined),
            Impact::Moderate,
            ChangeCategory::UrlUpdate,
        ),
        PatternKind::Email => (
            ChangeKind::EmailChange,
            format!("Email changed from {} to {}", old_joined, new_joined),
            Impact::Moderate,
            ChangeCategory::ContactUpdate,
        ),
    };

    ChangeRecord {
        kind: change_kind,
        description,
        old_content: old_line.to_string(),
        new_content: new_line.to_string(),
        old_values: Some(old_values),
        new_values: Some(new_values),
        impact,
        change_category: category,
    }
}

/// Structural fallbacks when no pattern fires: pure renumbering carries no
/// content impact, bullet rewording is minor, anything else is a generic
/// modification.
fn general_change(old_line: &str, new_line: &str) -> ChangeRecord {
    if patterns::is_numbered_item(old_line) && patterns::is_numbered_item(new_line) {
        let old_num = patterns::leading_number(old_line);
        let new_num = patterns::leading_number(new_line);
        if old_num != new_num {
            if let (Some(old_num), Some(new_num)) = (old_num, new_num) {
                return ChangeRecord {
                    kind: ChangeKind::NumberingUpdate,
                    description: format!("Numbering changed from {} to {}", old_num, new_num),
                    old_content: old_line.to_string(),
                    new_content: new_line.to_string(),
                    old_values: None,
                    new_values: None,
                    impact: Impact::None,
                    change_category: ChangeCategory::Formatting,
                };
            }
        }
    }

    if patterns::is_bullet_item(old_line) && patterns::is_bullet_item(new_line) {
        return ChangeRecord {
            kind: ChangeKind::ListItemChange,
            description: "List item changed".to_string(),
            old_content: old_line.to_string(),
            new_content: new_line.to_string(),
            old_values: None,
            new_values: None,
            impact: Impact::Minor,
            change_category: ChangeCategory::Content,
        };
    }

    ChangeRecord {
        kind: ChangeKind::ContentModification,
        description: "Line content modified".to_string(),
        old_content: old_line.to_string(),
        new_content: new_line.to_string(),
        old_values: None,
        new_values: None,
        impact: Impact::Moderate,
        change_category: ChangeCategory::Content,
    }
}

/// Generic modification record for pairs the classifier declines
/// (blank or over-long lines).
pub fn simple_modification(old_line: &str, new_line: &str) -> ChangeRecord {
    ChangeRecord {
        kind: ChangeKind::ContentModification,
        description: format!(
            "Content changed from '{}' to '{}'",
            old_line.trim(),
            new_line.trim()
        ),
        old_content: old_line.to_string(),
        new_content: new_line.to_string(),
        old_values: None,
        new_values: None,
        impact: Impact::Moderate,
        change_category: ChangeCategory::ContentModification,
    }
}

pub fn line_addition(new_line: &str) -> ChangeRecord {
    ChangeRecord {
        kind: ChangeKind::LineAddition,
        description: format!("Line added: {}", new_line.trim()),
        old_content: String::new(),
        new_content: new_line.to_string(),
        old_values: None,
        new_values: None,
        impact: Impact::Minor,
        change_category: ChangeCategory::ContentAddition,
    }
}

pub fn line_deletion(old_line: &str) -> ChangeRecord {
    ChangeRecord {
        kind: ChangeKind::LineDeletion,
        description: format!("Line removed: {}", old_line.trim()),
        old_content: old_line.to_string(),
        new_content: String::new(),
        old_values: None,
        new_values: None,
        impact: Impact::Minor,
        change_category: ChangeCategory::ContentDeletion,
    }
}

/// Maximum relative change over positionally paired values decides the
/// tier: strictly above 100% is major, strictly above 10% is moderate,
/// otherwise minor. Unparseable values, length mismatches, and zero old
/// values fall back to moderate.
pub fn assess_numeric_impact(old_values: &[String], new_values: &[String]) -> Impact {
    if old_values.len() != new_values.len() {
        return Impact::Moderate;
    }

    let mut max_change = 0.0f64;
    for (old, new) in old_values.iter().zip(new_values) {
        let (old, new) = match (old.parse::<f64>(), new.parse::<f64>()) {
            (Ok(old), Ok(new)) => (old, new),
            _ => return Impact::Moderate,
        };
        if old == 0.0 {
            return Impact::Moderate;
        }
        max_change = max_change.max(((new - old) / old).abs());
    }

    if max_change > 1.0 {
        Impact::Major
    } else if max_change > 0.1 {
        Impact::Moderate
    } else {
        Impact::Minor
    }
}

/// Major-component increase is major, minor-component increase is
/// moderate, anything else is minor.
pub fn assess_version_impact(old_values: &[String], new_values: &[String]) -> Impact {
    for (old, new) in old_values.iter().zip(new_values) {
        let old_parts = version_components(old);
        let new_parts = version_components(new);

        if let (Some(&old_major), Some(&new_major)) = (old_parts.first(), new_parts.first()) {
            if new_major > old_major {
                return Impact::Major;
            }
            if let (Some(&old_minor), Some(&new_minor)) = (old_parts.get(1), new_parts.get(1)) {
                if new_minor > old_minor {
                    return Impact::Moderate;
                }
            }
        }
    }
    Impact::Minor
}

/// Numeric dotted components of a version token, prefix stripped.
/// Non-numeric groups count as zero, matching the lenient source behavior.
fn version_components(value: &str) -> Vec<u64> {
    let lower = value.to_lowercase();
    let stripped = ["version", "revision", "rev", "v"]
        .iter()
        .find_map(|prefix| lower.strip_prefix(prefix))
        .unwrap_or(&lower)
        .trim();

    stripped
        .split('.')
        .map(|part| part.parse().unwrap_or(0))
        .collect()
}
