//! Greedy block matching and block-level edit operations.
//!
//! Blocks from the old version get first choice of blocks in the new
//! version, ranked by Jaccard word-set similarity. The greedy order
//! dependence (no backtracking) is a deliberate policy choice preserved
//! for output compatibility, not an optimal bipartite matching.

use crate::segment::{Block, BlockKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word pattern"));

/// Jaccard similarity of the case-folded word sets of two texts.
/// Either side being empty yields 0.0.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let words_a: HashSet<String> = WORD_RE
        .find_iter(&a.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect();
    let words_b: HashSet<String> = WORD_RE
        .find_iter(&b.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}

/// Greedily pairs blocks across the two versions.
///
/// For each old block in order, the best not-yet-matched new block is
/// chosen; the pairing is accepted only when its similarity reaches
/// `threshold`. Ties keep the first-encountered maximum. Each index is
/// used at most once per side.
pub fn match_blocks(old: &[Block], new: &[Block], threshold: f64) -> BTreeMap<usize, usize> {
    let mut matches = BTreeMap::new();
    let mut taken: HashSet<usize> = HashSet::new();

    for (i, old_block) in old.iter().enumerate() {
        let mut best_index = None;
        let mut best_similarity = 0.0;

        for (j, new_block) in new.iter().enumerate() {
            if taken.contains(&j) {
                continue;
            }
            let similarity = jaccard(&old_block.content, &new_block.content);
            if similarity > best_similarity && similarity >= threshold {
                best_similarity = similarity;
                best_index = Some(j);
            }
        }

        if let Some(j) = best_index {
            matches.insert(i, j);
            taken.insert(j);
        }
    }

    matches
}

/// Block-level edit operation derived from greedy matching.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockOp {
    /// Matched pair above the keep threshold; content carried unchanged
    Keep {
        old_index: usize,
        new_index: usize,
        content: String,
        score: f64,
    },
    /// Matched pair with content differences worth drilling into
    Modify {
        old_index: usize,
        new_index: usize,
        old_content: String,
        new_content: String,
        old_kind: BlockKind,
        new_kind: BlockKind,
        score: f64,
    },
    /// Old block with no acceptable counterpart
    Delete { index: usize, content: String },
    /// New block with no acceptable counterpart
    Insert { index: usize, content: String },
}

/// Turns a block matching into an ordered list of block operations.
///
/// Matched pairs at or above `keep_threshold` are kept; the rest become
/// modifications. Unmatched blocks on either side become pure deletions
/// and insertions.
pub fn diff_blocks(
    old: &[Block],
    new: &[Block],
    matches: &BTreeMap<usize, usize>,
    keep_threshold: f64,
) -> Vec<BlockOp> {
    let mut ops = Vec::new();
    let matched_new: HashSet<usize> = matches.values().copied().collect();

    for (&i, &j) in matches {
        let score = jaccard(&old[i].content, &new[j].content);
        if score >= keep_threshold {
            ops.push(BlockOp::Keep {
                old_index: i,
                new_index: j,
                content: old[i].content.clone(),
                score,
            });
        } else {
            ops.push(BlockOp::Modify {
                old_index: i,
                new_index: j,
                old_content: old[i].content.clone(),
                new_content: new[j].content.clone(),
                old_kind: old[i].kind,
                new_kind: new[j].kind,
                score,
            });
        }
    }

    for (i, block) in old.iter().enumerate() {
        if !matches.contains_key(&i) {
            ops.push(BlockOp::Delete {
                index: i,
                content: block.content.clone(),
            });
        }
    }

    for (j, block) in new.iter().enumerate() {
        if !matched_new.contains(&j) {
            ops.push(BlockOp::Insert {
                index: j,
                content: block.content.clone(),
            });
        }
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment;

    #[test]
    fn test_jaccard_identical() {
        assert_eq!(jaccard("alpha beta gamma", "alpha beta gamma"), 1.0);
    }

    #[test]
    fn test_jaccard_disjoint() {
        assert_eq!(jaccard("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn test_jaccard_case_folded() {
        assert_eq!(jaccard("Alpha BETA", "alpha beta"), 1.0);
    }

    #[test]
    fn test_jaccard_empty_side() {
        assert_eq!(jaccard("", "alpha"), 0.0);
        assert_eq!(jaccard("alpha", ""), 0.0);
        assert_eq!(jaccard("", ""), 0.0);
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        // {a, b, c} vs {b, c, d}: 2 shared of 4 total
        let sim = jaccard("a b c", "b c d");
        assert!((sim - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_match_blocks_pairs_best_candidate() {
        let old = segment("alpha beta gamma delta\n\none two three four");
        let new = segment("one two three four\n\nalpha beta gamma delta");
        let matches = match_blocks(&old, &new, 0.6);

        assert_eq!(matches.get(&0), Some(&1));
        assert_eq!(matches.get(&1), Some(&0));
    }

    #[test]
    fn test_match_blocks_respects_threshold() {
        let old = segment("alpha beta gamma delta");
        let new = segment("alpha epsilon zeta eta");
        // 1 shared word of 7: well below 0.6
        let matches = match_blocks(&old, &new, 0.6);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_match_blocks_each_index_used_once() {
        let old = segment("shared words here\n\nshared words here");
        let new = segment("shared words here");
        let matches = match_blocks(&old, &new, 0.6);

        // Two identical old blocks compete for one new block; only the
        // first (greedy) wins.
        assert_eq!(matches.len(), 1);
        assert_eq!(matches.get(&0), Some(&0));
    }

    #[test]
    fn test_diff_blocks_keep_modify_insert_delete() {
        let old = segment("alpha beta gamma delta\n\nremoved block content here");
        let new = segment("alpha beta gamma epsilon\n\nbrand new block content");
        let matches = match_blocks(&old, &new, 0.6);
        let ops = diff_blocks(&old, &new, &matches, 0.98);

        assert!(ops
            .iter()
            .any(|op| matches!(op, BlockOp::Modify { old_index: 0, new_index: 0, .. })));
        assert!(ops.iter().any(|op| matches!(op, BlockOp::Delete { index: 1, .. })));
        assert!(ops.iter().any(|op| matches!(op, BlockOp::Insert { index: 1, .. })));
    }

    #[test]
    fn test_diff_blocks_keep_at_threshold() {
        let old = segment("identical block text");
        let new = segment("identical block text");
        let matches = match_blocks(&old, &new, 0.6);
        let ops = diff_blocks(&old, &new, &matches, 0.98);

        assert_eq!(ops.len(), 1);
        assert!(matches!(ops[0], BlockOp::Keep { score, .. } if score == 1.0));
    }
}
