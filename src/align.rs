//! Sequence alignment engine.
//!
//! Computes a minimal edit script between two ordered sequences using a
//! longest-common-subsequence alignment. The resulting opcodes cover every
//! index of both sequences exactly once, in order, with the tags equal,
//! insert, delete, and replace.
//!
//! # Examples
//!
//! ```
//! use revdiff::align::{align, OpTag};
//!
//! let old = ["a", "b", "c"];
//! let new = ["a", "x", "c"];
//! let ops = align(&old, &new);
//!
//! let tags: Vec<OpTag> = ops.iter().map(|op| op.tag).collect();
//! assert_eq!(tags, vec![OpTag::Equal, OpTag::Replace, OpTag::Equal]);
//! ```

use std::ops::Range;

/// Alignment operation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    Equal,
    Insert,
    Delete,
    Replace,
}

/// One run of the edit script, spanning half-open index ranges in the old
/// and new sequences.
///
/// For `Equal` and `Replace` both ranges are non-empty; for `Insert` the
/// old range is empty, for `Delete` the new range is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOp {
    pub tag: OpTag,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

impl EditOp {
    fn new(tag: OpTag, old: Range<usize>, new: Range<usize>) -> Self {
        Self { tag, old, new }
    }
}

/// Aligns two sequences and returns the edit script covering all indices
/// of both exactly once.
pub fn align<T: PartialEq>(old: &[T], new: &[T]) -> Vec<EditOp> {
    let pairs = lcs_pairs(old, new);

    let mut ops = Vec::new();
    let mut i = 0;
    let mut j = 0;
    let mut k = 0;

    while k < pairs.len() {
        let (mi, mj) = pairs[k];
        push_gap(&mut ops, i, mi, j, mj);

        // Extend the run of consecutive matches into a single equal op
        let mut run = 1;
        while k + run < pairs.len() && pairs[k + run] == (mi + run, mj + run) {
            run += 1;
        }
        ops.push(EditOp::new(OpTag::Equal, mi..mi + run, mj..mj + run));

        i = mi + run;
        j = mj + run;
        k += run;
    }

    push_gap(&mut ops, i, old.len(), j, new.len());
    ops
}

fn push_gap(ops: &mut Vec<EditOp>, old_start: usize, old_end: usize, new_start: usize, new_end: usize) {
    if old_start < old_end && new_start < new_end {
        ops.push(EditOp::new(
            OpTag::Replace,
            old_start..old_end,
            new_start..new_end,
        ));
    } else if old_start < old_end {
        ops.push(EditOp::new(
            OpTag::Delete,
            old_start..old_end,
            new_start..new_end,
        ));
    } else if new_start < new_end {
        ops.push(EditOp::new(
            OpTag::Insert,
            old_start..old_end,
            new_start..new_end,
        ));
    }
}

/// Matched index pairs of a longest common subsequence, in ascending order.
fn lcs_pairs<T: PartialEq>(old: &[T], new: &[T]) -> Vec<(usize, usize)> {
    let n = old.len();
    let m = new.len();
    if n == 0 || m == 0 {
        return Vec::new();
    }

    // dp[i][j] = LCS length of old[i..] vs new[j..], rolled into one
    // (n+1)*(m+1) table indexed forward
    let mut dp = vec![0u32; (n + 1) * (m + 1)];
    let idx = |i: usize, j: usize| i * (m + 1) + j;

    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[idx(i, j)] = if old[i] == new[j] {
                dp[idx(i + 1, j + 1)] + 1
            } else {
                dp[idx(i + 1, j)].max(dp[idx(i, j + 1)])
            };
        }
    }

    let mut pairs = Vec::with_capacity(dp[0] as usize);
    let mut i = 0;
    let mut j = 0;
    while i < n && j < m {
        if old[i] == new[j] && dp[idx(i, j)] == dp[idx(i + 1, j + 1)] + 1 {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if dp[idx(i + 1, j)] >= dp[idx(i, j + 1)] {
            i += 1;
        } else {
            j += 1;
        }
    }

    pairs
}
