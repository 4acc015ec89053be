//! Per-pair diff computation.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::align::{MatchType, ParagraphMatch};
use crate::model::Paragraph;
use crate::text::normalize_text;

use super::{DiffKind, DiffOp, Differ};

/// An aligned paragraph pair with its edit script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    /// Paragraph from the left (original) document
    pub left: Option<Paragraph>,

    /// Paragraph from the right (revised) document
    pub right: Option<Paragraph>,

    /// Similarity of the two texts; 0 when a side is missing
    pub similarity: f64,

    /// Tier that produced the pair
    pub match_type: MatchType,

    /// Edit script from left text to right text
    pub diffs: Vec<DiffOp>,

    /// Whether the pair differs in anything beyond whitespace and punctuation
    pub has_diff: bool,
}

impl AlignedPair {
    /// Left text or the empty string.
    pub fn left_text(&self) -> &str {
        self.left.as_ref().map_or("", |p| p.text.as_str())
    }

    /// Right text or the empty string.
    pub fn right_text(&self) -> &str {
        self.right.as_ref().map_or("", |p| p.text.as_str())
    }

    /// Page index of the left side, if present.
    pub fn left_page(&self) -> Option<u32> {
        self.left.as_ref().map(|p| p.page_idx)
    }

    /// Page index of the right side, if present.
    pub fn right_page(&self) -> Option<u32> {
        self.right.as_ref().map(|p| p.page_idx)
    }
}

/// Compute the edit script for one aligned pair.
///
/// Pairs whose normalized texts match get a single equal operation over the
/// raw text (left preferred) and no diff. Otherwise the differ runs on the
/// raw texts, and the pair has a diff iff some non-equal operation still has
/// text after normalization.
pub fn diff_pair(pair: ParagraphMatch, differ: &dyn Differ) -> AlignedPair {
    let left = pair.left_text();
    let right = pair.right_text();

    let (diffs, has_diff) = if normalize_text(left) == normalize_text(right) {
        let raw = if left.is_empty() { right } else { left };
        (vec![DiffOp::equal(raw)], false)
    } else {
        let diffs = differ.diff(left, right);
        let has_diff = diffs
            .iter()
            .any(|op| !op.is_equal() && !normalize_text(&op.text).is_empty());
        (diffs, has_diff)
    };

    AlignedPair {
        left: pair.left,
        right: pair.right,
        similarity: pair.similarity,
        match_type: pair.match_type,
        diffs,
        has_diff,
    }
}

/// Compute edit scripts for every aligned pair, preserving order.
pub fn compute_paragraph_diffs(
    pairs: Vec<ParagraphMatch>,
    differ: &dyn Differ,
) -> Vec<AlignedPair> {
    pairs
        .into_iter()
        .map(|pair| diff_pair(pair, differ))
        .collect()
}

/// Parallel variant of [`compute_paragraph_diffs`]; same output, same order.
pub fn compute_paragraph_diffs_parallel(
    pairs: Vec<ParagraphMatch>,
    differ: &dyn Differ,
) -> Vec<AlignedPair> {
    pairs
        .into_par_iter()
        .map(|pair| diff_pair(pair, differ))
        .collect()
}

/// Insert/delete operation counts across a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Number of insert operations
    pub added: usize,

    /// Number of delete operations
    pub removed: usize,

    /// `added + removed`
    pub total: usize,

    /// Pairs flagged as having a real difference
    pub changed_pairs: usize,
}

impl DiffStats {
    /// Tally operations over a set of pairs.
    pub fn from_pairs(pairs: &[AlignedPair]) -> Self {
        let mut stats = Self::default();
        for pair in pairs {
            stats.add_pair(pair);
        }
        stats
    }

    /// Add one pair's operations.
    pub fn add_pair(&mut self, pair: &AlignedPair) {
        for op in &pair.diffs {
            match op.kind {
                DiffKind::Insert => self.added += 1,
                DiffKind::Delete => self.removed += 1,
                DiffKind::Equal => {}
            }
        }
        self.total = self.added + self.removed;
        if pair.has_diff {
            self.changed_pairs += 1;
        }
    }
}
