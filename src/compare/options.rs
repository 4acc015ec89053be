//! Comparison options.

use serde::{Deserialize, Serialize};

use crate::align::SIMILARITY_THRESHOLD;
use crate::annotate::MIN_BLOCK_CHARS;

/// How page annotations are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationStrategy {
    /// Mark blocks whose text equals a changed paragraph
    #[default]
    Paragraph,
    /// Diff the full texts and map edit ranges to span bboxes
    CharacterRange,
    /// Pair blocks directly and mark the unpaired ones
    BlockMatch,
}

/// Options controlling a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Minimum similarity (exclusive) for similarity-tier matches
    pub similarity_threshold: f64,

    /// Stitch paragraphs split across blocks or pages before aligning
    pub merge_paragraphs: bool,

    /// Annotation strategy
    pub annotation_strategy: AnnotationStrategy,

    /// Compute per-pair diffs on the rayon pool
    pub parallel_diff: bool,

    /// Minimum normalized length for block-match leftovers to be marked
    pub min_block_chars: usize,
}

impl CompareOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold, clamped to `[0, 1]`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Enable or disable the cross-page merge.
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge_paragraphs = merge;
        self
    }

    /// Set the annotation strategy.
    pub fn with_strategy(mut self, strategy: AnnotationStrategy) -> Self {
        self.annotation_strategy = strategy;
        self
    }

    /// Enable or disable parallel diffing.
    pub fn with_parallel_diff(mut self, parallel: bool) -> Self {
        self.parallel_diff = parallel;
        self
    }

    /// Set the minimum block length for block-match annotations.
    pub fn with_min_block_chars(mut self, min: usize) -> Self {
        self.min_block_chars = min;
        self
    }
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            similarity_threshold: SIMILARITY_THRESHOLD,
            merge_paragraphs: true,
            annotation_strategy: AnnotationStrategy::default(),
            parallel_diff: false,
            min_block_chars: MIN_BLOCK_CHARS,
        }
    }
}
