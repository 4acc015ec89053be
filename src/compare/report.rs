//! Comparison output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::annotate::{AnnotationMap, SideAnnotations};
use crate::diff::{AlignedPair, DiffStats};

use super::AnnotationStrategy;

/// Everything a comparison run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareReport {
    /// Aligned pairs in display order
    pub pairs: Vec<AlignedPair>,

    /// Insert/delete counts
    pub stats: DiffStats,

    /// Strategy that produced the annotations
    pub annotation_strategy: AnnotationStrategy,

    /// Removed regions on the left document, by page
    pub left_annotations: AnnotationMap,

    /// Added regions on the right document, by page
    pub right_annotations: AnnotationMap,

    /// Paragraph count of the left document after merging
    pub left_paragraphs: usize,

    /// Paragraph count of the right document after merging
    pub right_paragraphs: usize,

    /// When the comparison ran
    pub compared_at: DateTime<Utc>,
}

impl CompareReport {
    pub(crate) fn new(
        pairs: Vec<AlignedPair>,
        annotations: SideAnnotations,
        annotation_strategy: AnnotationStrategy,
        left_paragraphs: usize,
        right_paragraphs: usize,
    ) -> Self {
        Self {
            stats: DiffStats::from_pairs(&pairs),
            pairs,
            annotation_strategy,
            left_annotations: annotations.left,
            right_annotations: annotations.right,
            left_paragraphs,
            right_paragraphs,
            compared_at: Utc::now(),
        }
    }

    /// Pairs that carry a real difference.
    pub fn changed_pairs(&self) -> impl Iterator<Item = &AlignedPair> {
        self.pairs.iter().filter(|p| p.has_diff)
    }

    /// Check if the two documents are equivalent after normalization.
    pub fn is_identical(&self) -> bool {
        self.stats.changed_pairs == 0
    }
}
