//! Block-level matching annotation.
//!
//! Works directly on located blocks rather than aligned paragraphs: blocks
//! are paired by section number, then by exact normalized text, then by best
//! similarity. Whatever stays unpaired is highlighted.

use crate::align::SIMILARITY_THRESHOLD;
use crate::model::Document;
use crate::text::{normalize_text, section_key, similarity_of_normalized};

use super::blocks::{located_blocks, LocatedBlock};
use super::{Annotation, AnnotationKind, AnnotationMap, SideAnnotations};

/// Default minimum normalized length for an unmatched block to be marked.
pub const MIN_BLOCK_CHARS: usize = 3;

/// Pairs located blocks across two documents and marks the leftovers.
#[derive(Debug, Clone)]
pub struct BlockMatcher {
    threshold: f64,
    min_block_chars: usize,
}

impl BlockMatcher {
    /// Create a matcher with default settings.
    pub fn new() -> Self {
        Self {
            threshold: SIMILARITY_THRESHOLD,
            min_block_chars: MIN_BLOCK_CHARS,
        }
    }

    /// Set the similarity threshold (exclusive).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the minimum normalized length for unmatched blocks.
    pub fn with_min_block_chars(mut self, min: usize) -> Self {
        self.min_block_chars = min;
        self
    }

    /// Match blocks and annotate the unmatched ones.
    pub fn annotate(&self, left_doc: &Document, right_doc: &Document) -> SideAnnotations {
        let left = located_blocks(left_doc);
        let right = located_blocks(right_doc);
        let left_norm: Vec<String> = left.iter().map(|b| normalize_text(&b.text)).collect();
        let right_norm: Vec<String> = right.iter().map(|b| normalize_text(&b.text)).collect();

        let mut left_matched = vec![false; left.len()];
        let mut right_matched = vec![false; right.len()];

        // Section numbers
        let right_keys: Vec<Option<String>> = right.iter().map(|b| section_key(&b.text)).collect();
        for (i, block) in left.iter().enumerate() {
            let Some(key) = section_key(&block.text) else {
                continue;
            };
            if let Some(j) = (0..right.len())
                .find(|&j| !right_matched[j] && right_keys[j].as_deref() == Some(key.as_str()))
            {
                left_matched[i] = true;
                right_matched[j] = true;
            }
        }

        // Exact normalized text
        for i in 0..left.len() {
            if left_matched[i] {
                continue;
            }
            if let Some(j) =
                (0..right.len()).find(|&j| !right_matched[j] && right_norm[j] == left_norm[i])
            {
                left_matched[i] = true;
                right_matched[j] = true;
            }
        }

        // Best similarity
        for i in 0..left.len() {
            if left_matched[i] {
                continue;
            }
            let mut best = None;
            let mut best_score = self.threshold;
            for j in (0..right.len()).filter(|&j| !right_matched[j]) {
                let score = similarity_of_normalized(&left_norm[i], &right_norm[j]);
                if score > best_score {
                    best_score = score;
                    best = Some(j);
                }
            }
            if let Some(j) = best {
                left_matched[i] = true;
                right_matched[j] = true;
            }
        }

        let mut out = SideAnnotations::new();
        self.mark_unmatched(
            &mut out.left,
            &left,
            &left_norm,
            &left_matched,
            AnnotationKind::Removed,
        );
        self.mark_unmatched(
            &mut out.right,
            &right,
            &right_norm,
            &right_matched,
            AnnotationKind::Added,
        );
        log::debug!(
            "Block-match annotations: {} removed, {} added",
            out.left.total(),
            out.right.total()
        );
        out
    }

    fn mark_unmatched(
        &self,
        map: &mut AnnotationMap,
        blocks: &[LocatedBlock],
        norm: &[String],
        matched: &[bool],
        kind: AnnotationKind,
    ) {
        for ((block, key), _) in blocks
            .iter()
            .zip(norm)
            .zip(matched)
            .filter(|(_, m)| !**m)
        {
            if key.chars().count() < self.min_block_chars {
                continue;
            }
            map.push(Annotation::new(
                kind,
                block.bbox,
                block.page_idx,
                block.page_size,
                block.text.as_str(),
            ));
        }
    }
}

impl Default for BlockMatcher {
    fn default() -> Self {
        Self::new()
    }
}
