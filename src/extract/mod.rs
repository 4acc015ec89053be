//! Paragraph extraction and cross-page merging.

mod merge;
mod paragraphs;

pub use merge::{merge_paragraphs, should_merge};
pub use paragraphs::extract_paragraphs;

use crate::model::{Document, Paragraph};

/// Extract paragraphs and run the cross-page merge.
pub fn extract_merged_paragraphs(doc: &Document) -> Vec<Paragraph> {
    merge_paragraphs(extract_paragraphs(doc))
}
