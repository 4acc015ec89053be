//! Cross-page paragraph reconstruction.

use crate::model::Paragraph;
use crate::text::{ends_with_sentence_terminator, starts_with_section_number};

/// Whether `next` continues `prev`: `prev` is not sentence-terminated and
/// `next` does not open a new numbered section.
pub fn should_merge(prev: &Paragraph, next: &Paragraph) -> bool {
    !ends_with_sentence_terminator(&prev.text) && !starts_with_section_number(&next.text)
}

/// Stitch paragraph fragments split across page breaks (or mid-page) back
/// together.
///
/// Single greedy left-to-right pass: a merged paragraph is re-tested against
/// the following one, so chains of fragments collapse into one. The merged
/// paragraph keeps the first fragment's page index, type and bbox.
pub fn merge_paragraphs(paragraphs: Vec<Paragraph>) -> Vec<Paragraph> {
    let before = paragraphs.len();
    let mut merged: Vec<Paragraph> = Vec::with_capacity(before);

    for paragraph in paragraphs {
        if let Some(prev) = merged.last_mut() {
            if should_merge(prev, &paragraph) {
                prev.absorb(&paragraph);
                continue;
            }
        }
        merged.push(paragraph);
    }

    log::debug!("Paragraph merge: {} -> {} paragraphs", before, merged.len());
    merged
}
