//! Paragraph extraction from the document model.

use crate::model::{BBox, Block, BlockBody, Document, Paragraph};

/// Walk a document in reading order and emit one paragraph per text-bearing
/// leaf block.
///
/// Container blocks are descended recursively; a child without its own bbox
/// or type inherits the parent's. Text is trimmed, and blocks whose text is
/// empty after trimming produce nothing.
pub fn extract_paragraphs(doc: &Document) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    for page in &doc.pages {
        for block in &page.blocks {
            collect_block(block, page.page_idx, None, None, &mut paragraphs);
        }
    }
    paragraphs
}

fn collect_block(
    block: &Block,
    page_idx: u32,
    parent_kind: Option<&str>,
    parent_bbox: Option<BBox>,
    out: &mut Vec<Paragraph>,
) {
    let kind = match (block.kind.as_str(), parent_kind) {
        ("", Some(parent)) => parent,
        (own, _) => own,
    };
    let bbox = block.bbox.or(parent_bbox);

    match &block.body {
        BlockBody::Container { children } => {
            for child in children {
                collect_block(child, page_idx, Some(kind), bbox, out);
            }
        }
        BlockBody::Leaf { .. } => {
            let text = block.own_text();
            let text = text.trim();
            if text.is_empty() {
                return;
            }
            out.push(Paragraph {
                text: text.to_string(),
                kind: kind.to_string(),
                page_idx,
                bbox,
            });
        }
    }
}
