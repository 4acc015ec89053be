//! Text blocks with a known position.

use crate::model::{BBox, Block, BlockBody, Document, PageSize};

/// A text-bearing leaf block that can be highlighted.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedBlock {
    /// Trimmed block text
    pub text: String,
    /// Own bbox, or the nearest ancestor's
    pub bbox: BBox,
    /// Page index
    pub page_idx: u32,
    /// Page size
    pub page_size: PageSize,
}

/// Collect located blocks in extraction order.
///
/// Blocks with no bbox of their own or inherited, or with empty trimmed
/// text, are left out.
pub fn located_blocks(doc: &Document) -> Vec<LocatedBlock> {
    let mut out = Vec::new();
    for page in &doc.pages {
        for block in &page.blocks {
            collect(block, page.page_idx, page.page_size, None, &mut out);
        }
    }
    out
}

fn collect(
    block: &Block,
    page_idx: u32,
    page_size: PageSize,
    parent_bbox: Option<BBox>,
    out: &mut Vec<LocatedBlock>,
) {
    let bbox = block.bbox.or(parent_bbox);
    if let BlockBody::Container { children } = &block.body {
        for child in children {
            collect(child, page_idx, page_size, bbox, out);
        }
        return;
    }

    let Some(bbox) = bbox else {
        log::debug!("Skipping block without bbox on page {}", page_idx);
        return;
    };
    let text = block.own_text();
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    out.push(LocatedBlock {
        text: text.to_string(),
        bbox,
        page_idx,
        page_size,
    });
}
