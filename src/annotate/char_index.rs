//! Global character-offset index over a document.
//!
//! Offsets are counted in Unicode scalar values and run across the whole
//! document without resetting per page. Blocks are visited in the same order
//! as paragraph extraction.

use serde::{Deserialize, Serialize};

use crate::model::{BBox, Block, BlockBody, Document, PageSize};

/// A span's slice of the global offset range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedSpan {
    /// First character offset (inclusive)
    pub char_start: usize,
    /// Last character offset (exclusive)
    pub char_end: usize,
    /// Span bbox
    pub bbox: BBox,
    /// Span text
    pub text: String,
}

/// One text-bearing block and its offset range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// First character offset (inclusive)
    pub char_start: usize,
    /// Last character offset (exclusive)
    pub char_end: usize,
    /// Block bbox, or the nearest ancestor's
    pub bbox: Option<BBox>,
    /// Page the block sits on
    pub page_idx: u32,
    /// Size of that page
    pub page_size: PageSize,
    /// Concatenated span text, untrimmed
    pub text: String,
    /// Spans that carry a bbox
    pub spans: Vec<IndexedSpan>,
}

/// A located region returned by a range lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct BBoxHit {
    /// Region in page units
    pub bbox: BBox,
    /// Page index
    pub page_idx: u32,
    /// Page size
    pub page_size: PageSize,
    /// Text of the span or block that was hit
    pub text: String,
}

/// Character index of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterIndex {
    entries: Vec<IndexEntry>,
    total_chars: usize,
}

impl CharacterIndex {
    /// Build the index for a document.
    ///
    /// Every non-empty span contributes text. Spans without a bbox advance
    /// the offset but cannot be hit by a lookup. Blocks with no text get no
    /// entry.
    pub fn build(doc: &Document) -> Self {
        let mut index = Self::default();
        for page in &doc.pages {
            for block in &page.blocks {
                index.add_block(block, page.page_idx, page.page_size, None);
            }
        }
        log::debug!(
            "Built character index: {} blocks, {} chars",
            index.entries.len(),
            index.total_chars
        );
        index
    }

    fn add_block(
        &mut self,
        block: &Block,
        page_idx: u32,
        page_size: PageSize,
        parent_bbox: Option<BBox>,
    ) {
        let bbox = block.bbox.or(parent_bbox);
        let lines = match &block.body {
            BlockBody::Container { children } => {
                for child in children {
                    self.add_block(child, page_idx, page_size, bbox);
                }
                return;
            }
            BlockBody::Leaf { lines } => lines,
        };

        let start = self.total_chars;
        let mut offset = start;
        let mut text = String::new();
        let mut spans = Vec::new();

        for span in lines.iter().flat_map(|line| &line.spans) {
            if span.content.is_empty() {
                continue;
            }
            let len = span.char_len();
            if let Some(span_bbox) = span.bbox {
                spans.push(IndexedSpan {
                    char_start: offset,
                    char_end: offset + len,
                    bbox: span_bbox,
                    text: span.content.clone(),
                });
            }
            text.push_str(&span.content);
            offset += len;
        }

        if text.is_empty() {
            return;
        }
        self.entries.push(IndexEntry {
            char_start: start,
            char_end: offset,
            bbox,
            page_idx,
            page_size,
            text,
            spans,
        });
        self.total_chars = offset;
    }

    /// Indexed blocks in traversal order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Total number of indexed characters.
    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    /// The full indexed text: every entry's text concatenated.
    pub fn text(&self) -> String {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }

    /// Find the regions covering `[start, end)`.
    ///
    /// For each overlapping block, every overlapping span with a bbox is a
    /// hit. A block with no such span falls back to its own bbox, if any.
    pub fn find_bbox_for_range(&self, start: usize, end: usize) -> Vec<BBoxHit> {
        let mut hits = Vec::new();
        if start >= end {
            return hits;
        }

        // Entries are contiguous and ordered by offset
        let first = self.entries.partition_point(|e| e.char_end <= start);
        for entry in self.entries[first..]
            .iter()
            .take_while(|e| e.char_start < end)
        {
            let before = hits.len();
            for span in &entry.spans {
                if span.char_end <= start || span.char_start >= end {
                    continue;
                }
                hits.push(BBoxHit {
                    bbox: span.bbox,
                    page_idx: entry.page_idx,
                    page_size: entry.page_size,
                    text: span.text.clone(),
                });
            }
            if hits.len() == before {
                if let Some(bbox) = entry.bbox {
                    hits.push(BBoxHit {
                        bbox,
                        page_idx: entry.page_idx,
                        page_size: entry.page_size,
                        text: entry.text.clone(),
                    });
                }
            }
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Page, Span};

    fn bbox(n: f64) -> BBox {
        BBox::new(n, n, n + 10.0, n + 10.0)
    }

    fn sample() -> Document {
        let mut p0 = Page::a4(0);
        p0.add_block(Block::leaf(
            "text",
            Some(bbox(0.0)),
            vec![Line::new(vec![
                Span::new("甲方", Some(bbox(1.0))),
                Span::new("", Some(bbox(2.0))),
                Span::new("乙方", None),
            ])],
        ));
        p0.add_block(Block::leaf("text", None, vec![]));
        let mut p1 = Page::new(1, PageSize::new(612.0, 792.0));
        p1.add_block(Block::container(
            "list",
            Some(bbox(50.0)),
            vec![Block::leaf(
                "text",
                None,
                vec![Line::new(vec![Span::new("第三条", None)])],
            )],
        ));
        Document::from_pages(vec![p0, p1])
    }

    #[test]
    fn test_offsets_run_across_pages() {
        let index = CharacterIndex::build(&sample());
        let entries = index.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].char_start, entries[0].char_end), (0, 4));
        assert_eq!((entries[1].char_start, entries[1].char_end), (4, 7));
        assert_eq!(index.total_chars(), 7);
        assert_eq!(index.text(), "甲方乙方第三条");
    }

    #[test]
    fn test_only_spans_with_bbox_are_recorded() {
        let index = CharacterIndex::build(&sample());
        let spans = &index.entries()[0].spans;
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].char_start, spans[0].char_end), (0, 2));
    }

    #[test]
    fn test_child_inherits_parent_bbox_and_page_size() {
        let index = CharacterIndex::build(&sample());
        let entry = &index.entries()[1];
        assert_eq!(entry.bbox, Some(bbox(50.0)));
        assert_eq!(entry.page_idx, 1);
        assert_eq!(entry.page_size, PageSize::new(612.0, 792.0));
    }

    #[test]
    fn test_lookup_prefers_spans() {
        let index = CharacterIndex::build(&sample());
        let hits = index.find_bbox_for_range(1, 2);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].bbox, bbox(1.0));
        assert_eq!(hits[0].text, "甲方");
    }

    #[test]
    fn test_lookup_falls_back_to_block() {
        let index = CharacterIndex::build(&sample());
        // "乙方" has no bbox of its own
        let hits = index.find_bbox_for_range(2, 4);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].bbox, bbox(0.0));
        assert_eq!(hits[0].text, "甲方乙方");
    }

    #[test]
    fn test_lookup_spanning_blocks() {
        let index = CharacterIndex::build(&sample());
        let hits = index.find_bbox_for_range(1, 6);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].page_idx, 0);
        assert_eq!(hits[1].page_idx, 1);
        assert_eq!(hits[1].bbox, bbox(50.0));
    }

    #[test]
    fn test_empty_or_out_of_range_lookup() {
        let index = CharacterIndex::build(&sample());
        assert!(index.find_bbox_for_range(3, 3).is_empty());
        assert!(index.find_bbox_for_range(7, 20).is_empty());
        assert!(CharacterIndex::build(&Document::new())
            .find_bbox_for_range(0, 1)
            .is_empty());
    }
}
