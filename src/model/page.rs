//! Page-level types.

use super::{BBox, PageSize};
use serde::{Deserialize, Serialize};

/// A single page in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page index (0-indexed)
    pub page_idx: u32,

    /// Page dimensions in page units
    pub page_size: PageSize,

    /// Top-level blocks in reading order
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a new empty page with the given dimensions.
    pub fn new(page_idx: u32, page_size: PageSize) -> Self {
        Self {
            page_idx,
            page_size,
            blocks: Vec::new(),
        }
    }

    /// Create a new empty A4 page.
    pub fn a4(page_idx: u32) -> Self {
        Self::new(page_idx, PageSize::default())
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Builder-style variant of [`Page::add_block`].
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of top-level blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// A layout block: either a leaf holding lines of spans or a container of
/// nested child blocks (list items and the like).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Block type as reported by the layout engine (`text`, `title`, `list`, ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Bounding box on the page, if known
    pub bbox: Option<BBox>,

    /// Lines or nested children
    pub body: BlockBody,
}

/// The content of a [`Block`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockBody {
    /// Text-bearing block
    Leaf {
        /// Lines in reading order
        lines: Vec<Line>,
    },
    /// Block whose text lives in nested child blocks
    Container {
        /// Child blocks in reading order
        children: Vec<Block>,
    },
}

impl Block {
    /// Create a leaf block from lines.
    pub fn leaf(kind: impl Into<String>, bbox: Option<BBox>, lines: Vec<Line>) -> Self {
        Self {
            kind: kind.into(),
            bbox,
            body: BlockBody::Leaf { lines },
        }
    }

    /// Create a container block from child blocks.
    pub fn container(kind: impl Into<String>, bbox: Option<BBox>, children: Vec<Block>) -> Self {
        Self {
            kind: kind.into(),
            bbox,
            body: BlockBody::Container { children },
        }
    }

    /// Create a single-span text block.
    pub fn text(content: impl Into<String>, bbox: BBox) -> Self {
        Self::leaf(
            "text",
            Some(bbox),
            vec![Line::new(vec![Span::new(content, Some(bbox))])],
        )
    }

    /// Check if this block has nested children.
    pub fn is_container(&self) -> bool {
        matches!(self.body, BlockBody::Container { .. })
    }

    /// Concatenated span text of a leaf block (untrimmed).
    ///
    /// Containers have no text of their own and return an empty string.
    pub fn own_text(&self) -> String {
        match &self.body {
            BlockBody::Leaf { lines } => lines
                .iter()
                .flat_map(|line| line.spans.iter())
                .map(|span| span.content.as_str())
                .collect(),
            BlockBody::Container { .. } => String::new(),
        }
    }
}

/// A line of spans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Line {
    /// Spans in reading order
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }
}

/// The smallest text-bearing unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// Text content (empty when the source had none)
    pub content: String,

    /// Bounding box on the page, if known
    pub bbox: Option<BBox>,
}

impl Span {
    /// Create a span.
    pub fn new(content: impl Into<String>, bbox: Option<BBox>) -> Self {
        Self {
            content: content.into(),
            bbox,
        }
    }

    /// Number of characters (Unicode scalar values) in the span.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
