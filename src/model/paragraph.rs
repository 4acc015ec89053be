//! Extracted paragraphs.

use super::BBox;
use serde::{Deserialize, Serialize};

/// A contiguous run of text attributed to one source block, or to several
/// blocks joined by the cross-page merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Trimmed display text
    pub text: String,

    /// Block type of the originating block
    #[serde(rename = "type")]
    pub kind: String,

    /// Page index of the (first) originating block
    pub page_idx: u32,

    /// Bounding box of the (first) originating block, if known
    pub bbox: Option<BBox>,
}

impl Paragraph {
    /// Create a paragraph of type `text` without a bbox.
    pub fn new(text: impl Into<String>, page_idx: u32) -> Self {
        Self {
            text: text.into(),
            kind: "text".to_string(),
            page_idx,
            bbox: None,
        }
    }

    /// Set the block type.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Append a continuation fragment, keeping this paragraph's page and bbox.
    pub fn absorb(&mut self, next: &Paragraph) {
        self.text.push_str(&next.text);
    }
}

/// Join paragraph texts with newlines.
pub fn paragraphs_to_text(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
