//! Annotation types consumed by page-overlay renderers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{BBox, PageSize, PixelRect};

/// Whether an annotated region was removed from the left document or added
/// to the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// Present only in the revised document
    Added,
    /// Present only in the original document
    Removed,
}

impl AnnotationKind {
    /// Lowercase label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationKind::Added => "added",
            AnnotationKind::Removed => "removed",
        }
    }
}

/// A highlighted region on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Region in page units
    pub bbox: BBox,

    /// Size of the page the region lives on
    pub page_size: PageSize,

    /// Added or removed
    #[serde(rename = "type")]
    pub kind: AnnotationKind,

    /// Tooltip text
    pub text: String,

    /// Page index
    pub page_idx: u32,

    /// Shared by every annotation produced from the same edit operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<usize>,
}

impl Annotation {
    /// Create an annotation without a correlation id.
    pub fn new(
        kind: AnnotationKind,
        bbox: BBox,
        page_idx: u32,
        page_size: PageSize,
        text: impl Into<String>,
    ) -> Self {
        Self {
            bbox,
            page_size,
            kind,
            text: text.into(),
            page_idx,
            correlation_id: None,
        }
    }

    /// Set the correlation id.
    pub fn with_correlation_id(mut self, id: usize) -> Self {
        self.correlation_id = Some(id);
        self
    }

    /// Project the region to viewer pixels.
    pub fn to_pixel_rect(&self, zoom: f64) -> PixelRect {
        self.bbox.to_pixel_rect(zoom)
    }
}

/// Annotations grouped by page index, in insertion order within a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationMap {
    pages: BTreeMap<u32, Vec<Annotation>>,
}

impl AnnotationMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an annotation under its own page index.
    pub fn push(&mut self, annotation: Annotation) {
        self.pages
            .entry(annotation.page_idx)
            .or_default()
            .push(annotation);
    }

    /// Annotations on one page.
    pub fn get(&self, page_idx: u32) -> &[Annotation] {
        self.pages.get(&page_idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Page indices that carry at least one annotation, ascending.
    pub fn pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.keys().copied()
    }

    /// Iterate over `(page_idx, annotations)` in page order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Annotation])> {
        self.pages.iter().map(|(idx, anns)| (*idx, anns.as_slice()))
    }

    /// Total number of annotations across all pages.
    pub fn total(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Check if there are no annotations.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Annotations for both documents of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideAnnotations {
    /// Removed regions on the left (original) document
    pub left: AnnotationMap,

    /// Added regions on the right (revised) document
    pub right: AnnotationMap,
}

impl SideAnnotations {
    /// Create an empty pair of maps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total annotations on both sides.
    pub fn total(&self) -> usize {
        self.left.total() + self.right.total()
    }
}

/// Keep the first `max` characters, appending `...` when anything was cut.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Keep at most the first `max` characters.
pub(crate) fn prefix_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
