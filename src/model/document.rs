//! Document-level types.

use super::Page;
use serde::{Deserialize, Serialize};

/// A layout-extracted document: pages in reading order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Create a document from pages.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by its page index.
    pub fn get_page(&self, page_idx: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_idx == page_idx)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
