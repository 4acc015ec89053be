//! Document model types.
//!
//! The model is the typed form of a layout-extracted document: pages of
//! blocks, blocks of lines, lines of spans, each with page-space bounding
//! boxes. It is built once per input and read-only afterwards.

mod document;
mod geometry;
mod page;
mod paragraph;

pub use document::Document;
pub use geometry::{BBox, PageSize, PixelRect, A4_PAGE_SIZE};
pub use page::{Block, BlockBody, Line, Page, Span};
pub use paragraph::{paragraphs_to_text, Paragraph};
