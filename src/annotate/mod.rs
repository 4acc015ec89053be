//! Projection of text differences back onto page regions.
//!
//! Three strategies produce the same [`SideAnnotations`] output:
//!
//! - [`annotate_paragraph_diffs`] marks every block whose normalized text
//!   equals a changed paragraph (the default).
//! - [`annotate_full_text`] diffs each document's full indexed text and maps
//!   edit ranges through a [`CharacterIndex`] down to span bboxes.
//! - [`BlockMatcher`] pairs blocks independently of paragraph alignment and
//!   marks the unpaired ones.

mod annotation;
mod block_match;
mod blocks;
mod char_index;
mod mapper;
mod paragraph;

pub use annotation::{Annotation, AnnotationKind, AnnotationMap, SideAnnotations};
pub use block_match::{BlockMatcher, MIN_BLOCK_CHARS};
pub use blocks::{located_blocks, LocatedBlock};
pub use char_index::{BBoxHit, CharacterIndex, IndexEntry, IndexedSpan};
pub use mapper::{annotate_full_text, map_diff_to_bbox};
pub use paragraph::annotate_paragraph_diffs;

pub(crate) use annotation::{prefix_chars, truncate_chars};
