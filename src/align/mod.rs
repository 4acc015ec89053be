//! Paragraph alignment between two document revisions.

mod aligner;

pub use aligner::{
    align_paragraphs, MatchType, ParagraphAligner, ParagraphMatch, SIMILARITY_THRESHOLD,
};
