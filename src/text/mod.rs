//! Text canonicalization, section numbering and similarity scoring.
//!
//! Everything here works on comparison keys only; display text is never
//! rewritten.

mod normalize;
mod section;
mod similarity;

pub use normalize::normalize_text;
pub use section::{
    ends_with_sentence_terminator, extract_section_number, normalize_number, section_key,
    starts_with_section_number,
};
pub use similarity::{calculate_similarity, similarity_of_normalized};
