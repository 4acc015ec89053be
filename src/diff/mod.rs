//! Edit scripts for aligned paragraph pairs.
//!
//! The text-diff primitive sits behind the [`Differ`] trait so the rest of
//! the pipeline can be exercised against a fake. [`SemanticDiffer`] is the
//! default implementation.

mod compute;
mod differ;

pub use compute::{
    compute_paragraph_diffs, compute_paragraph_diffs_parallel, diff_pair, AlignedPair, DiffStats,
};
pub use differ::{left_text, right_text, DiffKind, DiffOp, Differ, EditScript, SemanticDiffer};
