//! Text-diff primitive.

use serde::{Deserialize, Serialize};

/// Kind of an edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present in both texts
    Equal,
    /// Present only in the left text
    Delete,
    /// Present only in the right text
    Insert,
}

/// One edit operation carrying its literal substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    /// Operation kind
    #[serde(rename = "op")]
    pub kind: DiffKind,

    /// Literal text covered by the operation
    pub text: String,
}

impl DiffOp {
    /// Create an equal operation.
    pub fn equal(text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Equal,
            text: text.into(),
        }
    }

    /// Create a delete operation.
    pub fn delete(text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Delete,
            text: text.into(),
        }
    }

    /// Create an insert operation.
    pub fn insert(text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Insert,
            text: text.into(),
        }
    }

    /// Check if this is an equal operation.
    pub fn is_equal(&self) -> bool {
        self.kind == DiffKind::Equal
    }

    /// Length in characters (Unicode scalar values).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// An ordered edit script turning the left text into the right text.
pub type EditScript = Vec<DiffOp>;

/// Text-diff primitive.
///
/// Given two raw strings, returns an ordered edit script. Concatenating the
/// equal and delete operations must reproduce `left`; concatenating the
/// equal and insert operations must reproduce `right`.
pub trait Differ: Send + Sync {
    /// Compute the edit script from `left` to `right`.
    fn diff(&self, left: &str, right: &str) -> EditScript;
}

/// Character-level Myers diff with semantic cleanup, backed by `dissimilar`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticDiffer;

impl SemanticDiffer {
    /// Create a new differ.
    pub fn new() -> Self {
        Self
    }
}

impl Differ for SemanticDiffer {
    fn diff(&self, left: &str, right: &str) -> EditScript {
        dissimilar::diff(left, right)
            .into_iter()
            .map(|chunk| match chunk {
                dissimilar::Chunk::Equal(text) => DiffOp::equal(text),
                dissimilar::Chunk::Delete(text) => DiffOp::delete(text),
                dissimilar::Chunk::Insert(text) => DiffOp::insert(text),
            })
            .collect()
    }
}

/// Reassemble the left text from an edit script.
pub fn left_text(ops: &[DiffOp]) -> String {
    ops.iter()
        .filter(|op| op.kind != DiffKind::Insert)
        .map(|op| op.text.as_str())
        .collect()
}

/// Reassemble the right text from an edit script.
pub fn right_text(ops: &[DiffOp]) -> String {
    ops.iter()
        .filter(|op| op.kind != DiffKind::Delete)
        .map(|op| op.text.as_str())
        .collect()
}
