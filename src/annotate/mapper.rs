//! Character-range mapping from edit scripts to page regions.

use crate::diff::{DiffKind, DiffOp, Differ};
use crate::model::Document;

use super::{Annotation, AnnotationKind, AnnotationMap, CharacterIndex, SideAnnotations};

/// Project an edit script over two indexed texts onto page regions.
///
/// Left and right cursors advance independently: equal operations move
/// both, deletes move the left one, inserts the right one. Each delete or
/// insert yields one annotation per region it overlaps, and all of them
/// share that operation's correlation id.
pub fn map_diff_to_bbox(
    ops: &[DiffOp],
    left: &CharacterIndex,
    right: &CharacterIndex,
) -> SideAnnotations {
    let mut out = SideAnnotations::new();
    let mut left_pos = 0;
    let mut right_pos = 0;
    let mut correlation_id = 0;

    for op in ops {
        let len = op.char_len();
        match op.kind {
            DiffKind::Equal => {
                left_pos += len;
                right_pos += len;
            }
            DiffKind::Delete => {
                push_hits(
                    &mut out.left,
                    left,
                    left_pos,
                    op,
                    AnnotationKind::Removed,
                    correlation_id,
                );
                left_pos += len;
                correlation_id += 1;
            }
            DiffKind::Insert => {
                push_hits(
                    &mut out.right,
                    right,
                    right_pos,
                    op,
                    AnnotationKind::Added,
                    correlation_id,
                );
                right_pos += len;
                correlation_id += 1;
            }
        }
    }

    out
}

fn push_hits(
    map: &mut AnnotationMap,
    index: &CharacterIndex,
    start: usize,
    op: &DiffOp,
    kind: AnnotationKind,
    correlation_id: usize,
) {
    for hit in index.find_bbox_for_range(start, start + op.char_len()) {
        map.push(
            Annotation::new(kind, hit.bbox, hit.page_idx, hit.page_size, op.text.as_str())
                .with_correlation_id(correlation_id),
        );
    }
}

/// Diff two documents' full indexed texts and map the result to regions.
pub fn annotate_full_text(left: &Document, right: &Document, differ: &dyn Differ) -> SideAnnotations {
    let left_index = CharacterIndex::build(left);
    let right_index = CharacterIndex::build(right);
    let ops = differ.diff(&left_index.text(), &right_index.text());
    let out = map_diff_to_bbox(&ops, &left_index, &right_index);
    log::debug!(
        "Character-range annotations: {} removed, {} added",
        out.left.total(),
        out.right.total()
    );
    out
}
