//! Paragraph-level annotation driven by aligned pairs.

use std::collections::HashMap;

use crate::diff::AlignedPair;
use crate::model::Document;
use crate::text::normalize_text;

use super::blocks::{located_blocks, LocatedBlock};
use super::{
    prefix_chars, truncate_chars, Annotation, AnnotationKind, AnnotationMap, SideAnnotations,
};

/// Tooltip length for added or removed paragraphs.
const TOOLTIP_CHARS: usize = 50;

/// Tooltip length for modified paragraphs.
const MODIFIED_TOOLTIP_CHARS: usize = 40;

/// Tooltip prefix for modified paragraphs.
const MODIFIED_PREFIX: &str = "修改: ";

/// Located blocks keyed by normalized text.
struct BlockLookup<'a> {
    by_text: HashMap<String, Vec<&'a LocatedBlock>>,
}

impl<'a> BlockLookup<'a> {
    fn new(blocks: &'a [LocatedBlock]) -> Self {
        let mut by_text: HashMap<String, Vec<&LocatedBlock>> = HashMap::new();
        for block in blocks {
            let key = normalize_text(&block.text);
            if !key.is_empty() {
                by_text.entry(key).or_default().push(block);
            }
        }
        Self { by_text }
    }

    fn matching(&self, text: &str) -> &[&'a LocatedBlock] {
        self.by_text
            .get(&normalize_text(text))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn mark(map: &mut AnnotationMap, blocks: &[&LocatedBlock], kind: AnnotationKind, tooltip: &str) {
    for block in blocks {
        map.push(Annotation::new(
            kind,
            block.bbox,
            block.page_idx,
            block.page_size,
            tooltip,
        ));
    }
}

/// Annotate the blocks behind every changed aligned pair.
///
/// Paragraph text is looked up verbatim (after normalization) among the
/// document's located blocks, so every block sharing that text is marked.
/// Pairs without a real difference are skipped; a side counts as present
/// when its trimmed text is non-empty.
pub fn annotate_paragraph_diffs(
    pairs: &[AlignedPair],
    left_doc: &Document,
    right_doc: &Document,
) -> SideAnnotations {
    let left_blocks = located_blocks(left_doc);
    let right_blocks = located_blocks(right_doc);
    let left_lookup = BlockLookup::new(&left_blocks);
    let right_lookup = BlockLookup::new(&right_blocks);

    let mut out = SideAnnotations::new();
    for pair in pairs.iter().filter(|p| p.has_diff) {
        let left = pair.left_text();
        let right = pair.right_text();

        match (!left.trim().is_empty(), !right.trim().is_empty()) {
            (true, false) => mark(
                &mut out.left,
                left_lookup.matching(left),
                AnnotationKind::Removed,
                &truncate_chars(left, TOOLTIP_CHARS),
            ),
            (false, true) => mark(
                &mut out.right,
                right_lookup.matching(right),
                AnnotationKind::Added,
                &truncate_chars(right, TOOLTIP_CHARS),
            ),
            (true, true) => {
                mark(
                    &mut out.left,
                    left_lookup.matching(left),
                    AnnotationKind::Removed,
                    &modified_tooltip(left),
                );
                mark(
                    &mut out.right,
                    right_lookup.matching(right),
                    AnnotationKind::Added,
                    &modified_tooltip(right),
                );
            }
            (false, false) => {}
        }
    }

    log::debug!(
        "Paragraph annotations: {} removed, {} added",
        out.left.total(),
        out.right.total()
    );
    out
}

fn modified_tooltip(text: &str) -> String {
    format!("{}{}...", MODIFIED_PREFIX, prefix_chars(text, MODIFIED_TOOLTIP_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align_paragraphs;
    use crate::diff::{compute_paragraph_diffs, SemanticDiffer};
    use crate::extract::extract_merged_paragraphs;
    use crate::model::{BBox, Block, Page};

    fn doc(texts: &[(&str, BBox)]) -> Document {
        let mut page = Page::a4(0);
        for (text, bbox) in texts {
            page.add_block(Block::text(*text, *bbox));
        }
        Document::from_pages(vec![page])
    }

    fn annotate(left: &Document, right: &Document) -> SideAnnotations {
        let pairs = align_paragraphs(
            &extract_merged_paragraphs(left),
            &extract_merged_paragraphs(right),
        );
        let diffs = compute_paragraph_diffs(pairs, &SemanticDiffer);
        annotate_paragraph_diffs(&diffs, left, right)
    }

    #[test]
    fn test_modification_marks_both_sides() {
        let a = BBox::new(10.0, 10.0, 300.0, 30.0);
        let b = BBox::new(12.0, 10.0, 310.0, 30.0);
        let left = doc(&[("1. 甲方应于30日内付款。", a)]);
        let right = doc(&[("1. 甲方应于60日内付款。", b)]);

        let out = annotate(&left, &right);
        let removed = out.left.get(0);
        let added = out.right.get(0);
        assert_eq!(removed.len(), 1);
        assert_eq!(added.len(), 1);
        assert_eq!(removed[0].bbox, a);
        assert_eq!(added[0].bbox, b);
        assert_eq!(removed[0].text, "修改: 1. 甲方应于30日内付款。...");
        assert_eq!(removed[0].correlation_id, None);
    }

    #[test]
    fn test_pure_addition_and_deletion() {
        let bbox = BBox::new(0.0, 0.0, 100.0, 20.0);
        let left = doc(&[("第一条 总则。", bbox), ("本条款将被删除。", bbox)]);
        let right = doc(&[("第一条 总则。", bbox), ("完全新增的一段内容。", bbox)]);

        let out = annotate(&left, &right);
        assert_eq!(out.left.total(), 1);
        assert_eq!(out.right.total(), 1);
        assert_eq!(out.left.get(0)[0].kind, AnnotationKind::Removed);
        assert_eq!(out.left.get(0)[0].text, "本条款将被删除。");
        assert_eq!(out.right.get(0)[0].kind, AnnotationKind::Added);
    }

    #[test]
    fn test_duplicate_blocks_fan_out() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(0.0, 50.0, 10.0, 60.0);
        let left = doc(&[("重复的删除内容。", a), ("重复的删除内容。", b)]);
        let right = Document::new();

        let out = annotate(&left, &right);
        // Two one-sided pairs, each matching both blocks
        assert_eq!(out.left.total(), 4);
    }

    #[test]
    fn test_long_text_is_truncated() {
        let long: String = "很".repeat(60) + "。";
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        let right = doc(&[(long.as_str(), bbox)]);

        let out = annotate(&Document::new(), &right);
        let text = &out.right.get(0)[0].text;
        assert_eq!(text.chars().count(), 53);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_unchanged_pairs_are_skipped() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        let d = doc(&[("甲方：张三", bbox)]);
        assert_eq!(annotate(&d, &d).total(), 0);
    }

    #[test]
    fn test_merged_paragraph_has_no_block_match() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        let mut p0 = Page::a4(0);
        p0.add_block(Block::text("本协议包含", bbox));
        let mut p1 = Page::a4(1);
        p1.add_block(Block::text("以下条款。", bbox));
        let left = Document::from_pages(vec![p0, p1]);

        // The merged text matches no single block
        let out = annotate(&left, &Document::new());
        assert_eq!(out.left.total(), 0);
    }
}
