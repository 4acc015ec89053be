//! End-to-end comparison tests.

use std::io::Write;

use docalign::text::{extract_section_number, normalize_number};
use docalign::{
    align_paragraphs, compare, compare_files, merge_paragraphs, parse_str, BBox, Block,
    CompareOptions, CompareSession, DiffKind, Document, MatchType, Page, Paragraph,
};

fn text_doc(pages: &[&[&str]]) -> Document {
    let pages = pages
        .iter()
        .enumerate()
        .map(|(idx, texts)| {
            let mut page = Page::a4(idx as u32);
            for (i, text) in texts.iter().enumerate() {
                let y = 50.0 + 30.0 * i as f64;
                page.add_block(Block::text(*text, BBox::new(50.0, y, 545.0, y + 20.0)));
            }
            page
        })
        .collect();
    Document::from_pages(pages)
}

fn contract() -> Document {
    text_doc(&[
        &[
            "买卖合同",
            "第一条 定义",
            "（一）本合同所称货物，指附件所列产品。",
            "1.2 付款方式：",
            "甲方应于收到发票后",
        ],
        &["30日内付款。", "a) scope of supply.", "第三条 违约责任"],
    ])
}

// ==================== Self-alignment ====================

#[test]
fn test_self_alignment_is_identity() {
    let doc = contract();
    let report = compare(&doc, &doc, &CompareOptions::new());

    assert!(report.is_identical());
    assert_eq!(report.stats.total, 0);
    for pair in &report.pairs {
        assert_eq!(pair.similarity, 1.0);
        assert!(!pair.has_diff);
        assert_eq!(pair.left, pair.right);

        let expected = if extract_section_number(pair.left_text()).is_some() {
            MatchType::Number
        } else {
            MatchType::Similarity
        };
        assert_eq!(pair.match_type, expected, "{}", pair.left_text());
    }
    assert!(report.left_annotations.is_empty());
    assert!(report.right_annotations.is_empty());
}

// ==================== Coverage ====================

#[test]
fn test_every_paragraph_is_paired_once() {
    let left = contract();
    let right = text_doc(&[
        &["买卖合同（修订）", "第一条 定义", "1.2 付款方式"],
        &["甲方应于收到发票后60日内付款。", "第四条 争议解决", "新增的保密条款。"],
    ]);
    let report = compare(&left, &right, &CompareOptions::new());

    let lefts = report.pairs.iter().filter(|p| p.left.is_some()).count();
    let rights = report.pairs.iter().filter(|p| p.right.is_some()).count();
    assert_eq!(lefts, report.left_paragraphs);
    assert_eq!(rights, report.right_paragraphs);

    // Pairs come out ordered by the larger page of their sides
    let pages: Vec<u32> = report
        .pairs
        .iter()
        .map(|p| p.left_page().unwrap_or(0).max(p.right_page().unwrap_or(0)))
        .collect();
    assert!(pages.windows(2).all(|w| w[0] <= w[1]));
}

// ==================== Section numbers ====================

#[test]
fn test_section_number_examples() {
    assert_eq!(extract_section_number("1.2 付款方式").as_deref(), Some("1.2"));

    let token = extract_section_number("第三条 违约责任");
    assert_eq!(token.as_deref(), Some("三"));
    assert_eq!(normalize_number("三"), "3");

    let token = extract_section_number("（一）定义");
    assert_eq!(token.as_deref(), Some("一"));
    assert_eq!(normalize_number("一"), "1");

    assert_eq!(extract_section_number("a) scope").as_deref(), Some("a"));
    assert_eq!(normalize_number("十六"), "十六");
}

// ==================== Merge ====================

#[test]
fn test_cross_page_merge_scenario() {
    let merged = merge_paragraphs(vec![
        Paragraph::new("本协议包含", 0),
        Paragraph::new("以下条款。", 1),
    ]);
    assert_eq!(merged, vec![Paragraph::new("本协议包含以下条款。", 0)]);
}

#[test]
fn test_merge_applies_inside_comparison() {
    let doc = contract();
    let report = compare(&doc, &doc, &CompareOptions::new());
    assert!(report
        .pairs
        .iter()
        .any(|p| p.left_text() == "甲方应于收到发票后30日内付款。" && p.left_page() == Some(0)));
}

// ==================== Diff scenarios ====================

#[test]
fn test_end_to_end_diff_scenario() {
    let left = vec![Paragraph::new("1. 甲方应于30日内付款。", 0)];
    let right = vec![Paragraph::new("1. 甲方应于60日内付款。", 0)];
    let pairs = align_paragraphs(&left, &right);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].match_type, MatchType::Number);

    let report = compare(
        &text_doc(&[&["1. 甲方应于30日内付款。"]]),
        &text_doc(&[&["1. 甲方应于60日内付款。"]]),
        &CompareOptions::new(),
    );
    let pair = &report.pairs[0];
    assert!(pair.has_diff);
    let deleted: String = pair
        .diffs
        .iter()
        .filter(|op| op.kind == DiffKind::Delete)
        .map(|op| op.text.as_str())
        .collect();
    let inserted: String = pair
        .diffs
        .iter()
        .filter(|op| op.kind == DiffKind::Insert)
        .map(|op| op.text.as_str())
        .collect();
    assert!("30".contains(deleted.as_str()) && !deleted.is_empty());
    assert!("60".contains(inserted.as_str()) && !inserted.is_empty());
    assert_eq!(report.stats.added + report.stats.removed, report.stats.total);
}

#[test]
fn test_no_op_scenario() {
    let doc = text_doc(&[&["甲方：张三"]]);
    let report = compare(&doc, &doc, &CompareOptions::new());
    assert_eq!(report.pairs.len(), 1);
    assert!(!report.pairs[0].has_diff);
    assert_eq!(report.pairs[0].diffs.len(), 1);
    assert_eq!(report.pairs[0].diffs[0].kind, DiffKind::Equal);
    assert_eq!(report.pairs[0].diffs[0].text, "甲方：张三");
}

#[test]
fn test_whitespace_and_punctuation_changes_are_not_diffs() {
    let left = text_doc(&[&["甲方：张三，乙方：李四。"]]);
    let right = text_doc(&[&["甲方: 张三, 乙方: 李四."]]);
    let report = compare(&left, &right, &CompareOptions::new());
    assert!(report.is_identical());
}

// ==================== Input handling ====================

#[test]
fn test_compare_files_from_disk() {
    let json = |text: &str| {
        format!(
            r#"{{"pdf_info": [{{"page_idx": 0, "page_size": [595, 842], "para_blocks": [
                {{"type": "text", "bbox": [10, 20, 300, 40],
                  "lines": [{{"spans": [{{"content": "{}", "bbox": [10, 20, 300, 40]}}]}}]}}
            ]}}]}}"#,
            text
        )
    };
    let mut left = tempfile::NamedTempFile::new().unwrap();
    left.write_all(json("1. 甲方应于30日内付款。").as_bytes())
        .unwrap();
    let mut right = tempfile::NamedTempFile::new().unwrap();
    right
        .write_all(json("1. 甲方应于60日内付款。").as_bytes())
        .unwrap();

    let report = compare_files(left.path(), right.path(), &CompareOptions::new()).unwrap();
    assert_eq!(report.stats.changed_pairs, 1);
    assert_eq!(report.left_annotations.get(0).len(), 1);
    assert_eq!(
        report.left_annotations.get(0)[0].bbox,
        BBox::new(10.0, 20.0, 300.0, 40.0)
    );
}

#[test]
fn test_partial_input_degrades_gracefully() {
    let doc = parse_str(
        r#"{"pdf_info": [
            {"para_blocks": [{"lines": [{"spans": [{"content": "无坐标段落。"}]}]}]},
            "not a page",
            {"page_idx": 3, "page_size": "A4", "para_blocks": {"bad": true}}
        ]}"#,
    )
    .unwrap();
    assert_eq!(doc.page_count(), 2);

    let report = compare(&doc, &Document::new(), &CompareOptions::new());
    assert_eq!(report.pairs.len(), 1);
    // No bbox anywhere, so nothing can be highlighted
    assert!(report.left_annotations.is_empty());
}

// ==================== Session ====================

#[test]
fn test_session_last_writer_wins() {
    let mut session = CompareSession::new();
    session.set_left(text_doc(&[&["1. 甲方应于30日内付款。"]]));
    session.set_right(text_doc(&[&["1. 甲方应于60日内付款。"]]));
    let first = session.run().map(|r| r.stats.changed_pairs);
    assert_eq!(first, Some(1));

    session.set_right(text_doc(&[&["1. 甲方应于30日内付款。"]]));
    let second = session.run().map(|r| r.stats.changed_pairs);
    assert_eq!(second, Some(0));
}
