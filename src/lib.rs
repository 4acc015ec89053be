//! # docalign
//!
//! Paragraph-level alignment and diffing of layout-extracted documents.
//!
//! Two revisions of a document, each already decomposed into pages, blocks,
//! lines and spans with page-space bounding boxes, are compared paragraph by
//! paragraph. Differences are traced back to the regions of the original
//! pages they came from.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docalign::{compare_files, render, CompareOptions};
//!
//! fn main() -> docalign::Result<()> {
//!     let report = compare_files("v1.json", "v2.json", &CompareOptions::default())?;
//!
//!     for pair in report.changed_pairs() {
//!         println!("{} -> {}", pair.left_text(), pair.right_text());
//!     }
//!     println!("{}", render::to_json(&report, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Extraction**: one paragraph per text-bearing block, nested blocks included
//! - **Merging**: paragraphs split across blocks or pages are stitched back
//! - **Alignment**: three-tier greedy matching by section number, then similarity
//! - **Diffing**: per-pair edit scripts behind the [`Differ`] trait
//! - **Annotation**: edits projected onto page bboxes for overlay renderers

pub mod align;
pub mod annotate;
pub mod compare;
pub mod diff;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;
pub mod text;

// Re-export commonly used types
pub use align::{align_paragraphs, MatchType, ParagraphAligner, ParagraphMatch};
pub use annotate::{Annotation, AnnotationKind, AnnotationMap, CharacterIndex, SideAnnotations};
pub use compare::{
    compare, compare_with_differ, AnnotationStrategy, CompareOptions, CompareReport,
    CompareSession,
};
pub use diff::{AlignedPair, DiffKind, DiffOp, DiffStats, Differ, SemanticDiffer};
pub use error::{Error, Result};
pub use extract::{extract_merged_paragraphs, extract_paragraphs, merge_paragraphs};
pub use model::{
    paragraphs_to_text, BBox, Block, BlockBody, Document, Line, Page, PageSize, Paragraph,
    PixelRect, Span,
};
pub use parser::{ErrorMode, LayoutParser, ParseOptions};
pub use render::{JsonFormat, TextOptions};
pub use text::{calculate_similarity, extract_section_number, normalize_number, normalize_text};

use std::io::Read;
use std::path::Path;

/// Parse a layout JSON file into a document.
///
/// # Example
///
/// ```no_run
/// use docalign::parse_file;
///
/// let doc = parse_file("contract.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    LayoutParser::open(path)?.parse()
}

/// Parse a layout JSON file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    LayoutParser::open_with_options(path, options)?.parse()
}

/// Parse layout JSON from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    LayoutParser::from_bytes(data)?.parse()
}

/// Parse layout JSON from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    LayoutParser::from_bytes_with_options(data, options)?.parse()
}

/// Parse layout JSON from a string.
///
/// # Example
///
/// ```
/// let doc = docalign::parse_str(r#"{"pdf_info": []}"#).unwrap();
/// assert!(doc.is_empty());
/// ```
pub fn parse_str(json: &str) -> Result<Document> {
    LayoutParser::from_json_str(json)?.parse()
}

/// Parse layout JSON from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    LayoutParser::from_reader(reader)?.parse()
}

/// Parse layout JSON from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Document> {
    LayoutParser::from_reader_with_options(reader, options)?.parse()
}

/// Load two layout JSON files and compare them.
///
/// # Example
///
/// ```no_run
/// use docalign::{compare_files, CompareOptions};
///
/// let report = compare_files("v1.json", "v2.json", &CompareOptions::new()).unwrap();
/// println!("{} changed paragraphs", report.stats.changed_pairs);
/// ```
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
    left: P,
    right: Q,
    options: &CompareOptions,
) -> Result<CompareReport> {
    let left = parse_file(left)?;
    let right = parse_file(right)?;
    Ok(compare(&left, &right, options))
}

/// Extract and merge the paragraphs of a layout JSON file.
pub fn paragraphs_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Paragraph>> {
    let doc = parse_file(path)?;
    Ok(extract_merged_paragraphs(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "pdf_info": [{
            "page_idx": 0,
            "page_size": [595, 842],
            "para_blocks": [
                {"type": "title", "bbox": [50, 40, 545, 60],
                 "lines": [{"spans": [{"content": "第一条 付款", "bbox": [50, 40, 200, 60]}]}]},
                {"type": "text", "bbox": [50, 80, 545, 100],
                 "lines": [{"spans": [{"content": "1. 甲方应于30日内付款。", "bbox": [50, 80, 300, 100]}]}]}
            ]
        }]
    }"#;

    #[test]
    fn test_parse_str_sample() {
        let doc = parse_str(SAMPLE).unwrap();
        assert_eq!(doc.page_count(), 1);
        let paras = extract_merged_paragraphs(&doc);
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0].kind, "title");
    }

    #[test]
    fn test_parse_bytes_rejects_malformed_json() {
        assert!(matches!(parse_bytes(b"{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_str_rejects_non_object() {
        assert!(matches!(parse_str("[1, 2]"), Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn test_strict_mode_requires_pdf_info() {
        assert!(parse_str("{}").unwrap().is_empty());

        let strict = ParseOptions::new().with_error_mode(ErrorMode::Strict);
        assert!(parse_bytes_with_options(b"{}", strict).is_err());
    }

    #[test]
    fn test_parse_reader() {
        let doc = parse_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(doc.pages[0].block_count(), 2);
    }

    #[test]
    fn test_self_comparison_is_identical() {
        let doc = parse_str(SAMPLE).unwrap();
        let report = compare(&doc, &doc, &CompareOptions::default());
        assert!(report.is_identical());
        assert_eq!(report.pairs.len(), 2);
        assert!(report.pairs.iter().all(|p| p.similarity == 1.0));
    }
}
