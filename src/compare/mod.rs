//! End-to-end comparison pipeline.
//!
//! Extraction, merging, alignment, diffing and annotation run in that order
//! on two in-memory documents. Every stage is total: any pair of documents,
//! including empty ones, yields a report.

mod options;
mod report;
mod session;

pub use options::{AnnotationStrategy, CompareOptions};
pub use report::CompareReport;
pub use session::CompareSession;

use crate::align::ParagraphAligner;
use crate::annotate::{annotate_full_text, annotate_paragraph_diffs, BlockMatcher};
use crate::diff::{
    compute_paragraph_diffs, compute_paragraph_diffs_parallel, Differ, SemanticDiffer,
};
use crate::extract::{extract_paragraphs, merge_paragraphs};
use crate::model::{Document, Paragraph};

/// Compare two documents with the default differ.
pub fn compare(left: &Document, right: &Document, options: &CompareOptions) -> CompareReport {
    compare_with_differ(left, right, options, &SemanticDiffer)
}

/// Compare two documents with a caller-supplied differ.
pub fn compare_with_differ(
    left: &Document,
    right: &Document,
    options: &CompareOptions,
    differ: &dyn Differ,
) -> CompareReport {
    let left_paras = paragraphs_for(left, options);
    let right_paras = paragraphs_for(right, options);

    let matches = ParagraphAligner::new()
        .with_threshold(options.similarity_threshold)
        .align(&left_paras, &right_paras);

    let pairs = if options.parallel_diff {
        compute_paragraph_diffs_parallel(matches, differ)
    } else {
        compute_paragraph_diffs(matches, differ)
    };

    let annotations = match options.annotation_strategy {
        AnnotationStrategy::Paragraph => annotate_paragraph_diffs(&pairs, left, right),
        AnnotationStrategy::CharacterRange => annotate_full_text(left, right, differ),
        AnnotationStrategy::BlockMatch => BlockMatcher::new()
            .with_threshold(options.similarity_threshold)
            .with_min_block_chars(options.min_block_chars)
            .annotate(left, right),
    };

    let report = CompareReport::new(
        pairs,
        annotations,
        options.annotation_strategy,
        left_paras.len(),
        right_paras.len(),
    );
    log::info!(
        "Compared {} vs {} paragraphs: {} pairs, {} changed, {} annotations",
        report.left_paragraphs,
        report.right_paragraphs,
        report.pairs.len(),
        report.stats.changed_pairs,
        report.left_annotations.total() + report.right_annotations.total()
    );
    report
}

fn paragraphs_for(doc: &Document, options: &CompareOptions) -> Vec<Paragraph> {
    let paragraphs = extract_paragraphs(doc);
    if options.merge_paragraphs {
        merge_paragraphs(paragraphs)
    } else {
        paragraphs
    }
}
