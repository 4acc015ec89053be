//! Comparison session.

use crate::diff::{Differ, SemanticDiffer};
use crate::model::Document;

use super::{compare_with_differ, CompareOptions, CompareReport};

/// Holds the two documents under comparison and the latest report.
///
/// Mutation goes through `&mut self`, so a run can never overlap another
/// run or a document swap. Each run replaces the previous report in full.
pub struct CompareSession {
    left: Option<Document>,
    right: Option<Document>,
    options: CompareOptions,
    differ: Box<dyn Differ>,
    report: Option<CompareReport>,
}

impl CompareSession {
    /// Create an empty session with default options.
    pub fn new() -> Self {
        Self::with_options(CompareOptions::default())
    }

    /// Create an empty session with the given options.
    pub fn with_options(options: CompareOptions) -> Self {
        Self {
            left: None,
            right: None,
            options,
            differ: Box::new(SemanticDiffer),
            report: None,
        }
    }

    /// Replace the text-diff primitive.
    pub fn with_differ(mut self, differ: impl Differ + 'static) -> Self {
        self.differ = Box::new(differ);
        self
    }

    /// Set the original document. Invalidates the current report.
    pub fn set_left(&mut self, doc: Document) {
        self.left = Some(doc);
        self.report = None;
    }

    /// Set the revised document. Invalidates the current report.
    pub fn set_right(&mut self, doc: Document) {
        self.right = Some(doc);
        self.report = None;
    }

    /// Replace the options. Invalidates the current report.
    pub fn set_options(&mut self, options: CompareOptions) {
        self.options = options;
        self.report = None;
    }

    /// Current options.
    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Original document, if set.
    pub fn left(&self) -> Option<&Document> {
        self.left.as_ref()
    }

    /// Revised document, if set.
    pub fn right(&self) -> Option<&Document> {
        self.right.as_ref()
    }

    /// Check if both documents are loaded.
    pub fn is_ready(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Run the comparison. Returns `None` until both documents are set.
    pub fn run(&mut self) -> Option<&CompareReport> {
        let (Some(left), Some(right)) = (&self.left, &self.right) else {
            log::warn!("Comparison requested before both documents were loaded");
            return None;
        };
        let report = compare_with_differ(left, right, &self.options, self.differ.as_ref());
        self.report = Some(report);
        self.report.as_ref()
    }

    /// Latest report, if a run has completed since the last change.
    pub fn report(&self) -> Option<&CompareReport> {
        self.report.as_ref()
    }

    /// Take ownership of the latest report.
    pub fn take_report(&mut self) -> Option<CompareReport> {
        self.report.take()
    }
}

impl Default for CompareSession {
    fn default() -> Self {
        Self::new()
    }
}
