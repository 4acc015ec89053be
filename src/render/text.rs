//! Plain text rendering for comparison reports.
//!
//! Deleted text is wrapped in `[-...-]` and inserted text in `{+...+}`.
//! Page markers are written whenever either side moves to a new page.

use std::fmt::Write;

use crate::compare::CompareReport;
use crate::diff::{AlignedPair, DiffKind};
use crate::error::{Error, Result};

/// Options for the text report.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Include pairs without a real difference
    pub show_unchanged: bool,

    /// Emit page markers
    pub page_markers: bool,

    /// Append the summary line
    pub summary: bool,
}

impl TextOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only print changed pairs.
    pub fn changes_only(mut self) -> Self {
        self.show_unchanged = false;
        self
    }

    /// Enable or disable page markers.
    pub fn with_page_markers(mut self, enabled: bool) -> Self {
        self.page_markers = enabled;
        self
    }

    /// Enable or disable the summary line.
    pub fn with_summary(mut self, enabled: bool) -> Self {
        self.summary = enabled;
        self
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            show_unchanged: true,
            page_markers: true,
            summary: true,
        }
    }
}

/// Convert a comparison report to plain text.
pub fn to_text(report: &CompareReport, options: &TextOptions) -> Result<String> {
    let mut out = String::new();
    render(&mut out, report, options)
        .map_err(|e| Error::Render(format!("text formatting error: {}", e)))?;
    Ok(out)
}

fn render(out: &mut String, report: &CompareReport, options: &TextOptions) -> std::fmt::Result {
    let mut last_left = None;
    let mut last_right = None;

    for pair in &report.pairs {
        if !pair.has_diff && !options.show_unchanged {
            continue;
        }

        if options.page_markers {
            if let Some(page) = pair.left_page().filter(|p| Some(*p) != last_left) {
                writeln!(out, "--- left page {}", page + 1)?;
                last_left = Some(page);
            }
            if let Some(page) = pair.right_page().filter(|p| Some(*p) != last_right) {
                writeln!(out, "+++ right page {}", page + 1)?;
                last_right = Some(page);
            }
        }

        if pair.has_diff {
            if pair.left.is_some() {
                writeln!(out, "- {}", marked_side(pair, DiffKind::Delete))?;
            }
            if pair.right.is_some() {
                writeln!(out, "+ {}", marked_side(pair, DiffKind::Insert))?;
            }
        } else {
            let text = if pair.left.is_some() {
                pair.left_text()
            } else {
                pair.right_text()
            };
            writeln!(out, "  {}", text)?;
        }
    }

    if options.summary {
        let stats = &report.stats;
        writeln!(
            out,
            "Added: {}, Removed: {}, Total: {}, Changed paragraphs: {}",
            stats.added, stats.removed, stats.total, stats.changed_pairs
        )?;
    }
    Ok(())
}

/// One side's text with its own edits marked inline.
fn marked_side(pair: &AlignedPair, side: DiffKind) -> String {
    let mut text = String::new();
    for op in &pair.diffs {
        match op.kind {
            DiffKind::Equal => text.push_str(&op.text),
            kind if kind == side => {
                let (open, close) = match side {
                    DiffKind::Delete => ("[-", "-]"),
                    _ => ("{+", "+}"),
                };
                text.push_str(open);
                text.push_str(&op.text);
                text.push_str(close);
            }
            _ => {}
        }
    }
    text
}
