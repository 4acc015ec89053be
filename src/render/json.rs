//! JSON rendering for comparison reports.

use serde::Serialize;

use crate::compare::CompareReport;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a comparison report to JSON.
pub fn to_json(report: &CompareReport, format: JsonFormat) -> Result<String> {
    value_to_json(report, format)
}

/// Serialize any output value (paragraph lists, annotation maps) the same way.
pub fn value_to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
