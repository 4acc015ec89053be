//! Parsing options and configuration.

use crate::model::PageSize;

/// Options for parsing layout JSON documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Page size used when a page carries no usable `page_size`
    pub default_page_size: PageSize,

    /// Fail on a top-level shape problem instead of yielding an empty document
    pub error_mode: ErrorMode,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback page size.
    pub fn with_default_page_size(mut self, size: PageSize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (a missing `pdf_info` yields an empty document).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_page_size: PageSize::default(),
            error_mode: ErrorMode::Lenient,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Reject documents without a `pdf_info` page list
    Strict,
    /// Treat a missing or ill-typed `pdf_info` as zero pages
    #[default]
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .with_default_page_size(PageSize::new(612.0, 792.0))
            .with_error_mode(ErrorMode::Strict);

        assert_eq!(options.default_page_size, PageSize::new(612.0, 792.0));
        assert_eq!(options.error_mode, ErrorMode::Strict);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.default_page_size, PageSize::new(595.0, 842.0));
        assert_eq!(options.error_mode, ErrorMode::Lenient);
    }
}
