//! Layout JSON parsing module.

mod layout_parser;
mod options;

pub use layout_parser::LayoutParser;
pub use options::{ErrorMode, ParseOptions};

/// Load a layout JSON file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<std::path::Path>>(
    path: P,
    options: ParseOptions,
) -> crate::Result<crate::model::Document> {
    let data = tokio::fs::read(path.as_ref()).await?;
    LayoutParser::from_bytes_with_options(&data, options)?.parse()
}
