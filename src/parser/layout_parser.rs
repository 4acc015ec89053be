//! Layout JSON parser.
//!
//! Reads the `{pdf_info: [{page_idx, page_size, para_blocks}]}` shape emitted
//! by layout-analysis services. Every field below the top level is optional:
//! ill-typed values are dropped rather than rejected.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{BBox, Block, Document, Line, Page, PageSize, Span};

use super::options::{ErrorMode, ParseOptions};

/// Layout JSON document parser.
pub struct LayoutParser {
    root: Value,
    options: ParseOptions,
}

impl LayoutParser {
    /// Open a layout JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a layout JSON file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse layout JSON from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse layout JSON from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let root: Value = serde_json::from_slice(data)?;
        Self::from_value_with_options(root, options)
    }

    /// Parse layout JSON from a string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_bytes(json.as_bytes())
    }

    /// Parse layout JSON from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse layout JSON from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Wrap an already-decoded JSON value.
    pub fn from_value_with_options(root: Value, options: ParseOptions) -> Result<Self> {
        if !root.is_object() {
            return Err(Error::InvalidDocument(format!(
                "expected a JSON object at the top level, found {}",
                json_type_name(&root)
            )));
        }
        Ok(Self { root, options })
    }

    /// Build the document model.
    pub fn parse(&self) -> Result<Document> {
        let pages = match self.root.get("pdf_info") {
            Some(Value::Array(pages)) => pages,
            other => {
                if self.options.error_mode == ErrorMode::Strict {
                    return Err(Error::InvalidDocument(
                        "missing `pdf_info` page list".to_string(),
                    ));
                }
                log::warn!(
                    "Layout JSON has no usable `pdf_info` ({}), treating as empty",
                    other.map(json_type_name).unwrap_or("absent")
                );
                return Ok(Document::new());
            }
        };

        let mut document = Document::new();
        for (position, raw) in pages.iter().enumerate() {
            match RawPage::deserialize(raw) {
                Ok(raw_page) => document.add_page(self.convert_page(raw_page, position)),
                Err(e) => log::debug!("Skipping page entry {}: {}", position, e),
            }
        }

        Ok(document)
    }

    fn convert_page(&self, raw: RawPage, position: usize) -> Page {
        let page_idx = raw.page_idx.unwrap_or(position as u32);
        let page_size = match raw.page_size.as_deref().and_then(PageSize::from_slice) {
            Some(size) => size,
            None => self.options.default_page_size,
        };

        let mut page = Page::new(page_idx, page_size);
        for block in raw.para_blocks {
            page.add_block(convert_block(block));
        }
        page
    }
}

fn convert_block(raw: RawBlock) -> Block {
    let bbox = raw.bbox.as_deref().and_then(BBox::from_slice);
    let kind = raw.kind.unwrap_or_default();

    if !raw.blocks.is_empty() {
        let children = raw.blocks.into_iter().map(convert_block).collect();
        return Block::container(kind, bbox, children);
    }

    let lines = raw
        .lines
        .into_iter()
        .map(|line| {
            Line::new(
                line.spans
                    .into_iter()
                    .map(|span| {
                        Span::new(
                            span.content.unwrap_or_default(),
                            span.bbox.as_deref().and_then(BBox::from_slice),
                        )
                    })
                    .collect(),
            )
        })
        .collect();

    Block::leaf(kind, bbox, lines)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Deserialize)]
struct RawPage {
    #[serde(default, deserialize_with = "lenient_index")]
    page_idx: Option<u32>,
    #[serde(default, deserialize_with = "lenient_coords")]
    page_size: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "lenient_list")]
    para_blocks: Vec<RawBlock>,
}

#[derive(Deserialize)]
struct RawBlock {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_coords")]
    bbox: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "lenient_list")]
    lines: Vec<RawLine>,
    #[serde(default, deserialize_with = "lenient_list")]
    blocks: Vec<RawBlock>,
}

#[derive(Deserialize)]
struct RawLine {
    #[serde(default, deserialize_with = "lenient_list")]
    spans: Vec<RawSpan>,
}

#[derive(Deserialize)]
struct RawSpan {
    #[serde(default, deserialize_with = "lenient_string")]
    content: Option<String>,
    #[serde(default, deserialize_with = "lenient_coords")]
    bbox: Option<Vec<f64>>,
}

/// Array of objects; non-arrays become empty and bad elements are skipped.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::debug!("Dropping malformed layout entry: {}", e);
                None
            }
        })
        .collect())
}

/// Numeric array; anything with a non-numeric entry becomes `None`.
fn lenient_coords<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(Value::as_f64).collect(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_index<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|n| u32::try_from(n).ok()))
}
