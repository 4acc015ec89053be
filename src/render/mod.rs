//! Rendering of comparison reports to output formats.

mod json;
mod text;

pub use json::{to_json, value_to_json, JsonFormat};
pub use text::{to_text, TextOptions};
