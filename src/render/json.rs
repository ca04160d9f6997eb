//! JSON renderer: the fragment model as structured output.
//!
//! Useful for custom rendering pipelines and for checking page structure.

use super::{Page, Renderer};
use crate::error::PageError;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, page: &Page) -> Result<String, PageError> {
        let mut out = serde_json::to_string_pretty(page).map_err(|source| PageError::Render {
            path: page.path.clone(),
            source,
        })?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
