//! Page fragment model and trait-based format dispatch.
//!
//! Page composers build a [`Page`] out of typed [`Block`]s; a [`Renderer`]
//! serializes it. Structure can be checked on the blocks without depending
//! on the exact text of any output format.

pub mod json;
pub mod rst;
pub mod table;

use crate::error::PageError;
use anyhow::{anyhow, Result};
use serde::Serialize;

pub use table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Admonition {
    Note,
    Warning,
}

impl Admonition {
    pub fn directive(self) -> &'static str {
        match self {
            Admonition::Note => "note",
            Admonition::Warning => "warning",
        }
    }
}

/// A `term: text` list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bullet {
    pub term: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Generated-file banner.
    Banner,
    /// Cross-reference target.
    Anchor { name: String },
    Title { text: String },
    Heading { text: String },
    Paragraph { text: String },
    CodeBlock { lines: Vec<String> },
    Admonition { level: Admonition, text: String },
    Figure { file: String, alt: String },
    Bullets { items: Vec<Bullet> },
    Table { table: Table },
    /// Hidden navigation entries for child pages.
    Toctree { entries: Vec<String> },
    /// Example code with its line bounds in the source file.
    Example {
        file: String,
        start: usize,
        end: usize,
        code: Vec<String>,
    },
}

/// One output artifact before serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Output path relative to the output directory, without extension.
    pub path: String,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(path: impl Into<String>) -> Page {
        Page {
            path: path.into(),
            blocks: vec![Block::Banner],
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Blocks following the heading `name`, up to the next heading.
    pub fn section(&self, name: &str) -> &[Block] {
        let Some(start) = self
            .blocks
            .iter()
            .position(|b| matches!(b, Block::Heading { text } if text == name))
        else {
            return &[];
        };
        let rest = &self.blocks[start + 1..];
        let end = rest
            .iter()
            .position(|b| matches!(b, Block::Heading { .. }))
            .unwrap_or(rest.len());
        &rest[..end]
    }
}

/// Trait for rendering a Page into a specific output format.
pub trait Renderer {
    fn render(&self, page: &Page) -> Result<String, PageError>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "rst" => Ok(Box::new(rst::RstRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use rst or json", format)),
    }
}
