//! Page composition: declarations and their docs to [`Page`] fragments.
//!
//! Composers only build blocks; nothing here touches the output directory.
//! A subsection is emitted only when its content is present and non-empty.

pub mod class;
pub mod function;

pub use class::{class_page, ClassScope};
pub use function::function_page;

use crate::ast::Node;
use crate::doc::{DocComment, Entry, Tag};
use crate::error::{ExampleError, PageError};
use crate::example::{self, EXAMPLE_INDENT};
use crate::render::rst::replace_latex;
use crate::render::{Admonition, Block, Bullet, Page};
use crate::xref::XrefIndex;
use std::path::Path;

/// Read-only inputs shared by every page of a run.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub index: &'a XrefIndex,
    /// Directory example files are resolved against.
    pub examples_dir: &'a Path,
}

/// Where an example file name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleSource {
    /// Named by an `@example` tag.
    Tagged,
    /// Derived from the entity name.
    Default,
}

/// Parsed doc of `node`, with the declaration named on failure.
pub(crate) fn doc_of<'n>(node: &'n Node, declaration: &str) -> Result<&'n DocComment, PageError> {
    node.doc().map_err(|source| PageError::Doc {
        declaration: declaration.to_string(),
        source,
    })
}

/// Safe file stem for a page: ASCII alphanumerics and `_` are kept, any
/// other byte becomes `_xHH`.
pub fn page_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for b in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("_x{:02X}", b));
            }
        }
    }
    out
}

/// Cross-reference label of a function page: `Class_name` for members and
/// friends, `name` for free functions.
pub fn function_anchor(class: Option<&str>, name: &str) -> String {
    match class {
        Some(class) => format!("{}_{}", class, name),
        None => name.to_string(),
    }
}

// -- Shared subsections -------------------------------------------------------

pub(crate) fn push_admonitions(page: &mut Page, doc: &DocComment) {
    for (tag, level) in [(Tag::Note, Admonition::Note), (Tag::Warning, Admonition::Warning)] {
        if let Some(text) = doc.elements.text(tag) {
            page.push(Block::Admonition {
                level,
                text: replace_latex(text),
            });
        }
    }
}

pub(crate) fn push_figure(page: &mut Page, doc: &DocComment) {
    if let Some(figure) = doc.elements.figure() {
        page.push(Block::Figure {
            file: figure.file.clone(),
            alt: figure.alt.clone(),
        });
    }
}

/// Heading plus one bullet per entry; nothing at all without entries.
pub(crate) fn push_entries(page: &mut Page, heading: &str, entries: &[Entry]) {
    if entries.is_empty() {
        return;
    }
    page.push(Block::Heading {
        text: heading.to_string(),
    });
    page.push(Block::Bullets {
        items: entries
            .iter()
            .map(|e| Bullet {
                term: e.name.clone(),
                text: replace_latex(&e.description),
            })
            .collect(),
    });
}

/// Example section for `file_name`, resolved against the examples directory.
///
/// A missing file omits the section; a file without code does too. A
/// structurally broken file aborts the page.
pub(crate) fn example_blocks(
    ctx: &PageContext<'_>,
    declaration: &str,
    file_name: &str,
    source: ExampleSource,
) -> Result<Vec<Block>, PageError> {
    let path = ctx.examples_dir.join(file_name);
    let slice = match example::extract(&path, EXAMPLE_INDENT) {
        Ok(slice) => slice,
        Err(ExampleError::MissingExampleFile { path }) => {
            match source {
                ExampleSource::Tagged => log::warn!(
                    "{}: example file {} not found, section omitted",
                    declaration,
                    path.display()
                ),
                ExampleSource::Default => {
                    log::debug!("{}: no example at {}", declaration, path.display())
                }
            }
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(PageError::Example {
                declaration: declaration.to_string(),
                source,
            })
        }
    };
    if slice.is_empty() {
        return Ok(Vec::new());
    }

    let mut blocks = vec![Block::Heading {
        text: "Example".to_string(),
    }];
    if !slice.leading.is_empty() {
        blocks.push(Block::Paragraph {
            text: replace_latex(&slice.leading),
        });
    }
    blocks.push(Block::Example {
        file: file_name.to_string(),
        start: slice.start,
        end: slice.end,
        code: slice.code,
    });
    if !slice.trailing.is_empty() {
        blocks.push(Block::Paragraph {
            text: replace_latex(&slice.trailing),
        });
    }
    Ok(blocks)
}
