//! Error kinds raised while turning declarations into artifacts.
//!
//! Page-local gaps (absent tags, missing example files) are not errors; they
//! degrade by omitting a subsection. The types here cover what aborts a single
//! artifact ([`PageError`]) or the whole run ([`ProviderError`]).

use std::path::PathBuf;
use thiserror::Error;

/// Malformed content inside a doc comment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    /// `@figure` content must be `file:alt text` with exactly one colon.
    #[error("malformed @figure tag '{content}': expected exactly one ':' between file name and alt text")]
    MalformedFigureTag { content: String },
}

/// Failures while slicing an example source file.
#[derive(Error, Debug)]
pub enum ExampleError {
    #[error("example file {} does not exist", .path.display())]
    MissingExampleFile { path: PathBuf },

    /// A comment line sits between two code lines.
    #[error("example file {}: code region is not contiguous (comment at line {line})", .path.display())]
    NonContiguousCodeRegion { path: PathBuf, line: usize },

    #[error("failed to read example file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Aborts generation of one page; sibling pages proceed.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("{declaration}: {source}")]
    Doc {
        declaration: String,
        #[source]
        source: DocError,
    },

    #[error("{declaration}: {source}")]
    Example {
        declaration: String,
        #[source]
        source: ExampleError,
    },

    /// Another declaration of the run already produced a page at `path`.
    #[error("{declaration}: page {path} is already generated for {first}")]
    DuplicatePage {
        declaration: String,
        path: String,
        first: String,
    },

    #[error("failed to serialize page {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The declaration tree could not be obtained; fatal for the run.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("failed to read declaration tree {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed declaration tree {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
