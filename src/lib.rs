//! declgen: reference pages and binding scaffolds from C++ declaration trees.
//!
//! The AST provider serializes each parsed translation unit to JSON
//! ([`ast::TranslationUnit`]). From there, [`model`] yields the documented
//! classes and functions, [`page`] composes their pages out of [`doc`],
//! [`synopsis`] and [`example`] parts, and [`render`] writes them out.
//! [`scaffold`] emits `h5_write`/`h5_read` pairs for the same classes.

pub mod ast;
pub mod doc;
pub mod error;
pub mod example;
pub mod model;
pub mod overload;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod scaffold;
pub mod synopsis;
pub mod xref;
