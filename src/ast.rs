//! Declaration tree as handed over by the AST provider.
//!
//! The provider serializes one translation unit to JSON; this module only
//! deserializes it. Nodes are read-only once loaded. Each node derives its
//! [`DocComment`] on first access and caches it.

use crate::doc::{self, DocComment};
use crate::error::{DocError, ProviderError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Kind of a declaration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Namespace,
    #[serde(alias = "struct")]
    Class,
    Function,
    Method,
    Member,
    Using,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

/// A function parameter: `type name = default`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub default: Option<String>,
}

/// A template parameter: `kind name = default` (e.g. `typename T`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateParam {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub default: Option<String>,
}

/// One declaration of the tree.
#[derive(Debug, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default)]
    pub spelling: String,
    /// Defining file; `None` for nodes the provider could not locate.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub raw_comment: Option<String>,
    /// Member type or alias target.
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub result_type: Option<String>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub template_params: Vec<TemplateParam>,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_noexcept: bool,
    #[serde(default)]
    pub is_constructor: bool,
    #[serde(default)]
    pub access: Access,
    #[serde(default)]
    pub children: Vec<Node>,
    /// Friend function declarations of a class.
    #[serde(default)]
    pub friends: Vec<Node>,
    #[serde(skip)]
    doc: OnceLock<Result<DocComment, DocError>>,
}

impl Node {
    pub fn new(kind: NodeKind, spelling: impl Into<String>) -> Node {
        Node {
            kind,
            spelling: spelling.into(),
            file: None,
            raw_comment: None,
            type_name: None,
            result_type: None,
            params: Vec::new(),
            template_params: Vec::new(),
            is_const: false,
            is_static: false,
            is_noexcept: false,
            is_constructor: false,
            access: Access::Public,
            children: Vec::new(),
            friends: Vec::new(),
            doc: OnceLock::new(),
        }
    }

    /// Parsed doc comment, computed once per node.
    pub fn doc(&self) -> Result<&DocComment, DocError> {
        self.doc
            .get_or_init(|| doc::parse(self.raw_comment.as_deref().unwrap_or("")))
            .as_ref()
            .map_err(|e| e.clone())
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.kind, NodeKind::Function | NodeKind::Method)
    }

    pub fn is_public(&self) -> bool {
        self.access == Access::Public
    }
}

/// One parsed source file.
#[derive(Debug, Deserialize)]
pub struct TranslationUnit {
    /// Path of the parsed file; the default defining-file filter.
    pub file: String,
    pub root: Node,
}

impl TranslationUnit {
    pub fn from_json(input: &str) -> Result<TranslationUnit, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn load(path: &Path) -> Result<TranslationUnit, ProviderError> {
        let content = fs::read_to_string(path).map_err(|source| ProviderError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ProviderError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
