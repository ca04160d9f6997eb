//! Cross-reference index of documented type names.
//!
//! Built once from every class of the run before any page is rendered, then
//! only read. Lookups never depend on the order classes were visited in.

use crate::model::Decl;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct XrefIndex {
    anchors: BTreeMap<String, String>,
}

impl XrefIndex {
    /// Index every class by its spelling and its qualified name.
    pub fn build<'a, 'b: 'a>(classes: impl IntoIterator<Item = &'a Decl<'b>>) -> XrefIndex {
        let mut anchors = BTreeMap::new();
        for class in classes {
            let anchor = class.spelling().to_string();
            anchors.insert(class.qualified_name(), anchor.clone());
            anchors.insert(anchor.clone(), anchor);
        }
        XrefIndex { anchors }
    }

    /// Page anchor of a documented type name.
    pub fn anchor(&self, type_name: &str) -> Option<&str> {
        self.anchors.get(type_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, NodeKind};

    #[test]
    fn indexes_plain_and_qualified_names() {
        let foo = Node::new(NodeKind::Class, "Foo");
        let decls = vec![Decl {
            node: &foo,
            namespace: vec!["lib"],
            class: None,
            is_friend: false,
        }];
        let index = XrefIndex::build(&decls);
        assert_eq!(index.anchor("Foo"), Some("Foo"));
        assert_eq!(index.anchor("lib::Foo"), Some("Foo"));
        assert_eq!(index.anchor("Bar"), None);
        assert_eq!(index.len(), 2);
    }
}
