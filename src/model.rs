//! Declaration model: a filtered, lazy view over the provider's tree.
//!
//! Walks namespaces depth-first and yields the classes and free functions
//! defined in the requested file and inside an allowed namespace. Nodes
//! without a defining file are skipped silently.

use crate::ast::{Node, NodeKind, TranslationUnit};

/// Which declarations a run covers.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Defining file; `None` accepts every located node.
    pub file: Option<String>,
    /// Namespace allow-list; empty accepts every namespace.
    pub namespaces: Vec<String>,
}

impl Filter {
    /// Restrict to the unit's own file unless an explicit file is given.
    pub fn for_unit(unit: &TranslationUnit, file: Option<&str>, namespaces: &[String]) -> Filter {
        Filter {
            file: Some(file.unwrap_or(&unit.file).to_string()),
            namespaces: namespaces.to_vec(),
        }
    }

    fn keeps(&self, node: &Node, namespace: &[&str]) -> bool {
        let Some(file) = node.file.as_deref() else {
            log::debug!("skipping {} without a source location", node.spelling);
            return false;
        };
        if let Some(wanted) = self.file.as_deref() {
            if file != wanted {
                return false;
            }
        }
        self.keeps_namespace(namespace)
    }

    /// Matches when any traversed namespace, or the full path, is allowed.
    fn keeps_namespace(&self, namespace: &[&str]) -> bool {
        if self.namespaces.is_empty() {
            return true;
        }
        let joined = namespace.join("::");
        self.namespaces
            .iter()
            .any(|ns| *ns == joined || namespace.contains(&ns.as_str()))
    }
}

/// A declaration together with its enclosing context.
#[derive(Debug, Clone)]
pub struct Decl<'a> {
    pub node: &'a Node,
    /// Enclosing namespaces, outermost first.
    pub namespace: Vec<&'a str>,
    /// Class whose page owns this declaration (methods and friends).
    pub class: Option<&'a Node>,
    pub is_friend: bool,
}

impl<'a> Decl<'a> {
    fn top_level(node: &'a Node, namespace: Vec<&'a str>) -> Decl<'a> {
        Decl {
            node,
            namespace,
            class: None,
            is_friend: false,
        }
    }

    pub fn spelling(&self) -> &'a str {
        &self.node.spelling
    }

    /// Scopes a type spelled inside this declaration may be qualified with:
    /// namespaces, plus the class for members.
    pub fn scope(&self) -> Vec<&'a str> {
        let mut scope = self.namespace.clone();
        if let (Some(class), false) = (self.class, self.is_friend) {
            scope.push(&class.spelling);
        }
        scope
    }

    /// `a::b::Class::name` for members, `a::b::name` otherwise.
    pub fn qualified_name(&self) -> String {
        let mut parts = self.scope();
        parts.push(self.spelling());
        parts.join("::")
    }

    /// Qualified name of the owning class, if any.
    pub fn qualified_class(&self) -> Option<String> {
        self.class.map(|class| {
            let mut parts = self.namespace.clone();
            parts.push(&class.spelling);
            parts.join("::")
        })
    }

    pub fn namespace_path(&self) -> String {
        self.namespace.join("::")
    }

    // -- Class parts ----------------------------------------------------------

    /// Public data members of a class.
    pub fn members(&self) -> impl Iterator<Item = &'a Node> {
        self.children_of(NodeKind::Member)
    }

    /// Public member type aliases of a class.
    pub fn usings(&self) -> impl Iterator<Item = &'a Node> {
        self.children_of(NodeKind::Using)
    }

    /// Public methods and constructors of a class, in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = Decl<'a>> + '_ {
        let class = self.node;
        self.children_of(NodeKind::Method).map(move |node| Decl {
            node,
            namespace: self.namespace.clone(),
            class: Some(class),
            is_friend: false,
        })
    }

    /// Friend functions declared by a class.
    pub fn friends(&self) -> impl Iterator<Item = Decl<'a>> + '_ {
        let class = self.node;
        class.friends.iter().map(move |node| Decl {
            node,
            namespace: self.namespace.clone(),
            class: Some(class),
            is_friend: true,
        })
    }

    fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &'a Node> {
        let node: &'a Node = self.node;
        node.children
            .iter()
            .filter(move |c| c.kind == kind && c.is_public())
    }
}

/// Lazy depth-first iterator over filtered classes and free functions.
pub struct Declarations<'a> {
    wanted: &'a Filter,
    stack: Vec<(&'a Node, Vec<&'a str>)>,
}

impl<'a> Declarations<'a> {
    pub fn new(root: &'a Node, filter: &'a Filter) -> Declarations<'a> {
        let mut namespace = Vec::new();
        if root.kind == NodeKind::Namespace && !root.spelling.is_empty() {
            namespace.push(root.spelling.as_str());
        }
        let stack = root
            .children
            .iter()
            .rev()
            .map(|child| (child, namespace.clone()))
            .collect();
        Declarations {
            wanted: filter,
            stack,
        }
    }

    pub fn classes(self) -> impl Iterator<Item = Decl<'a>> {
        self.filter(|d| d.node.kind == NodeKind::Class)
    }

    pub fn functions(self) -> impl Iterator<Item = Decl<'a>> {
        self.filter(|d| d.node.kind == NodeKind::Function)
    }
}

impl<'a> Iterator for Declarations<'a> {
    type Item = Decl<'a>;

    fn next(&mut self) -> Option<Decl<'a>> {
        while let Some((node, namespace)) = self.stack.pop() {
            match node.kind {
                NodeKind::Namespace => {
                    let mut inner = namespace.clone();
                    if !node.spelling.is_empty() {
                        inner.push(node.spelling.as_str());
                    }
                    self.stack
                        .extend(node.children.iter().rev().map(|c| (c, inner.clone())));
                }
                NodeKind::Class | NodeKind::Function => {
                    if self.wanted.keeps(node, &namespace) {
                        return Some(Decl::top_level(node, namespace));
                    }
                }
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Access;

    fn located(kind: NodeKind, name: &str, file: &str) -> Node {
        let mut node = Node::new(kind, name);
        node.file = Some(file.to_string());
        node
    }

    fn tree() -> Node {
        let mut inner = Node::new(NodeKind::Namespace, "detail");
        inner.children.push(located(NodeKind::Class, "Hidden", "a.hpp"));

        let mut outer = Node::new(NodeKind::Namespace, "lib");
        outer.children.push(located(NodeKind::Class, "Foo", "a.hpp"));
        outer.children.push(located(NodeKind::Function, "make_foo", "a.hpp"));
        outer.children.push(located(NodeKind::Class, "Other", "b.hpp"));
        outer.children.push(Node::new(NodeKind::Class, "Unlocated"));
        outer.children.push(inner);

        let mut root = Node::new(NodeKind::Namespace, "");
        root.children.push(outer);
        root.children.push(located(NodeKind::Function, "global", "a.hpp"));
        root
    }

    fn names<'a>(it: impl Iterator<Item = Decl<'a>>) -> Vec<String> {
        it.map(|d| d.qualified_name()).collect()
    }

    #[test]
    fn filters_by_file_in_declaration_order() {
        let root = tree();
        let filter = Filter {
            file: Some("a.hpp".into()),
            namespaces: vec![],
        };
        assert_eq!(
            names(Declarations::new(&root, &filter)),
            ["lib::Foo", "lib::make_foo", "lib::detail::Hidden", "global"]
        );
    }

    #[test]
    fn filters_by_any_traversed_namespace() {
        let root = tree();
        let filter = Filter {
            file: Some("a.hpp".into()),
            namespaces: vec!["detail".into()],
        };
        assert_eq!(names(Declarations::new(&root, &filter)), ["lib::detail::Hidden"]);

        let filter = Filter {
            file: Some("a.hpp".into()),
            namespaces: vec!["lib".into()],
        };
        assert_eq!(
            names(Declarations::new(&root, &filter).classes()),
            ["lib::Foo", "lib::detail::Hidden"]
        );
    }

    #[test]
    fn unlocated_nodes_are_skipped() {
        let root = tree();
        let filter = Filter::default();
        let all = names(Declarations::new(&root, &filter));
        assert!(!all.iter().any(|n| n.contains("Unlocated")));
        assert!(all.contains(&"lib::Other".to_string()));
    }

    #[test]
    fn class_parts() {
        let mut class = located(NodeKind::Class, "Foo", "a.hpp");
        let mut x = Node::new(NodeKind::Member, "x");
        x.type_name = Some("double".into());
        let mut secret = Node::new(NodeKind::Member, "secret");
        secret.access = Access::Private;
        class.children.push(x);
        class.children.push(secret);
        class.children.push(Node::new(NodeKind::Method, "bar"));
        class.children.push(Node::new(NodeKind::Using, "value_type"));
        class.friends.push(Node::new(NodeKind::Function, "swap"));

        let decl = Decl::top_level(&class, vec!["lib"]);
        let members: Vec<_> = decl.members().map(|m| m.spelling.as_str()).collect();
        assert_eq!(members, ["x"]);
        assert_eq!(decl.usings().count(), 1);

        let bar = decl.methods().next().unwrap();
        assert_eq!(bar.qualified_name(), "lib::Foo::bar");
        assert_eq!(bar.qualified_class().as_deref(), Some("lib::Foo"));

        let swap = decl.friends().next().unwrap();
        assert_eq!(swap.qualified_name(), "lib::swap");
        assert_eq!(swap.scope(), ["lib"]);
    }
}
