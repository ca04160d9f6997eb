//! Synopsis builder: one prototype per declaration.
//!
//! A prototype is an optional template header followed by
//! `result name(params) qualifiers`. Types lose the declaration's own scope
//! qualification, and a type whose decayed spelling is documented becomes a
//! cross-reference. Parameters wrap greedily at [`MAX_WIDTH`] columns onto
//! continuation lines indented by [`WRAP_INDENT`].

use crate::ast::{Node, Param, TemplateParam};
use crate::model::Decl;
use crate::xref::XrefIndex;
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_WIDTH: usize = 120;
pub const WRAP_INDENT: usize = 9;

static RE_ENABLE_IF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*typename\s+std\d*::enable_if<(.*),(.*)>::type\s*$").unwrap()
});

const DECAY_TOKENS: &[&str] = &["const ", "const&", "&&", "&"];

// -- Types --------------------------------------------------------------------

/// Strip `const`/reference qualifiers so the bare type can be looked up.
pub fn decay(type_name: &str) -> String {
    let mut s = type_name.to_string();
    for tok in DECAY_TOKENS {
        s = s.replace(tok, "");
    }
    s.trim().to_string()
}

/// Remove qualification by the enclosing scopes: for `a::b::C`, the prefixes
/// `a::b::C::`, `a::b::` and `a::` in that order.
pub fn strip_scope(type_name: &str, scope: &[&str]) -> String {
    let mut s = type_name.to_string();
    for depth in (1..=scope.len()).rev() {
        let prefix = format!("{}::", scope[..depth].join("::"));
        s = remove_qualifier(&s, &prefix);
    }
    s
}

/// Remove `prefix` wherever it starts a name (not preceded by an identifier
/// character or `:`).
fn remove_qualifier(s: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find(prefix) {
        let starts_name = rest[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == ':'));
        out.push_str(&rest[..pos]);
        if !starts_name {
            out.push_str(prefix);
        }
        rest = &rest[pos + prefix.len()..];
    }
    out.push_str(rest);
    out
}

/// Wrap the decayed type in a cross-reference when it is documented.
fn link_type(type_name: &str, index: &XrefIndex) -> String {
    let bare = decay(type_name);
    match index.anchor(&bare) {
        Some(anchor) if !bare.is_empty() => {
            type_name.replacen(&bare, &format!(":ref:`{} <{}>`", bare, anchor), 1)
        }
        _ => type_name.to_string(),
    }
}

fn render_type(type_name: &str, scope: &[&str], index: &XrefIndex) -> String {
    link_type(&strip_scope(type_name, scope), index)
}

fn render_result_type(type_name: &str, scope: &[&str], index: &XrefIndex) -> String {
    let stripped = strip_scope(type_name, scope);
    match RE_ENABLE_IF.captures(&stripped) {
        Some(caps) => format!(
            "requires({}) {}",
            caps[1].trim(),
            link_type(caps[2].trim(), index)
        ),
        None => link_type(&stripped, index),
    }
}

fn render_param(param: &Param, scope: &[&str], index: &XrefIndex) -> String {
    let mut out = render_type(&param.type_name, scope, index);
    if !param.name.is_empty() {
        out.push(' ');
        out.push_str(&param.name);
    }
    if let Some(ref default) = param.default {
        out.push_str(" = ");
        out.push_str(default);
    }
    out
}

// -- Prototypes ---------------------------------------------------------------

/// `template<typename T, int N = 3>`, or `None` without template parameters.
pub fn template_header(params: &[TemplateParam]) -> Option<String> {
    if params.is_empty() {
        return None;
    }
    let args: Vec<String> = params
        .iter()
        .map(|p| match p.default.as_deref() {
            Some(d) if !d.is_empty() => format!("{} {} = {}", p.kind, p.name, d),
            _ => format!("{} {}", p.kind, p.name),
        })
        .collect();
    Some(format!("template<{}>", args.join(", ")))
}

/// Pieces of a callable's prototype before wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    pub template: Option<String>,
    /// Everything up to and including the opening parenthesis.
    pub head: String,
    pub params: Vec<String>,
    /// Closing parenthesis and trailing qualifiers.
    pub tail: String,
}

impl Prototype {
    pub fn of(decl: &Decl<'_>, index: &XrefIndex) -> Prototype {
        let node = decl.node;
        let scope = decl.scope();

        let mut head = String::new();
        if node.is_static {
            head.push_str("static ");
        }
        if node.is_constructor {
            head.push_str(constructor_name(&node.spelling));
        } else {
            if let Some(ref rt) = node.result_type {
                head.push_str(&render_result_type(rt, &scope, index));
                head.push(' ');
            }
            head.push_str(&node.spelling);
        }
        head.push('(');

        let mut tail = String::from(")");
        if node.is_const {
            tail.push_str(" const");
        }
        if node.is_noexcept {
            tail.push_str(" noexcept");
        }

        Prototype {
            template: template_header(&node.template_params),
            head,
            params: node
                .params
                .iter()
                .map(|p| render_param(p, &scope, index))
                .collect(),
            tail,
        }
    }

    /// Render with an optional `(n) ` label, wrapping the parameter list.
    pub fn render(&self, label: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line = String::from(label);
        if let Some(ref template) = self.template {
            line.push_str(template);
            lines.push(line);
            line = " ".repeat(width(label));
        }
        line.push_str(&self.head);

        let mut on_continuation = false;
        let mut has_param = false;
        for (i, param) in self.params.iter().enumerate() {
            let trailer = if i + 1 == self.params.len() {
                self.tail.as_str()
            } else {
                ","
            };
            let needed = width(&line) + usize::from(has_param) + width(param) + width(trailer);
            let fresh_continuation = on_continuation && !has_param;
            if needed > MAX_WIDTH && !fresh_continuation {
                lines.push(line);
                line = " ".repeat(WRAP_INDENT);
                on_continuation = true;
                has_param = false;
            }
            if has_param {
                line.push(' ');
            }
            line.push_str(param);
            line.push_str(trailer);
            has_param = true;
        }
        if self.params.is_empty() {
            line.push_str(&self.tail);
        }
        lines.push(line);
        lines
    }
}

/// Constructor names drop template arguments: `Foo<T>` renders as `Foo`.
fn constructor_name(spelling: &str) -> &str {
    spelling.split('<').next().unwrap_or(spelling)
}

fn width(s: &str) -> usize {
    s.chars().count()
}

/// Synopsis lines for an overload set; overloads are separated by a blank
/// line and numbered `(n)` only when there are several.
pub fn overload_synopsis(overloads: &[Decl<'_>], index: &XrefIndex) -> Vec<String> {
    let numbered = overloads.len() > 1;
    let mut lines = Vec::new();
    for (n, decl) in overloads.iter().enumerate() {
        if n > 0 {
            lines.push(String::new());
        }
        let label = if numbered {
            format!("({}) ", n + 1)
        } else {
            String::new()
        };
        lines.extend(Prototype::of(decl, index).render(&label));
    }
    lines
}

/// `template<typename T> class Foo;`
pub fn class_synopsis(class: &Node) -> String {
    match template_header(&class.template_params) {
        Some(header) => format!("{} class {};", header, class.spelling),
        None => format!("class {};", class.spelling),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    fn tparam(kind: &str, name: &str, default: Option<&str>) -> TemplateParam {
        TemplateParam {
            kind: kind.into(),
            name: name.into(),
            default: default.map(Into::into),
        }
    }

    fn param(ty: &str, name: &str) -> Param {
        Param {
            type_name: ty.into(),
            name: name.into(),
            default: None,
        }
    }

    fn decl<'a>(node: &'a Node, namespace: Vec<&'a str>) -> Decl<'a> {
        Decl {
            node,
            namespace,
            class: None,
            is_friend: false,
        }
    }

    #[test]
    fn header_with_defaults() {
        let params = [tparam("typename", "T", None), tparam("int", "N", Some("3"))];
        assert_eq!(
            template_header(&params).as_deref(),
            Some("template<typename T, int N = 3>")
        );
        assert_eq!(template_header(&[]), None);
    }

    #[test]
    fn decay_removes_qualifiers() {
        assert_eq!(decay("const Foo &"), "Foo");
        assert_eq!(decay("Foo const&"), "Foo");
        assert_eq!(decay("Foo&&"), "Foo");
        assert_eq!(decay("const_iterator"), "const_iterator");
    }

    #[test]
    fn strips_only_whole_qualifiers() {
        assert_eq!(strip_scope("lib::Foo const &", &["lib"]), "Foo const &");
        assert_eq!(strip_scope("mylib::X", &["lib"]), "mylib::X");
        assert_eq!(
            strip_scope("std::vector<lib::Foo::value_type>", &["lib", "Foo"]),
            "std::vector<value_type>"
        );
    }

    #[test]
    fn documented_types_are_linked_after_decay() {
        let foo = Node::new(NodeKind::Class, "Foo");
        let classes = vec![decl(&foo, vec![])];
        let index = XrefIndex::build(&classes);
        assert_eq!(link_type("const Foo &", &index), "const :ref:`Foo <Foo>` &");
        assert_eq!(link_type("Bar", &index), "Bar");
    }

    #[test]
    fn simple_method() {
        let mut node = Node::new(NodeKind::Method, "bar");
        node.result_type = Some("int".into());
        node.is_const = true;
        node.params.push(Param {
            default: Some("3".into()),
            ..param("int", "n")
        });
        let proto = Prototype::of(&decl(&node, vec![]), &XrefIndex::default());
        assert_eq!(proto.render(""), ["int bar(int n = 3) const"]);
    }

    #[test]
    fn constructor_drops_result_and_template_args() {
        let mut node = Node::new(NodeKind::Method, "Foo<T>");
        node.is_constructor = true;
        node.result_type = Some("void".into());
        node.params.push(param("double", "x"));
        let proto = Prototype::of(&decl(&node, vec![]), &XrefIndex::default());
        assert_eq!(proto.render(""), ["Foo(double x)"]);
    }

    #[test]
    fn static_noexcept_and_template() {
        let mut node = Node::new(NodeKind::Function, "make");
        node.result_type = Some("lib::Foo".into());
        node.is_static = true;
        node.is_noexcept = true;
        node.template_params.push(tparam("typename", "T", None));
        let proto = Prototype::of(&decl(&node, vec!["lib"]), &XrefIndex::default());
        assert_eq!(
            proto.render("(2) "),
            ["(2) template<typename T>", "    static Foo make() noexcept"]
        );
    }

    #[test]
    fn enable_if_becomes_requires() {
        let mut node = Node::new(NodeKind::Function, "f");
        node.result_type = Some("typename std::enable_if<is_good<T>, int>::type".into());
        let proto = Prototype::of(&decl(&node, vec![]), &XrefIndex::default());
        assert_eq!(proto.head, "requires(is_good<T>) int f(");
    }

    #[test]
    fn short_parameter_list_stays_on_one_line() {
        let mut node = Node::new(NodeKind::Function, "f");
        node.result_type = Some("void".into());
        node.params = vec![param("int", "a"), param("double", "b")];
        let proto = Prototype::of(&decl(&node, vec![]), &XrefIndex::default());
        assert_eq!(proto.render(""), ["void f(int a, double b)"]);
    }

    #[test]
    fn long_parameter_list_wraps_within_budget() {
        let mut node = Node::new(NodeKind::Function, "f");
        node.result_type = Some("void".into());
        node.params = (0..12)
            .map(|i| param("std::vector<double>", &format!("argument_{:02}", i)))
            .collect();
        let proto = Prototype::of(&decl(&node, vec![]), &XrefIndex::default());
        let lines = proto.render("");

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= MAX_WIDTH));
        assert!(lines[0].starts_with("void f(std::vector<double> argument_00,"));
        assert!(lines[1..].iter().all(|l| l.starts_with("         std")));
        assert!(lines.iter().all(|l| !l.ends_with(' ')));

        let single = format!("void f({})", proto.params.join(", "));
        assert_eq!(lines.join("\n").replace(",\n         ", ", "), single);
    }

    #[test]
    fn over_long_parameter_gets_its_own_line() {
        let long_type = format!("std::map<{}>", "x".repeat(130));
        let mut node = Node::new(NodeKind::Function, "f");
        node.result_type = Some("void".into());
        node.params = vec![param("int", "a"), param(&long_type, "m"), param("int", "b")];
        let proto = Prototype::of(&decl(&node, vec![]), &XrefIndex::default());
        let lines = proto.render("");
        assert_eq!(lines[0], "void f(int a,");
        assert_eq!(lines[1], format!("         {} m,", long_type));
        assert_eq!(lines[2], "         int b)");
    }

    #[test]
    fn numbered_overloads() {
        let mut a = Node::new(NodeKind::Function, "f");
        a.result_type = Some("int".into());
        let mut b = Node::new(NodeKind::Function, "f");
        b.result_type = Some("int".into());
        b.params.push(param("int", "n"));
        let decls = vec![decl(&a, vec![]), decl(&b, vec![])];
        assert_eq!(
            overload_synopsis(&decls, &XrefIndex::default()),
            ["(1) int f()", "", "(2) int f(int n)"]
        );
        assert_eq!(
            overload_synopsis(&decls[..1], &XrefIndex::default()),
            ["int f()"]
        );
    }

    #[test]
    fn class_synopsis_with_template() {
        let mut node = Node::new(NodeKind::Class, "Foo");
        assert_eq!(class_synopsis(&node), "class Foo;");
        node.template_params.push(tparam("typename", "T", None));
        assert_eq!(class_synopsis(&node), "template<typename T> class Foo;");
    }
}
