//! Binding scaffold generator: paired `h5_write`/`h5_read` functions per class.
//!
//! Every public data member is written once and read back once, in
//! declaration order. Templated classes get the class's template header on
//! both functions, and output is wrapped in the class's namespace.

use crate::model::Decl;
use crate::synopsis::template_header;

const HEADER: &str = "// Generated automatically by declgen\n";

/// Spelling of the class type inside its own scaffold: `Foo<T, N>` for a
/// template, `Foo` otherwise.
fn class_type(class: &Decl<'_>) -> String {
    let node = class.node;
    if node.template_params.is_empty() {
        return node.spelling.clone();
    }
    let args: Vec<&str> = node
        .template_params
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    format!("{}<{}>", node.spelling, args.join(", "))
}

/// One direction of the pair. `verb` is `write` or `read`.
fn io_function(class: &Decl<'_>, verb: &str, out: &mut String) {
    let (argument, open) = match verb {
        "write" => (format!("{} const &x", class_type(class)), "create_group"),
        _ => (format!("{} &x", class_type(class)), "open_group"),
    };
    if let Some(header) = template_header(&class.node.template_params) {
        out.push_str(&header);
        out.push('\n');
    }
    out.push_str(&format!(
        "void h5_{}(h5::group h5group, std::string const &subgroup_name, {}) {{\n",
        verb, argument
    ));
    out.push_str(&format!("  auto gr = h5group.{}(subgroup_name);\n", open));
    for member in class.members() {
        out.push_str(&format!(
            "  h5_{}(gr, \"{}\", x.{});\n",
            verb, member.spelling, member.spelling
        ));
    }
    out.push_str("}\n");
}

/// Scaffold for one class, wrapped in its namespace when it has one.
pub fn class_scaffold(class: &Decl<'_>) -> String {
    let mut body = String::new();
    io_function(class, "write", &mut body);
    body.push('\n');
    io_function(class, "read", &mut body);

    let namespace = class.namespace_path();
    if namespace.is_empty() {
        body
    } else {
        format!(
            "namespace {} {{\n\n{}\n}} // namespace {}\n",
            namespace, body, namespace
        )
    }
}

/// Scaffold for every class of a run, in the order given.
pub fn unit_scaffold<'a>(classes: impl IntoIterator<Item = Decl<'a>>) -> String {
    let mut out = String::from(HEADER);
    for class in classes {
        out.push('\n');
        out.push_str(&class_scaffold(&class));
    }
    out
}
