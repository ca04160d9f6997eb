//! reStructuredText renderer.
//!
//! Every block renders to one or more lines ending in a newline; blocks are
//! separated by a single blank line.

use super::{Block, Page, Renderer};
use crate::error::PageError;
use regex::Regex;
use std::sync::LazyLock;

pub struct RstRenderer;

const BANNER: &str = "..\n   Generated automatically by declgen\n\n.. highlight:: c\n";

const CODE_INDENT: &str = "    ";

static RE_INLINE_MATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([^$\n]+)\$").unwrap());

impl Renderer for RstRenderer {
    fn render(&self, page: &Page) -> Result<String, PageError> {
        Ok(page
            .blocks
            .iter()
            .map(render_block)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn file_extension(&self) -> &str {
        "rst"
    }
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Banner => BANNER.to_string(),
        Block::Anchor { name } => format!(".. _{}:\n", name),
        Block::Title { text } => underline(text, '='),
        Block::Heading { text } => underline(text, '-'),
        Block::Paragraph { text } => format!("{}\n", text.trim_end()),
        Block::CodeBlock { lines } => {
            let mut out = String::from(".. code-block:: c\n\n");
            push_indented(&mut out, lines.iter().map(String::as_str));
            out
        }
        Block::Admonition { level, text } => {
            let mut out = format!(".. {}::\n\n", level.directive());
            push_indented(&mut out, text.lines());
            out
        }
        Block::Figure { file, alt } => format!(
            ".. figure:: {}\n   :alt: {}\n   :align: center\n\n   {}\n",
            file, alt, alt
        ),
        Block::Bullets { items } => items
            .iter()
            .map(|b| format!("* **{}**: {}\n", b.term, b.text))
            .collect(),
        Block::Table { table } => table
            .render_grid()
            .iter()
            .map(|l| format!("{}\n", l))
            .collect(),
        Block::Toctree { entries } => {
            let mut out = String::from(".. toctree::\n    :hidden:\n\n");
            push_indented(&mut out, entries.iter().map(String::as_str));
            out
        }
        Block::Example {
            file,
            start,
            end,
            code,
        } => {
            let mut out = format!(
                ".. example:: {}\n    :linenos: {},{}\n\n",
                file, start, end
            );
            for line in code {
                out.push_str(line);
                out.push('\n');
            }
            out
        }
    }
}

fn underline(text: &str, fill: char) -> String {
    format!(
        "{}\n{}\n",
        text,
        fill.to_string().repeat(text.chars().count())
    )
}

fn push_indented<'a>(out: &mut String, lines: impl Iterator<Item = &'a str>) {
    for line in lines {
        if !line.is_empty() {
            out.push_str(CODE_INDENT);
            out.push_str(line);
        }
        out.push('\n');
    }
}

// -- Text helpers -------------------------------------------------------------

/// `$x^2$` becomes :math:`x^2`.
pub fn replace_latex(text: &str) -> String {
    RE_INLINE_MATH.replace_all(text, ":math:`$1`").into_owned()
}

/// Escape `<` and `>`, which are special inside reference roles.
pub fn escape_angle(text: &str) -> String {
    text.replace('<', "\\<").replace('>', "\\>")
}

/// `:ref:` role pointing at `target`.
pub fn reference(label: &str, target: &str) -> String {
    format!(":ref:`{} <{}>`", escape_angle(label), escape_angle(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Admonition, Bullet, Table};

    fn render(blocks: Vec<Block>) -> String {
        RstRenderer
            .render(&Page {
                path: "p".into(),
                blocks,
            })
            .unwrap()
    }

    #[test]
    fn title_and_heading_underlines() {
        assert_eq!(
            render(vec![
                Block::Title { text: "lib::Foo".into() },
                Block::Heading { text: "Parameters".into() },
            ]),
            "lib::Foo\n========\n\nParameters\n----------\n"
        );
    }

    #[test]
    fn code_block_is_indented() {
        assert_eq!(
            render(vec![Block::CodeBlock {
                lines: vec!["int f()".into(), "".into(), "int g()".into()]
            }]),
            ".. code-block:: c\n\n    int f()\n\n    int g()\n"
        );
    }

    #[test]
    fn admonition_and_bullets() {
        assert_eq!(
            render(vec![
                Block::Admonition {
                    level: Admonition::Note,
                    text: "careful".into()
                },
                Block::Bullets {
                    items: vec![Bullet {
                        term: "n".into(),
                        text: "description".into()
                    }]
                },
            ]),
            ".. note::\n\n    careful\n\n* **n**: description\n"
        );
    }

    #[test]
    fn figure_uses_alt_as_caption() {
        let out = render(vec![Block::Figure {
            file: "f.png".into(),
            alt: "alt text".into(),
        }]);
        assert_eq!(
            out,
            ".. figure:: f.png\n   :alt: alt text\n   :align: center\n\n   alt text\n"
        );
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert_eq!(
            render(vec![Block::Table {
                table: Table::new(&["A"])
            }]),
            ""
        );
    }

    #[test]
    fn example_directive() {
        let out = render(vec![Block::Example {
            file: "Foo.cpp".into(),
            start: 2,
            end: 4,
            code: vec!["    a();".into(), "    b();".into()],
        }]);
        assert_eq!(
            out,
            ".. example:: Foo.cpp\n    :linenos: 2,4\n\n    a();\n    b();\n"
        );
    }

    #[test]
    fn latex_and_escaping() {
        assert_eq!(replace_latex("value $x^2$ here"), "value :math:`x^2` here");
        assert_eq!(replace_latex("cost $5"), "cost $5");
        assert_eq!(reference("f<T>", "Foo_f<T>"), ":ref:`f\\<T\\> <Foo_f\\<T\\>>`");
    }
}
