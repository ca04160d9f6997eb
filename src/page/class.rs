//! Class page: header, synopsis, class docs, member and alias tables, and
//! cross-reference tables for member and friend functions.

use super::{
    doc_of, example_blocks, function_anchor, page_stem, push_admonitions, push_entries,
    push_figure, ExampleSource, PageContext,
};
use crate::doc::{inline_text, Tag};
use crate::error::PageError;
use crate::example::default_file_name;
use crate::model::Decl;
use crate::overload::OverloadSet;
use crate::render::rst::{reference, replace_latex};
use crate::render::{Block, Page, Table};
use crate::synopsis::class_synopsis;

/// Callables owned by one class page: its methods plus its friends, grouped
/// into one overload set so each name gets exactly one function page.
#[derive(Debug, Default)]
pub struct ClassScope<'a> {
    pub overloads: OverloadSet<'a>,
    /// Names with at least one member overload.
    pub methods: Vec<String>,
    /// Names declared only as friends.
    pub friends: Vec<String>,
}

impl<'a> ClassScope<'a> {
    pub fn of(class: &Decl<'a>) -> ClassScope<'a> {
        let overloads = OverloadSet::from_decls(class.methods().chain(class.friends()));
        let (friends, methods): (Vec<String>, Vec<String>) = overloads
            .names()
            .map(str::to_string)
            .partition(|name| {
                overloads
                    .get(name)
                    .is_some_and(|decls| decls.iter().all(|d| d.is_friend))
            });
        ClassScope {
            overloads,
            methods,
            friends,
        }
    }
}

pub fn class_page(
    class: &Decl<'_>,
    scope: &ClassScope<'_>,
    ctx: &PageContext<'_>,
) -> Result<Page, PageError> {
    let node = class.node;
    let declaration = class.qualified_name();
    let doc = doc_of(node, &declaration)?;

    let mut page = Page::new(page_stem(&node.spelling));
    page.push(Block::Anchor {
        name: node.spelling.clone(),
    });
    page.push(Block::Title {
        text: declaration.clone(),
    });
    if let Some(include) = doc.elements.text(Tag::Include) {
        page.push(Block::Paragraph {
            text: format!("Defined in header <*{}*>", include.trim()),
        });
    }
    page.push(Block::Paragraph {
        text: "**Synopsis**:".to_string(),
    });
    page.push(Block::CodeBlock {
        lines: vec![class_synopsis(node)],
    });

    if !doc.brief.is_empty() {
        page.push(Block::Paragraph {
            text: replace_latex(&doc.brief),
        });
    }
    if !doc.prose.is_empty() {
        page.push(Block::Paragraph {
            text: replace_latex(&doc.prose),
        });
    }
    push_admonitions(&mut page, doc);
    push_figure(&mut page, doc);
    push_entries(&mut page, "Template parameters", &doc.elements.tparams);

    let mut members = Table::new(&["Member", "Type", "Comment"]);
    for member in class.members() {
        members.push_row(vec![
            member.spelling.clone(),
            member.type_name.clone().unwrap_or_default(),
            comment_cell(member.raw_comment.as_deref()),
        ]);
    }
    push_table(&mut page, "Public members", members);

    let mut usings = Table::new(&["Member type", "Comment"]);
    for using in class.usings() {
        usings.push_row(vec![
            using.spelling.clone(),
            comment_cell(using.raw_comment.as_deref()),
        ]);
    }
    push_table(&mut page, "Member types", usings);

    push_functions(&mut page, "Member functions", &node.spelling, scope, &scope.methods);
    push_functions(&mut page, "Non Member functions", &node.spelling, scope, &scope.friends);

    let (file, source) = match doc.elements.text(Tag::Example) {
        Some(file) => (file.trim().to_string(), ExampleSource::Tagged),
        None => (default_file_name(&node.spelling), ExampleSource::Default),
    };
    page.blocks
        .extend(example_blocks(ctx, &declaration, &file, source)?);

    Ok(page)
}

fn comment_cell(raw: Option<&str>) -> String {
    raw.map(|r| replace_latex(&inline_text(r)))
        .unwrap_or_default()
}

fn push_table(page: &mut Page, heading: &str, table: Table) {
    if table.is_empty() {
        return;
    }
    page.push(Block::Heading {
        text: heading.to_string(),
    });
    page.push(Block::Table { table });
}

/// Cross-reference table plus hidden navigation to the child pages.
fn push_functions(
    page: &mut Page,
    heading: &str,
    class: &str,
    scope: &ClassScope<'_>,
    names: &[String],
) {
    if names.is_empty() {
        return;
    }
    let mut table = Table::new(&["Function", "Comment"]);
    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        // A malformed doc is reported by the function's own page.
        let brief = scope
            .overloads
            .get(name)
            .and_then(|overloads| overloads.first())
            .and_then(|d| d.node.doc().ok())
            .map(|doc| replace_latex(&doc.brief))
            .unwrap_or_default();
        table.push_row(vec![
            reference(name, &function_anchor(Some(class), name)),
            brief,
        ]);
        entries.push(format!("{}/{}", page_stem(class), page_stem(name)));
    }
    push_table(page, heading, table);
    page.push(Block::Toctree { entries });
}
