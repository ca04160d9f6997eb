//! Function page: one synopsis covering every overload, then one numbered
//! subsection per overload.

use super::{
    doc_of, example_blocks, function_anchor, page_stem, push_admonitions, push_entries,
    push_figure, ExampleSource, PageContext,
};
use crate::doc::Tag;
use crate::error::PageError;
use crate::example::default_file_name;
use crate::model::Decl;
use crate::render::rst::replace_latex;
use crate::render::{Block, Page};
use crate::synopsis::overload_synopsis;

/// Compose the page of the overload set `name`.
///
/// An overload with its own `@example` tag gets that example inside its
/// subsection. When no overload names one, the page falls back to a shared
/// example file named after the function.
pub fn function_page(
    name: &str,
    overloads: &[Decl<'_>],
    ctx: &PageContext<'_>,
) -> Result<Page, PageError> {
    let Some(first) = overloads.first() else {
        return Ok(Page::new(page_stem(name)));
    };
    let declaration = first.qualified_name();
    let class = first.class.map(|c| c.spelling.as_str());

    let path = match class {
        Some(class) => format!("{}/{}", page_stem(class), page_stem(name)),
        None => page_stem(name),
    };
    let mut page = Page::new(path);
    page.push(Block::Anchor {
        name: function_anchor(class, name),
    });
    page.push(Block::Title {
        text: declaration.clone(),
    });
    page.push(Block::Paragraph {
        text: "**Synopsis**:".to_string(),
    });
    page.push(Block::CodeBlock {
        lines: overload_synopsis(overloads, ctx.index),
    });

    let numbered = overloads.len() > 1;
    let mut any_tagged = false;
    for (n, decl) in overloads.iter().enumerate() {
        let doc = doc_of(decl.node, &declaration)?;
        let label = if numbered {
            format!("({}) ", n + 1)
        } else {
            String::new()
        };
        let brief = format!("{}{}", label, doc.brief);
        if !brief.trim().is_empty() {
            page.push(Block::Paragraph {
                text: brief.trim_end().to_string(),
            });
        }

        push_admonitions(&mut page, doc);
        push_figure(&mut page, doc);
        push_entries(&mut page, "Template parameters", &doc.elements.tparams);
        push_entries(&mut page, "Parameters", &doc.elements.params);

        if let Some(ret) = doc.elements.text(Tag::Return) {
            page.push(Block::Heading {
                text: "Return value".to_string(),
            });
            page.push(Block::Paragraph {
                text: replace_latex(ret),
            });
        }
        if !doc.prose.is_empty() {
            page.push(Block::Heading {
                text: "Documentation".to_string(),
            });
            page.push(Block::Paragraph {
                text: replace_latex(&doc.prose),
            });
        }

        if let Some(file) = doc.elements.text(Tag::Example) {
            any_tagged = true;
            let blocks = example_blocks(ctx, &declaration, file.trim(), ExampleSource::Tagged)?;
            page.blocks.extend(blocks);
        }
    }

    if !any_tagged {
        let blocks = example_blocks(
            ctx,
            &declaration,
            &default_file_name(name),
            ExampleSource::Default,
        )?;
        page.blocks.extend(blocks);
    }

    Ok(page)
}
