//! Doc-comment parser: raw comment text to brief, prose and tagged elements.
//!
//! Comment markers (`///`, `/** */`, leading `*`) are stripped first, then the
//! text is split on `@tag` markers at the start of a line. Text before the
//! first tag yields the brief (up to the first blank line or sentence end)
//! and the prose (everything after it).

use crate::error::DocError;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static RE_TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*@([A-Za-z]+)\b[ \t]*(.*)$").unwrap());

// Leading comment markers, longest first so `///` wins over `//`.
static RE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:/\*\*|/\*!|/\*|///|//!|//|\*/|\*)").unwrap());

static RE_TRAILING_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\*/\s*$").unwrap());

/// The fixed tag vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    TParam,
    Param,
    Return,
    Note,
    Warning,
    Figure,
    Example,
    Include,
}

impl Tag {
    pub fn from_name(name: &str) -> Option<Tag> {
        match name {
            "tparam" => Some(Tag::TParam),
            "param" => Some(Tag::Param),
            "return" => Some(Tag::Return),
            "note" => Some(Tag::Note),
            "warning" => Some(Tag::Warning),
            "figure" => Some(Tag::Figure),
            "example" => Some(Tag::Example),
            "include" => Some(Tag::Include),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::TParam => "tparam",
            Tag::Param => "param",
            Tag::Return => "return",
            Tag::Note => "note",
            Tag::Warning => "warning",
            Tag::Figure => "figure",
            Tag::Example => "example",
            Tag::Include => "include",
        }
    }

    /// `tparam` and `param` may repeat and keep every occurrence.
    pub fn is_repeatable(self) -> bool {
        matches!(self, Tag::TParam | Tag::Param)
    }
}

/// One `@param` / `@tparam` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub description: String,
}

/// A validated `@figure file:alt` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    pub file: String,
    pub alt: String,
}

impl Figure {
    fn parse(content: &str) -> Result<Figure, DocError> {
        let mut parts = content.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(file), Some(alt), None) => Ok(Figure {
                file: file.trim().to_string(),
                alt: alt.trim().to_string(),
            }),
            _ => Err(DocError::MalformedFigureTag {
                content: content.to_string(),
            }),
        }
    }
}

/// Tagged elements of a doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Elements {
    pub tparams: Vec<Entry>,
    pub params: Vec<Entry>,
    singular: BTreeMap<Tag, String>,
    figure: Option<Figure>,
}

impl Elements {
    /// Content of a singular tag: `None` when the tag is absent, possibly
    /// empty when present without content.
    pub fn get(&self, tag: Tag) -> Option<&str> {
        self.singular.get(&tag).map(String::as_str)
    }

    /// Content of a singular tag when it is present and non-empty. Renderers
    /// emit a subsection only when this returns `Some`.
    pub fn text(&self, tag: Tag) -> Option<&str> {
        self.get(tag).filter(|s| !s.trim().is_empty())
    }

    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    /// Entries of a repeatable tag, in source order. Empty for singular tags.
    pub fn entries(&self, tag: Tag) -> &[Entry] {
        match tag {
            Tag::TParam => &self.tparams,
            Tag::Param => &self.params,
            _ => &[],
        }
    }

    fn push(&mut self, tag: Tag, content: String) -> Result<(), DocError> {
        match tag {
            Tag::TParam | Tag::Param => {
                let (name, description) = split_name(&content);
                let entry = Entry { name, description };
                if tag == Tag::TParam {
                    self.tparams.push(entry);
                } else {
                    self.params.push(entry);
                }
            }
            Tag::Figure => {
                self.figure = Some(Figure::parse(&content)?);
                self.singular.insert(tag, content);
            }
            _ => {
                self.singular.insert(tag, content);
            }
        }
        Ok(())
    }
}

/// Structured form of one declaration's comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    pub brief: String,
    pub prose: String,
    pub elements: Elements,
}

// -- Public API ---------------------------------------------------------------

/// Parse a raw comment. Only a malformed `@figure` is an error; absent tags
/// simply stay absent.
pub fn parse(raw: &str) -> Result<DocComment, DocError> {
    let mut preamble: Vec<String> = Vec::new();
    let mut sections: Vec<(Tag, Vec<String>)> = Vec::new();

    for line in strip_markers(raw) {
        if let Some(caps) = RE_TAG_LINE.captures(&line) {
            if let Some(tag) = Tag::from_name(&caps[1]) {
                sections.push((tag, vec![caps[2].to_string()]));
                continue;
            }
        }
        match sections.last_mut() {
            Some((_, body)) => body.push(line),
            None => preamble.push(line),
        }
    }

    let (brief, prose) = split_brief(&preamble.join("\n"));
    let mut elements = Elements::default();
    for (tag, body) in sections {
        let content = body.join("\n").trim().to_string();
        elements.push(tag, content)?;
    }

    Ok(DocComment {
        brief,
        prose,
        elements,
    })
}

/// Flatten a raw comment into one line of plain text (table cells).
pub fn inline_text(raw: &str) -> String {
    strip_markers(raw)
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// -- Helpers ------------------------------------------------------------------

/// Remove comment markers and at most one following space from every line.
fn strip_markers(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| {
            let line = RE_TRAILING_CLOSE.replace(line, "");
            let rest = match RE_MARKER.find(&line) {
                Some(m) => &line[m.end()..],
                None => line.trim_start(),
            };
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            rest.trim_end().to_string()
        })
        .collect()
}

/// Split pre-tag text into the brief and the remaining prose.
fn split_brief(text: &str) -> (String, String) {
    let text = text.trim();
    let paragraph_end = find_blank_line(text).unwrap_or(text.len());
    let cut = find_sentence_end(&text[..paragraph_end]).unwrap_or(paragraph_end);

    let brief = text[..cut].split_whitespace().collect::<Vec<_>>().join(" ");
    let prose = text[cut..].trim().to_string();
    (brief, prose)
}

fn find_blank_line(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split('\n') {
        if line.trim().is_empty() && offset > 0 {
            return Some(offset);
        }
        offset += line.len() + 1;
    }
    None
}

/// Byte offset just past the first `.`, `!` or `?` followed by whitespace or
/// the end of text.
fn find_sentence_end(text: &str) -> Option<usize> {
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            match chars.peek() {
                None => return Some(i + 1),
                Some((_, next)) if next.is_whitespace() => return Some(i + 1),
                _ => {}
            }
        }
    }
    None
}

/// First whitespace-delimited token is the name, the rest the description.
fn split_name(content: &str) -> (String, String) {
    let content = content.trim();
    match content.split_once(char::is_whitespace) {
        Some((name, rest)) => (
            name.to_string(),
            rest.split_whitespace().collect::<Vec<_>>().join(" "),
        ),
        None => (content.to_string(), String::new()),
    }
}
