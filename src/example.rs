//! Example extractor: prose / code / prose slices of an example source file.
//!
//! An example file is a run of comment lines (leading prose), one contiguous
//! run of code, then comment lines again (trailing prose). Blank lines never
//! start or break a region. A comment line between two code lines is a
//! structural error.

use crate::error::ExampleError;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Indent applied to every code line of an example.
pub const EXAMPLE_INDENT: usize = 4;

/// Extension of convention-named example files.
pub const EXAMPLE_EXTENSION: &str = "cpp";

static RE_COMMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:/\*|\*|//)").unwrap());

static RE_BLOCK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*/?\*/?\s?").unwrap());

static RE_LINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*//\s?").unwrap());

static RE_BLOCK_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\*/\s*$").unwrap());

/// Extracted example.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleSlice {
    pub path: PathBuf,
    /// Code lines, flattened and re-indented.
    pub code: Vec<String>,
    pub leading: String,
    pub trailing: String,
    /// Number of lines before the code region.
    pub start: usize,
    /// `start` plus the number of code lines.
    pub end: usize,
}

impl ExampleSlice {
    /// No code means no example section.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Comment,
    Blank,
    Code,
}

fn classify(line: &str) -> LineKind {
    if line.trim().is_empty() {
        LineKind::Blank
    } else if RE_COMMENT_LINE.is_match(line) {
        LineKind::Comment
    } else {
        LineKind::Code
    }
}

/// `<entity>.cpp`
pub fn default_file_name(entity: &str) -> String {
    format!("{}.{}", entity, EXAMPLE_EXTENSION)
}

/// Read and slice an example file.
pub fn extract(path: &Path, indent: usize) -> Result<ExampleSlice, ExampleError> {
    if !path.is_file() {
        return Err(ExampleError::MissingExampleFile {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path).map_err(|source| ExampleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    slice(path, &content, indent)
}

/// Slice already-loaded example text.
pub fn slice(path: &Path, content: &str, indent: usize) -> Result<ExampleSlice, ExampleError> {
    let lines: Vec<&str> = content.trim().lines().collect();
    let kinds: Vec<LineKind> = lines.iter().map(|l| classify(l)).collect();

    let first = kinds.iter().position(|k| *k == LineKind::Code);
    let last = kinds.iter().rposition(|k| *k == LineKind::Code);
    let (start, end) = match (first, last) {
        (Some(first), Some(last)) => (first, last + 1),
        _ => {
            return Ok(ExampleSlice {
                path: path.to_path_buf(),
                leading: prose(&lines),
                ..Default::default()
            })
        }
    };

    if let Some(offset) = kinds[start..end]
        .iter()
        .position(|k| *k == LineKind::Comment)
    {
        return Err(ExampleError::NonContiguousCodeRegion {
            path: path.to_path_buf(),
            line: start + offset + 1,
        });
    }

    let pad = " ".repeat(indent);
    let code = lines[start..end]
        .iter()
        .map(|l| {
            let l = l.trim();
            if l.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, l)
            }
        })
        .collect();

    Ok(ExampleSlice {
        path: path.to_path_buf(),
        code,
        leading: prose(&lines[..start]),
        trailing: prose(&lines[end..]),
        start,
        end,
    })
}

/// Strip comment markers (and at most one following space) and rejoin.
fn prose(lines: &[&str]) -> String {
    let text = lines
        .iter()
        .map(|l| {
            let l = RE_BLOCK_CLOSE.replace(l, "");
            if RE_LINE_MARKER.is_match(&l) {
                RE_LINE_MARKER.replace(&l, "").into_owned()
            } else {
                RE_BLOCK_MARKER.replace(&l, "").into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    text.trim_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn path() -> &'static Path {
        Path::new("Foo.cpp")
    }

    #[test]
    fn slices_leading_code_trailing() {
        let src = "// Build a foo.\n// Then use it.\nint main() {\n  Foo f;\n}\n// Prints nothing.\n";
        let ex = slice(path(), src, 4).unwrap();
        assert_eq!(ex.start, 2);
        assert_eq!(ex.end, 5);
        assert_eq!(ex.code, ["    int main() {", "    Foo f;", "    }"]);
        assert_eq!(ex.leading, "Build a foo.\nThen use it.");
        assert_eq!(ex.trailing, "Prints nothing.");
    }

    #[test]
    fn block_comments_are_prose() {
        let src = "/* Leading\n * block\n */\nfoo();\n";
        let ex = slice(path(), src, 2).unwrap();
        assert_eq!(ex.leading, "Leading\nblock");
        assert_eq!(ex.code, ["  foo();"]);
        assert_eq!((ex.start, ex.end), (3, 4));
        assert_eq!(ex.trailing, "");
    }

    #[test]
    fn blank_lines_inside_code_are_kept() {
        let src = "a();\n\nb();";
        let ex = slice(path(), src, 4).unwrap();
        assert_eq!(ex.code, ["    a();", "", "    b();"]);
    }

    #[test]
    fn comment_between_code_lines_is_an_error() {
        let src = "// intro\na();\n// middle\nb();\n";
        match slice(path(), src, 4) {
            Err(ExampleError::NonContiguousCodeRegion { path, line }) => {
                assert_eq!(path, Path::new("Foo.cpp"));
                assert_eq!(line, 3);
            }
            other => panic!("expected non-contiguous error, got {:?}", other),
        }
    }

    #[test]
    fn only_comments_yields_empty_slice() {
        let ex = slice(path(), "// nothing to run\n", 4).unwrap();
        assert!(ex.is_empty());
        assert_eq!(ex.leading, "nothing to run");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = extract(Path::new("/nonexistent/Foo.cpp"), 4).unwrap_err();
        assert!(matches!(err, ExampleError::MissingExampleFile { .. }));
    }

    #[test]
    fn reads_file_from_disk() {
        let mut file = NamedTempFile::with_suffix(".cpp").unwrap();
        file.write_all(b"// doc\nrun();\n").unwrap();
        let ex = extract(file.path(), 4).unwrap();
        assert_eq!(ex.code, ["    run();"]);
        assert_eq!((ex.start, ex.end), (1, 2));
    }

    #[test]
    fn default_name_uses_fixed_extension() {
        assert_eq!(default_file_name("Foo"), "Foo.cpp");
    }
}
