//! Line classification and noise filtering for a file's hunk lines.

use std::sync::LazyLock;

use regex::Regex;

/// Header lines that describe the file rather than its content.
const METADATA_PREFIXES: &[&str] = &[
    "@@",
    "+++",
    "---",
    "new file mode",
    "deleted file mode",
    "old mode",
    "new mode",
    "index ",
    "similarity index",
    "rename from",
    "rename to",
    "Binary files",
];

/// Import statements, at any indentation.
static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(import |from )").expect("import pattern is valid"));

/// Comment-only lines.
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#").expect("comment pattern is valid"));

/// Docstring delimiters.
const DOCSTRING_DELIMITERS: &[&str] = &["\"\"\"", "'''"];

/// What a raw diff line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Context,
    Added,
    Removed,
    Metadata,
}

/// Classify a raw line by its leading sigil or header prefix.
pub fn classify_line(line: &str) -> LineClass {
    if METADATA_PREFIXES.iter().any(|p| line.starts_with(p)) {
        LineClass::Metadata
    } else if line.starts_with('+') {
        LineClass::Added
    } else if line.starts_with('-') {
        LineClass::Removed
    } else {
        LineClass::Context
    }
}

/// Whether changed content carries no structural meaning: imports, comments,
/// and anything touching a docstring delimiter.
pub fn is_noise(content: &str) -> bool {
    IMPORT_RE.is_match(content)
        || COMMENT_RE.is_match(content)
        || DOCSTRING_DELIMITERS.iter().any(|d| content.contains(d))
}

/// Added and removed content of one file, sigils stripped, noise dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredLines {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl FilteredLines {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Split raw hunk lines into clean added and removed content, in order.
pub fn filter_lines<S: AsRef<str>>(raw_lines: &[S]) -> FilteredLines {
    let mut filtered = FilteredLines::default();

    for line in raw_lines {
        let line = line.as_ref();
        let target = match classify_line(line) {
            LineClass::Added => &mut filtered.added,
            LineClass::Removed => &mut filtered.removed,
            LineClass::Context | LineClass::Metadata => continue,
        };

        let content = &line[1..];
        if !is_noise(content) {
            target.push(content.to_string());
        }
    }

    filtered
}
