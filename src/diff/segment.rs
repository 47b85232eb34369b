//! Splitting a unified diff into per-file records.

use tracing::warn;

/// Prefix of the per-file header line in `git diff` output.
const FILE_HEADER: &str = "diff --git";

/// One file's slice of a unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChangeRecord {
    /// Repository-relative path, taken from the `b/` side of the header.
    pub path: String,
    /// Every line after the header up to the next header, unfiltered.
    pub raw_lines: Vec<String>,
}

impl FileChangeRecord {
    /// Final path component, e.g. `parser.py`.
    pub fn basename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Basename without its last extension, e.g. `parser`.
    pub fn module_name(&self) -> &str {
        let base = self.basename();
        match base.rfind('.') {
            Some(0) | None => base,
            Some(dot) => &base[..dot],
        }
    }
}

/// Split diff text into one record per `diff --git` header, in input order.
///
/// A header without a `b/` path, including a bare `diff --git`, is skipped
/// together with the lines that follow it, up to the next header.
pub fn split_diff(diff: &str) -> Vec<FileChangeRecord> {
    let mut records = Vec::new();
    let mut current: Option<FileChangeRecord> = None;

    for line in diff.lines() {
        if is_file_header(line) {
            if let Some(record) = current.take() {
                records.push(record);
            }
            match parse_header_path(line) {
                Some(path) => {
                    current = Some(FileChangeRecord {
                        path,
                        raw_lines: Vec::new(),
                    });
                }
                None => warn!("Skipping diff segment with malformed header: {line}"),
            }
        } else if let Some(record) = current.as_mut() {
            record.raw_lines.push(line.to_string());
        }
    }

    if let Some(record) = current {
        records.push(record);
    }

    records
}

fn is_file_header(line: &str) -> bool {
    line.strip_prefix(FILE_HEADER)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
}

/// Extract the `b/` path from `diff --git a/<old> b/<new>`.
///
/// Uses the last ` b/` so paths containing spaces survive. Git wraps paths
/// with special characters in double quotes and C-style escapes, e.g.
/// `"b/caf\303\251.py"`; either side may be quoted independently.
fn parse_header_path(header: &str) -> Option<String> {
    let rest = header.strip_prefix(FILE_HEADER)?.strip_prefix(' ')?;
    if !(rest.starts_with("a/") || rest.starts_with("\"a/")) {
        return None;
    }

    let path = if rest.ends_with('"') {
        let b_pos = rest.rfind(" \"b/")?;
        unquote_path(&rest[b_pos + 1..])?
            .strip_prefix("b/")?
            .to_string()
    } else {
        let b_pos = rest.rfind(" b/")?;
        rest[b_pos + 3..].to_string()
    };

    if path.is_empty() { None } else { Some(path) }
}

/// Undo git's path quoting: strip the surrounding quotes and decode escapes.
/// Octal escapes are raw bytes, so the result is decoded as UTF-8 at the end.
fn unquote_path(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        let escaped = chars.next()?;
        let byte = match escaped {
            'a' => 0x07,
            'b' => 0x08,
            't' => b'\t',
            'n' => b'\n',
            'v' => 0x0b,
            'f' => 0x0c,
            'r' => b'\r',
            '"' => b'"',
            '\\' => b'\\',
            '0'..='7' => {
                let mut value = escaped.to_digit(8)?;
                for _ in 0..2 {
                    value = value * 8 + chars.next()?.to_digit(8)?;
                }
                u8::try_from(value).ok()?
            }
            _ => return None,
        };
        bytes.push(byte);
    }

    Some(String::from_utf8_lossy(&bytes).into_owned())
}
