//! Header parser - Extract the frontmatter block from a document

use shared::HeaderFields;
use thiserror::Error;

/// Line that opens and closes a header block
pub const MARKER: &str = "---";

/// A header block split from its document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader<'a> {
    /// Fields in source order
    pub fields: HeaderFields,
    /// Text after the closing marker, starting with that line's newline
    pub body: &'a str,
}

/// Opening marker found but the block never closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("header opened on line 1 is never closed ({line_count} lines scanned)")]
pub struct UnclosedHeader {
    pub line_count: usize,
}

/// Parse the header block at the start of `text`.
///
/// Returns `Ok(None)` when the first line is not exactly `---`.
pub fn parse(text: &str) -> Result<Option<ParsedHeader<'_>>, UnclosedHeader> {
    let Some(after_marker) = text.strip_prefix(MARKER) else {
        return Ok(None);
    };

    let mut remaining = match after_marker.strip_prefix('\n') {
        Some(rest) => rest,
        None if after_marker.is_empty() => return Err(UnclosedHeader { line_count: 1 }),
        None => return Ok(None),
    };

    let mut fields = HeaderFields::new();
    let mut line_count = 1;

    loop {
        if remaining.is_empty() {
            return Err(UnclosedHeader { line_count });
        }

        let (line, after) = match remaining.find('\n') {
            Some(end) => remaining.split_at(end),
            None => (remaining, ""),
        };
        line_count += 1;

        if line == MARKER {
            return Ok(Some(ParsedHeader {
                fields,
                body: after,
            }));
        }

        if let Some((key, value)) = parse_field(line) {
            fields.insert(key, value);
        }

        remaining = after.strip_prefix('\n').unwrap_or(after);
    }
}

/// Split `key: value` on the first colon
fn parse_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, strip_quotes(value.trim())))
}

/// Strip one layer of matching `"` or `'`
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
