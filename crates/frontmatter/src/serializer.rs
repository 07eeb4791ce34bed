//! Header serializer - Render a field set back into a header block

use crate::parser::MARKER;
use shared::{keys, HeaderFields};

/// Render the header block, from the opening marker through the closing
/// marker. No newline follows the closing marker; the preserved body starts
/// with it.
pub fn render_header(fields: &HeaderFields) -> String {
    let mut lines = vec![MARKER.to_string()];

    for key in keys::PRIORITY {
        if let Some(value) = fields.get(key) {
            lines.push(render_line(key, value));
        }
    }

    for (key, value) in fields.iter() {
        if !keys::PRIORITY.contains(&key) {
            lines.push(render_line(key, value));
        }
    }

    lines.push(MARKER.to_string());
    lines.join("\n")
}

/// Render a full document: header block followed by the untouched body
pub fn render_document(fields: &HeaderFields, body: &str) -> String {
    let mut text = render_header(fields);
    text.push_str(body);
    text
}

fn render_line(key: &str, value: &str) -> String {
    if key == keys::DESCRIPTION {
        format!("{}: \"{}\"", key, value)
    } else {
        format!("{}: {}", key, value)
    }
}
