//! Block-style YAML rendering.
//!
//! A string is written plain only when reading it back yields the same
//! string; everything else is double quoted. Empty collections use `{}` and
//! `[]` so they do not read back as null.

use super::resolve;
use crate::document::{Document, Mapping, Scalar};

const INDENT: usize = 2;

/// Characters that may not start a plain scalar.
const INDICATORS: &[char] = &[
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
];

/// Render `document` as a YAML stream ending in a newline.
pub(super) fn render(document: &Document) -> String {
    let mut out = String::new();
    match document {
        Document::Mapping(map) if has_entries(map) => mapping(&mut out, map, 0, false),
        Document::Sequence(items) if has_items(items) => sequence(&mut out, items, 0, false),
        leaf => {
            out.push_str(&inline(leaf));
            out.push('\n');
        }
    }
    out
}

/// Writes entries at `indent`; with `after_dash` the first one continues the
/// current line.
fn mapping(out: &mut String, map: &Mapping, indent: usize, after_dash: bool) {
    let entries = map.iter().filter(|(_, value)| !value.is_absent());
    for (index, (key, value)) in entries.enumerate() {
        if index > 0 || !after_dash {
            pad(out, indent);
        }
        out.push_str(&string(key));
        out.push(':');
        match value {
            Document::Mapping(inner) if has_entries(inner) => {
                out.push('\n');
                mapping(out, inner, indent + INDENT, false);
            }
            Document::Sequence(items) if has_items(items) => {
                out.push('\n');
                sequence(out, items, indent + INDENT, false);
            }
            leaf => leaf_line(out, leaf),
        }
    }
}

fn sequence(out: &mut String, items: &[Document], indent: usize, after_dash: bool) {
    let present = items.iter().filter(|item| !item.is_absent());
    for (index, item) in present.enumerate() {
        if index > 0 || !after_dash {
            pad(out, indent);
        }
        out.push('-');
        match item {
            Document::Mapping(map) if has_entries(map) => {
                out.push(' ');
                mapping(out, map, indent + INDENT, true);
            }
            Document::Sequence(inner) if has_items(inner) => {
                out.push(' ');
                sequence(out, inner, indent + INDENT, true);
            }
            leaf => leaf_line(out, leaf),
        }
    }
}

fn leaf_line(out: &mut String, leaf: &Document) {
    out.push(' ');
    out.push_str(&inline(leaf));
    out.push('\n');
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}

fn has_entries(map: &Mapping) -> bool {
    map.values().any(|value| !value.is_absent())
}

fn has_items(items: &[Document]) -> bool {
    items.iter().any(|item| !item.is_absent())
}

/// Single-line form of a scalar or an empty collection.
fn inline(leaf: &Document) -> String {
    match leaf {
        Document::Mapping(_) => "{}".to_owned(),
        Document::Sequence(_) => "[]".to_owned(),
        Document::Scalar(value) => scalar(value),
        Document::Absent => "null".to_owned(),
    }
}

fn scalar(value: &Scalar) -> String {
    match value {
        Scalar::Null => "null".to_owned(),
        Scalar::Float(number) => Scalar::non_finite_name(*number)
            .map_or_else(|| format!("{number:?}"), str::to_owned),
        Scalar::String(text) => string(text),
        other => other.to_string(),
    }
}

fn string(text: &str) -> String {
    if is_plain_safe(text) && matches!(resolve::plain(text), Ok(Scalar::String(_))) {
        text.to_owned()
    } else {
        quoted(text)
    }
}

fn is_plain_safe(text: &str) -> bool {
    let (Some(first), Some(last)) = (text.chars().next(), text.chars().next_back()) else {
        return false;
    };
    !INDICATORS.contains(&first)
        && !first.is_whitespace()
        && !last.is_whitespace()
        && last != ':'
        && !text.starts_with("...")
        && !text.contains(": ")
        && !text.contains(" #")
        && !text.chars().any(needs_escape)
        && !text.contains([',', '[', ']', '{', '}'])
}

fn needs_escape(ch: char) -> bool {
    ch.is_control() || matches!(ch, '\u{feff}' | '\u{2028}' | '\u{2029}')
}

fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            special if needs_escape(special) => {
                out.push_str(&format!("\\u{:04X}", u32::from(special)));
            }
            plain => out.push(plain),
        }
    }
    out.push('"');
    out
}
