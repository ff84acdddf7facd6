//! ENV adapter: flat `KEY=value` files mapped onto nested documents.
//!
//! Loading folds keys to lowercase and splits them on a separator, so
//! `DB_PORT=6000` becomes `{db: {port: "6000"}}`. Values are always strings;
//! values containing a comma become sequences unless they look like
//! structured data (starting with `[`, `{` or a quote). Dumping reverses the
//! convention: nested keys are joined with the separator, sequences are
//! comma-joined and values that need it are quoted.
//!
//! Every document produced by [`EnvAdapter::load`] survives
//! `load(dump(doc))` unchanged. Documents from richer formats are flattened
//! deterministically but may not round-trip.

use tracing::debug;

use super::{FormatAdapter, FormatTag};
use crate::document::{Document, Mapping};
use crate::error::{BlendError, BlendResult};

/// Key used when a non-mapping document is written as ENV.
const ROOT_KEY: &str = "VALUE";

/// Conventions used by [`EnvAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOptions {
    /// Separator between nested key segments. Empty disables nesting.
    pub separator: String,
    /// Fold keys to lowercase on load and uppercase on dump.
    pub lowercase: bool,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            separator: "_".to_owned(),
            lowercase: true,
        }
    }
}

/// Reads and writes dotenv-style files.
#[derive(Debug, Clone, Default)]
pub struct EnvAdapter {
    options: EnvOptions,
}

impl EnvAdapter {
    /// Build an adapter using `options`.
    #[must_use]
    pub const fn new(options: EnvOptions) -> Self {
        Self { options }
    }

    /// Returns the configured options.
    #[must_use]
    pub const fn options(&self) -> &EnvOptions {
        &self.options
    }

    /// Split a raw key into its nested path, or `None` if a segment is empty.
    fn key_path(&self, raw: &str) -> Option<Vec<String>> {
        let key = if self.options.lowercase {
            raw.to_ascii_lowercase()
        } else {
            raw.to_owned()
        };
        if self.options.separator.is_empty() {
            return Some(vec![key]);
        }
        key.split(self.options.separator.as_str())
            .map(|segment| (!segment.is_empty()).then(|| segment.to_owned()))
            .collect()
    }

    fn dump_key(&self, key: &str) -> String {
        let cased = if self.options.lowercase {
            key.to_ascii_uppercase()
        } else {
            key.to_owned()
        };
        cased
            .chars()
            .map(|ch| if ch.is_ascii_alphanumeric() || ch == '.' { ch } else { '_' })
            .collect()
    }

    fn join_key(&self, prefix: Option<&str>, segment: &str) -> String {
        let dumped = self.dump_key(segment);
        match prefix {
            Some(parent) => format!("{parent}{}{dumped}", self.options.separator),
            None => dumped,
        }
    }

    fn flatten_into(&self, key: Option<&str>, document: &Document, out: &mut Vec<(String, String)>) {
        match document {
            Document::Mapping(map) => {
                for (segment, value) in map {
                    let joined = self.join_key(key, segment);
                    self.flatten_into(Some(&joined), value, out);
                }
            }
            Document::Sequence(items) => {
                let joined = items
                    .iter()
                    .filter(|item| !item.is_absent())
                    .map(render_item)
                    .collect::<Vec<_>>()
                    .join(",");
                out.push((key.unwrap_or(ROOT_KEY).to_owned(), joined));
            }
            Document::Scalar(scalar) => {
                out.push((key.unwrap_or(ROOT_KEY).to_owned(), scalar.to_string()));
            }
            Document::Absent => {}
        }
    }
}

impl FormatAdapter for EnvAdapter {
    fn tag(&self) -> FormatTag {
        FormatTag::Env
    }

    fn load(&self, source_id: &str, text: &str) -> BlendResult<Document> {
        let mut root = Mapping::new();
        for entry in dotenvy::from_read_iter(text.as_bytes()) {
            let (key, value) = entry.map_err(|err| line_error(source_id, text, &err))?;
            let path = self.key_path(&key).ok_or_else(|| {
                BlendError::parse(source_id, format!("key `{key}` contains an empty segment"))
            })?;
            insert_path(&mut root, &path, parse_value(&value)).map_err(|()| {
                BlendError::parse(
                    source_id,
                    format!("key `{key}` is used both as a value and as a parent of other keys"),
                )
            })?;
        }
        debug!(source = source_id, keys = root.len(), "loaded ENV document");
        Ok(Document::Mapping(root))
    }

    fn dump(&self, document: &Document) -> BlendResult<String> {
        let mut entries = Vec::new();
        self.flatten_into(None, document, &mut entries);
        Ok(entries
            .into_iter()
            .map(|(key, value)| format!("{key}={}\n", quote(&value)))
            .collect())
    }
}

/// Whether a value should be split on commas rather than kept whole.
fn should_parse_as_csv(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.contains(',') && !matches!(trimmed.chars().next(), Some('[' | '{' | '"' | '\''))
}

fn parse_value(raw: &str) -> Document {
    if should_parse_as_csv(raw) {
        raw.trim()
            .split(',')
            .map(|item| Document::from(item.trim()))
            .collect()
    } else {
        Document::from(raw)
    }
}

/// Insert `value` at `path`, creating intermediate mappings.
///
/// Fails when a prefix of `path` already holds a non-mapping value, or when
/// the final key already holds a mapping. Reassigning a leaf replaces it.
fn insert_path(target: &mut Mapping, path: &[String], value: Document) -> Result<(), ()> {
    match path {
        [] => Err(()),
        [last] => {
            if matches!(target.get(last), Some(Document::Mapping(_))) {
                return Err(());
            }
            target.insert(last.clone(), value);
            Ok(())
        }
        [head, rest @ ..] => match target
            .entry(head.clone())
            .or_insert_with(Document::empty_mapping)
        {
            Document::Mapping(child) => insert_path(child, rest, value),
            _ => Err(()),
        },
    }
}

fn render_item(item: &Document) -> String {
    match item {
        Document::Scalar(scalar) => scalar.to_string(),
        Document::Mapping(_) | Document::Sequence(_) | Document::Absent => {
            serde_json::to_string(item).unwrap_or_default()
        }
    }
}

fn is_plain(value: &str) -> bool {
    value.chars().all(|ch| {
        ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/' | ':' | ',' | '@' | '+' | '%')
    })
}

/// Quote `value` so dotenv parsing yields it back verbatim.
///
/// Single quotes are literal in dotenv syntax; values containing a single
/// quote or a newline fall back to escaped double quotes.
fn quote(value: &str) -> String {
    if is_plain(value) {
        return value.to_owned();
    }
    if !value.contains(['\'', '\n']) {
        return format!("'{value}'");
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '\\' | '"' | '$' => {
                quoted.push('\\');
                quoted.push(ch);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

fn line_error(source_id: &str, text: &str, err: &dotenvy::Error) -> BlendError {
    let dotenvy::Error::LineParse(line, index) = err else {
        return BlendError::parse(source_id, err.to_string());
    };
    let reason = format!("invalid assignment `{line}`");
    text.lines()
        .position(|candidate| candidate.trim() == line.trim())
        .map_or_else(
            || BlendError::parse(source_id, reason.clone()),
            |row| BlendError::parse_at(source_id, row + 1, Some(index + 1), reason.clone()),
        )
}
