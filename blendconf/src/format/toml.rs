//! TOML adapter backed by the `toml` crate.
//!
//! TOML has no null, so null scalars are dropped on output. Datetimes load as
//! their RFC 3339 text. A document whose root is not a mapping is written as
//! the single key `value`.

use toml::{Table, Value};

/// Key used when a non-mapping document is written as TOML.
const ROOT_KEY: &str = "value";

use super::{FormatAdapter, FormatTag};
use crate::document::{Document, Scalar};
use crate::error::{BlendError, BlendResult};

/// Reads and writes TOML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlAdapter;

impl FormatAdapter for TomlAdapter {
    fn tag(&self) -> FormatTag {
        FormatTag::Toml
    }

    fn load(&self, source_id: &str, text: &str) -> BlendResult<Document> {
        let table = toml::from_str::<Table>(text).map_err(|err| {
            let reason = err.message().to_owned();
            match err.span().map(|span| line_and_column(text, span.start)) {
                Some((line, column)) => BlendError::parse_at(source_id, line, Some(column), reason),
                None => BlendError::parse(source_id, reason),
            }
        })?;
        Ok(from_table(table))
    }

    fn dump(&self, document: &Document) -> BlendResult<String> {
        let table = match to_value(document) {
            Some(Value::Table(table)) => table,
            Some(other) => Table::from_iter([(ROOT_KEY.to_owned(), other)]),
            None => Table::new(),
        };
        toml::to_string(&table)
            .map_err(|err| BlendError::dump(FormatTag::Toml.display_name(), err.to_string()))
    }
}

fn from_table(table: Table) -> Document {
    table
        .into_iter()
        .map(|(key, value)| (key, from_value(value)))
        .collect()
}

fn from_value(value: Value) -> Document {
    match value {
        Value::String(text) => Document::from(text),
        Value::Integer(number) => Document::from(number),
        Value::Float(number) => Document::from(number),
        Value::Boolean(flag) => Document::from(flag),
        Value::Datetime(datetime) => Document::from(datetime.to_string()),
        Value::Array(items) => items.into_iter().map(from_value).collect(),
        Value::Table(table) => from_table(table),
    }
}

/// Convert a document node, returning `None` for nodes TOML cannot hold.
fn to_value(document: &Document) -> Option<Value> {
    match document {
        Document::Mapping(map) => Some(Value::Table(
            map.iter()
                .filter_map(|(key, value)| to_value(value).map(|converted| (key.clone(), converted)))
                .collect(),
        )),
        Document::Sequence(items) => Some(Value::Array(items.iter().filter_map(to_value).collect())),
        Document::Scalar(scalar) => match scalar {
            Scalar::Null => None,
            Scalar::Bool(flag) => Some(Value::Boolean(*flag)),
            Scalar::Integer(number) => Some(Value::Integer(*number)),
            Scalar::Float(number) => Some(Value::Float(*number)),
            Scalar::String(text) => Some(Value::String(text.clone())),
        },
        Document::Absent => None,
    }
}

/// One-based line and column of byte `offset` in `text`.
fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |tail| tail.chars().count())
        + 1;
    (line, column)
}
