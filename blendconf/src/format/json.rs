//! JSON adapter backed by `serde_json`.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::{FormatAdapter, FormatTag};
use crate::document::{Document, Scalar};
use crate::error::{BlendError, BlendResult};

const INDENT: &[u8] = b"    ";

/// Reads and writes JSON documents; output is indented with four spaces.
///
/// JSON has no non-finite numbers, so infinities and NaN are written as the
/// strings `.inf`, `-.inf` and `.nan`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAdapter;

impl FormatAdapter for JsonAdapter {
    fn tag(&self) -> FormatTag {
        FormatTag::Json
    }

    fn load(&self, source_id: &str, text: &str) -> BlendResult<Document> {
        serde_json::from_str(text).map_err(|err| {
            BlendError::parse_at(source_id, err.line(), Some(err.column()), classify(&err))
        })
    }

    fn dump(&self, document: &Document) -> BlendResult<String> {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
        finite(document)
            .serialize(&mut serializer)
            .map_err(|err| BlendError::dump(FormatTag::Json.display_name(), err.to_string()))?;
        let mut rendered = String::from_utf8(buffer)
            .map_err(|err| BlendError::dump(FormatTag::Json.display_name(), err.to_string()))?;
        rendered.push('\n');
        Ok(rendered)
    }
}

/// Copy of `document` with non-finite floats replaced by their YAML names.
fn finite(document: &Document) -> Document {
    match document {
        Document::Mapping(map) => map
            .iter()
            .map(|(key, value)| (key.clone(), finite(value)))
            .collect(),
        Document::Sequence(items) => Document::Sequence(items.iter().map(finite).collect()),
        Document::Scalar(Scalar::Float(number)) => {
            Scalar::non_finite_name(*number).map_or_else(|| document.clone(), Document::from)
        }
        other => other.clone(),
    }
}

/// Describe a `serde_json` failure without repeating its position.
fn classify(err: &serde_json::Error) -> String {
    let message = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    message
        .strip_suffix(suffix.as_str())
        .map_or_else(|| message.clone(), str::to_owned)
}
