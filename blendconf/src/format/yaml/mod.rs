//! YAML adapter built on the `saphyr-parser` event stream.

mod compose;
mod emit;
mod resolve;

use tracing::debug;

use super::{FormatAdapter, FormatTag};
use crate::document::{Document, Scalar};
use crate::error::{BlendError, BlendResult};

/// Reads and writes YAML 1.2 documents under the core schema.
///
/// Booleans are strict: only `true` and `false` are booleans, so values such
/// as `yes` or `on` stay strings. Quoted scalars are always strings, mapping
/// keys keep their source text and an empty document loads as null. Anchors
/// and aliases are expanded on load.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlAdapter;

impl FormatAdapter for YamlAdapter {
    fn tag(&self) -> FormatTag {
        FormatTag::Yaml
    }

    fn load(&self, source_id: &str, text: &str) -> BlendResult<Document> {
        let document = compose::compose(text).map_err(|err| {
            BlendError::parse_at(source_id, err.line, Some(err.column), err.reason)
        })?;
        if document.as_scalar().is_some_and(Scalar::is_null) {
            debug!(source = source_id, "YAML source holds no value; loading null");
        }
        Ok(document)
    }

    fn dump(&self, document: &Document) -> BlendResult<String> {
        Ok(emit::render(document))
    }
}
