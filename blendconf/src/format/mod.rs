//! Format adapters: the only place that knows about concrete syntaxes.
//!
//! Each adapter converts between raw text and a [`Document`]. Adapters are
//! looked up by [`FormatTag`] in a flat [`AdapterRegistry`].

mod env;
mod json;
mod tag;
mod toml;
mod yaml;

use crate::document::Document;
use crate::error::{BlendError, BlendResult};

pub use self::env::{EnvAdapter, EnvOptions};
pub use self::json::JsonAdapter;
pub use self::tag::FormatTag;
pub use self::toml::TomlAdapter;
pub use self::yaml::YamlAdapter;

/// Bidirectional converter between one text format and [`Document`].
pub trait FormatAdapter {
    /// The format this adapter handles.
    fn tag(&self) -> FormatTag;

    /// Parse `text` into a document. `source_id` names the input in errors.
    ///
    /// # Errors
    ///
    /// Returns [`BlendError::Parse`] when `text` is malformed.
    fn load(&self, source_id: &str, text: &str) -> BlendResult<Document>;

    /// Render `document` as text.
    ///
    /// # Errors
    ///
    /// Returns [`BlendError::Dump`] when the underlying serializer fails.
    /// Built-in adapters flatten or wrap anything their format cannot hold
    /// natively instead of failing.
    fn dump(&self, document: &Document) -> BlendResult<String>;
}

/// Lookup table from [`FormatTag`] to adapter.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn FormatAdapter>>,
}

impl AdapterRegistry {
    /// Registry with every built-in adapter and default ENV options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_env_options(EnvOptions::default())
    }

    /// Registry with every built-in adapter, configuring ENV with `options`.
    #[must_use]
    pub fn with_env_options(options: EnvOptions) -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(YamlAdapter));
        registry.register(Box::new(EnvAdapter::new(options)));
        registry.register(Box::new(JsonAdapter));
        registry.register(Box::new(TomlAdapter));
        registry
    }

    /// Registry without adapters.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Add `adapter`, replacing any adapter already registered for its tag.
    pub fn register(&mut self, adapter: Box<dyn FormatAdapter>) {
        let tag = adapter.tag();
        self.adapters.retain(|existing| existing.tag() != tag);
        self.adapters.push(adapter);
    }

    /// Find the adapter for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`BlendError::UnsupportedFormat`] when nothing is registered
    /// for `tag`.
    pub fn adapter(&self, tag: FormatTag) -> BlendResult<&dyn FormatAdapter> {
        self.adapters
            .iter()
            .find(|adapter| adapter.tag() == tag)
            .map(AsRef::as_ref)
            .ok_or_else(|| BlendError::unsupported_format(tag.as_str()))
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
