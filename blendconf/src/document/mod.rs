//! Normalized document model shared by every format adapter.
//!
//! Loaders turn raw text into a [`Document`]; the merge engine combines
//! documents; dumpers turn the result back into text. The model is a closed
//! sum type, so every consumer matches exhaustively and no format-specific
//! value ever leaks past an adapter.

mod codec;
mod scalar;

use std::fmt;

use indexmap::IndexMap;

pub use scalar::Scalar;

/// Ordered mapping payload of [`Document::Mapping`].
pub type Mapping = IndexMap<String, Document>;

/// A normalized configuration value.
///
/// `Mapping` equality ignores key order, `Sequence` equality is order
/// sensitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Ordered collection of uniquely keyed entries.
    Mapping(Mapping),
    /// Ordered list of documents.
    Sequence(Vec<Document>),
    /// Leaf value.
    Scalar(Scalar),
    /// Marker for "no value supplied", distinct from an explicit null.
    ///
    /// Only meaningful while merging; merged results never contain it.
    Absent,
}

/// Variant label of a [`Document`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// [`Document::Mapping`].
    Mapping,
    /// [`Document::Sequence`].
    Sequence,
    /// [`Document::Scalar`].
    Scalar,
    /// [`Document::Absent`].
    Absent,
}

impl DocumentKind {
    /// Lowercase name of the variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
            Self::Scalar => "scalar",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Document {
    /// An empty mapping.
    #[must_use]
    pub fn empty_mapping() -> Self {
        Self::Mapping(Mapping::new())
    }

    /// The explicit null scalar.
    #[must_use]
    pub const fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// Returns the variant label.
    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        match self {
            Self::Mapping(_) => DocumentKind::Mapping,
            Self::Sequence(_) => DocumentKind::Sequence,
            Self::Scalar(_) => DocumentKind::Scalar,
            Self::Absent => DocumentKind::Absent,
        }
    }

    /// Whether `self` and `other` are both mappings, both sequences or both
    /// scalars. `Absent` is compatible with nothing.
    #[must_use]
    pub const fn is_type_compatible(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Mapping(_), Self::Mapping(_))
                | (Self::Sequence(_), Self::Sequence(_))
                | (Self::Scalar(_), Self::Scalar(_))
        )
    }

    /// Returns `true` for [`Document::Absent`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrow the mapping payload, if any.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the sequence payload, if any.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the scalar payload, if any.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Look up `key` when `self` is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Follow a path of mapping keys.
    ///
    /// ```
    /// use blendconf::Document;
    ///
    /// let doc: Document = [("db", [("port", Document::from(5432))].into_iter().collect())]
    ///     .into_iter()
    ///     .collect();
    /// assert_eq!(doc.pointer(&["db", "port"]), Some(&Document::from(5432)));
    /// assert_eq!(doc.pointer(&["db", "host"]), None);
    /// ```
    #[must_use]
    pub fn pointer(&self, path: &[&str]) -> Option<&Self> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Remove every `Absent` entry, recursively.
    ///
    /// Mapping entries and sequence items that are `Absent` are dropped; a
    /// top-level `Absent` becomes the null scalar.
    #[must_use]
    pub fn prune_absent(self) -> Self {
        match self {
            Self::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .filter(|(_, value)| !value.is_absent())
                    .map(|(key, value)| (key, value.prune_absent()))
                    .collect(),
            ),
            Self::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .filter(|item| !item.is_absent())
                    .map(Self::prune_absent)
                    .collect(),
            ),
            Self::Scalar(_) => self,
            Self::Absent => Self::null(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty_mapping()
    }
}

impl From<Scalar> for Document {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Document {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Integer(value))
    }
}

impl From<i32> for Document {
    fn from(value: i32) -> Self {
        Self::Scalar(Scalar::Integer(i64::from(value)))
    }
}

impl From<f64> for Document {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::String(value.to_owned()))
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::String(value))
    }
}

impl From<Mapping> for Document {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl From<Vec<Self>> for Document {
    fn from(value: Vec<Self>) -> Self {
        Self::Sequence(value)
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl FromIterator<Self> for Document {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().collect())
    }
}
