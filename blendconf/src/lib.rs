//! Merge configuration documents from heterogeneous formats.
//!
//! Every source is loaded into a format-agnostic [`Document`], the documents
//! are folded left to right with a [`MergeStrategy`], and the result is
//! dumped through a [`FormatAdapter`]. Later sources win on conflict.
//!
//! ```
//! use blendconf::{AdapterRegistry, Document, FormatTag, MergeStrategy, merge};
//!
//! # fn main() -> Result<(), blendconf::BlendError> {
//! let registry = AdapterRegistry::new();
//! let base = registry
//!     .adapter(FormatTag::Yaml)?
//!     .load("base.yaml", "db:\n  host: a\n  port: 5432\n")?;
//! let local = registry
//!     .adapter(FormatTag::Env)?
//!     .load("local.env", "DB_PORT=6000\n")?;
//! let merged = merge(&[base, local], MergeStrategy::DeepMerge)?;
//! assert_eq!(merged.pointer(&["db", "host"]), Some(&Document::from("a")));
//! assert_eq!(merged.pointer(&["db", "port"]), Some(&Document::from("6000")));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod document;
pub mod error;
pub mod format;
pub mod merge;
pub mod pipeline;

pub use document::{Document, DocumentKind, Mapping, Scalar};
pub use error::{BlendError, BlendResult, Position};
pub use format::{
    AdapterRegistry, EnvAdapter, EnvOptions, FormatAdapter, FormatTag, JsonAdapter, TomlAdapter,
    YamlAdapter,
};
pub use merge::{MergeStrategy, merge, merge_pair};
pub use pipeline::{OutputTarget, PipelineRequest, RunSummary, Source, run};
