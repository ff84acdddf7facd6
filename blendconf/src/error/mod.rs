//! Error types produced while loading, merging and writing configuration.

mod constructors;
mod types;

pub use types::{BlendError, Position};

/// Result alias used throughout the crate.
pub type BlendResult<T> = Result<T, BlendError>;
