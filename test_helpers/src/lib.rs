//! Test helpers shared across crates in the blendconf workspace.
//!
//! - [`env`] serialises environment variable mutation behind RAII guards.
//! - [`sources`] writes configuration source files into a scratch directory.

pub mod env;
pub mod sources;

pub use sources::SourceDir;
