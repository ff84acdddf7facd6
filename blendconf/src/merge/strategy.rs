//! Merge strategy selection.

use std::fmt;

use clap::ValueEnum;

/// Policy controlling how deeply conflicting structures are reconciled.
///
/// Every strategy lets the later source win once a conflict cannot be
/// reconciled; they differ only in how far they recurse first. One strategy
/// governs a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MergeStrategy {
    /// Later source replaces earlier values outright, without recursion.
    Override,
    /// Recurse into mappings and merge sequences element by element.
    #[default]
    DeepMerge,
    /// Like `deep-merge`, but sequences are concatenated.
    AppendSequences,
    /// Like `deep-merge`, but the later sequence is placed first.
    PrependSequences,
}

impl MergeStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Override,
        Self::DeepMerge,
        Self::AppendSequences,
        Self::PrependSequences,
    ];

    /// Returns the CLI spelling of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::DeepMerge => "deep-merge",
            Self::AppendSequences => "append-sequences",
            Self::PrependSequences => "prepend-sequences",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
