//! Format-agnostic merge engine.
//!
//! Documents are folded left to right, so later sources take precedence:
//! base configuration first, then overrides, in the order they were given.

mod strategy;

use tracing::debug;

use crate::document::{Document, Mapping};
use crate::error::{BlendError, BlendResult};

pub use strategy::MergeStrategy;

/// Merge an ordered list of documents into one.
///
/// A single document is returned unchanged. The result never contains
/// [`Document::Absent`].
///
/// # Errors
///
/// Returns [`BlendError::EmptyInput`] when `documents` is empty.
///
/// # Examples
///
/// ```
/// use blendconf::{Document, MergeStrategy, merge};
///
/// let base: Document = [("x", Document::from(1)), ("y", Document::from(2))]
///     .into_iter()
///     .collect();
/// let overlay: Document = [("y", Document::from(3)), ("z", Document::from(4))]
///     .into_iter()
///     .collect();
/// let merged = merge(&[base, overlay], MergeStrategy::DeepMerge)?;
/// assert_eq!(merged.get("y"), Some(&Document::from(3)));
/// # Ok::<_, blendconf::BlendError>(())
/// ```
pub fn merge(documents: &[Document], strategy: MergeStrategy) -> BlendResult<Document> {
    let (first, rest) = documents.split_first().ok_or(BlendError::EmptyInput)?;
    let merged = rest
        .iter()
        .enumerate()
        .fold(first.clone(), |acc, (index, next)| {
            debug!(
                step = index + 1,
                %strategy,
                left = %acc.kind(),
                right = %next.kind(),
                "merging document"
            );
            merge_pair(&acc, next, strategy)
        });
    Ok(merged.prune_absent())
}

/// Merge two documents; `right` is the later source.
///
/// - `Absent` on the right keeps `left`.
/// - Incompatible types, or the `override` strategy, yield `right`.
/// - Mappings merge key by key: `left`'s order first, then keys only in
///   `right` in `right`'s order.
/// - Sequences merge element-wise (`deep-merge`), concatenate
///   (`append-sequences`) or concatenate `right` first (`prepend-sequences`).
/// - Scalars yield `right`.
#[must_use]
pub fn merge_pair(left: &Document, right: &Document, strategy: MergeStrategy) -> Document {
    if right.is_absent() {
        return left.clone();
    }
    if strategy == MergeStrategy::Override || !left.is_type_compatible(right) {
        return right.clone();
    }
    match (left, right) {
        (Document::Mapping(a), Document::Mapping(b)) => {
            Document::Mapping(merge_mappings(a, b, strategy))
        }
        (Document::Sequence(a), Document::Sequence(b)) => {
            Document::Sequence(merge_sequences(a, b, strategy))
        }
        _ => right.clone(),
    }
}

fn merge_mappings(left: &Mapping, right: &Mapping, strategy: MergeStrategy) -> Mapping {
    let mut merged = Mapping::with_capacity(left.len() + right.len());
    for (key, value) in left {
        let entry = right
            .get(key)
            .map_or_else(|| value.clone(), |other| merge_pair(value, other, strategy));
        merged.insert(key.clone(), entry);
    }
    for (key, value) in right {
        if !left.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

fn merge_sequences(left: &[Document], right: &[Document], strategy: MergeStrategy) -> Vec<Document> {
    match strategy {
        MergeStrategy::AppendSequences => left.iter().chain(right).cloned().collect(),
        MergeStrategy::PrependSequences => right.iter().chain(left).cloned().collect(),
        MergeStrategy::DeepMerge | MergeStrategy::Override => {
            let tail = if left.len() > right.len() {
                left.get(right.len()..)
            } else {
                right.get(left.len()..)
            }
            .unwrap_or_default();
            left.iter()
                .zip(right)
                .map(|(a, b)| merge_pair(a, b, strategy))
                .chain(tail.iter().cloned())
                .collect()
        }
    }
}
