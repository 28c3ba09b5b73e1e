use thiserror::Error;

/// Failures raised inside the tree.
///
/// None of these reach callers of [`WgbTreeMap`](crate::WgbTreeMap)'s map operations:
/// conflicts and misses are absorbed by `put` and `remove`, and invariant violations
/// are bugs. They surface only from configuration (`DivideByZero`).
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum WgbError {
    /// The key being inserted is already the pivot of a node on its path.
    #[error("key is already present in the tree")]
    UniquenessConflict,
    /// The key being deleted is not in the tree.
    #[error("key was not found in the tree")]
    NotFound,
    /// A bucket capacity of zero was requested.
    #[error("bucket capacity must be non-zero")]
    DivideByZero,
    /// Internal consistency was lost.
    #[error("tree invariant violated: {0}")]
    InvariantViolation(&'static str),
}
