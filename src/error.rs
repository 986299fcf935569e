//! Error definitions.

use std::collections::TryReserveError;
use thiserror::Error;

/// Failures reported by [`ChainedHashMap`](crate::ChainedHashMap)
/// construction and insertion.
#[derive(Error, Debug)]
pub enum MapError {
    /// A bucket array must hold at least one bucket.
    #[error("hash map capacity must be greater than zero")]
    ZeroCapacity,
    /// Doubling (or rounding up to a power of two) does not fit in `usize`.
    #[error("hash map capacity overflows usize")]
    CapacityOverflow,
    #[error("max load factor must be finite and positive, got {0}")]
    InvalidLoadFactor(f64),
    /// The allocator refused the bucket array, a chain node or a string
    /// copy.
    #[error("hash map allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Failure to insert into an [`RbTree`](crate::RbTree). The tree is left
/// unmodified.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("unable to allocate tree node: {0}")]
    Alloc(#[from] TryReserveError),
}

/// A broken red-black or search-tree property found by
/// [`RbTree::verify`](crate::RbTree::verify). `key` names the offending node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeViolation {
    #[error("root is red")]
    RedRoot,
    #[error("nil sentinel is red")]
    RedSentinel,
    #[error("red node {key} has a red child")]
    RedRedEdge { key: i32 },
    #[error("black height differs below node {key}")]
    BlackHeightMismatch { key: i32 },
    #[error("node {key} breaks in-order key ordering")]
    OrderViolation { key: i32 },
    #[error("node {key} is not the parent of its child")]
    BrokenParentLink { key: i32 },
    #[error("{reachable} nodes reachable from the root, but len is {len}")]
    LenMismatch { reachable: usize, len: usize },
}
