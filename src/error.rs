//! Error types.
//!
//! Every failure is local and synchronous: nothing here is transient, so none of these errors is
//! worth retrying without changing the input. Lookups that are expected to miss routinely also
//! come in `try_*` forms returning `Option`.

use thiserror::Error;

/// Errors reported by [`SearchTree`](crate::SearchTree) operations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// No key satisfied the lookup.
    #[error("key not found")]
    NotFound,

    /// [`add`](crate::SearchTree::add) was given a key the tree already holds.
    #[error("key already present")]
    DuplicateKey,

    /// A scapegoat balance factor outside `[0.5, 1.0]`.
    #[error("scapegoat alpha {alpha} is outside [0.5, 1.0]")]
    InvalidAlpha {
        /// The rejected value.
        alpha: f64,
    },

    /// The destination of [`copy_to`](crate::SearchTree::copy_to) cannot hold every entry.
    #[error("buffer of {available} slots cannot take {needed} entries at offset {offset}")]
    BufferTooSmall {
        /// Requested start index.
        offset: usize,
        /// Number of entries to copy.
        needed: usize,
        /// Length of the destination.
        available: usize,
    },

    /// `min` or `max` was called on an empty tree.
    #[error("tree is empty")]
    Empty,
}

/// Result type alias for tree operations.
pub type Result<T> = core::result::Result<T, Error>;
