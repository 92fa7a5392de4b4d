//! Lookup error types.

use thiserror::Error;

/// Errors returned by the lookup widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// A commit named an entry that is not in the displayed list.
    #[error("No option at index {index} (list has {len} entries)")]
    NoSuchOption {
        /// The requested displayed index.
        index: usize,
        /// Number of displayed entries, placeholder included.
        len: usize,
    },

    /// An async search adapter was built outside a tokio runtime.
    #[error("Async search requires a running tokio runtime")]
    NoRuntime,

    /// The state lock was poisoned by a panic.
    #[error("Lookup state is poisoned")]
    Poisoned,
}
