//! Error types for collection store access
//!
//! Store implementations report every lower-layer failure through
//! [`StoreError`]. Upper layers treat it as opaque and wrap it without
//! inspecting the reason text.

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures raised by a [`CollectionStore`](crate::CollectionStore)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not serve a request against a collection
    #[error("store failure in collection '{collection}': {reason}")]
    Backend {
        /// Collection the request was scoped to
        collection: String,
        /// Backend-provided description
        reason: String,
    },

    /// A range scan failed while yielding an item
    #[error("iteration failed: {reason}")]
    Iteration {
        /// Description of the failed step
        reason: String,
    },

    /// The key is not acceptable to the store
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey {
        /// Offending key
        key: String,
        /// Why it was rejected
        reason: String,
    },
}

impl StoreError {
    /// Create a backend error for a collection
    pub fn backend(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Backend {
            collection: collection.into(),
            reason: reason.into(),
        }
    }

    /// Create an iteration error
    pub fn iteration(reason: impl Into<String>) -> Self {
        StoreError::Iteration {
            reason: reason.into(),
        }
    }

    /// Whether this error was raised mid-scan
    pub fn is_iteration(&self) -> bool {
        matches!(self, StoreError::Iteration { .. })
    }
}
