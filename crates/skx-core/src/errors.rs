//! Storage-contract error types.
//!
//! `StoreError` is what every `Repository` implementation returns. Engine-level
//! errors (`EngineError`) live in `skx-engine` and wrap this type as their
//! opaque, retryable storage failure.

use thiserror::Error;

/// Errors surfaced by a `Repository` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    /// A row expected to exist was missing mid-operation.
    #[error("Missing row: {entity} {id}")]
    Missing { entity: String, id: String },

    /// Connectivity, transaction, or query failure in the backing store.
    #[error("Storage backend failure: {0}")]
    Backend(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
