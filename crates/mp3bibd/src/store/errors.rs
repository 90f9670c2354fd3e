//! Error types for metadata store operations.

use thiserror::Error;

use super::TrackId;

/// Errors surfaced by a [`MetadataStore`](super::MetadataStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store has no live connection.
    #[error("metadata store '{store}' is not connected")]
    Unavailable { store: String },

    /// No record carries the requested identifier.
    #[error("no track with id {id}")]
    NotFound { id: TrackId },
}

impl StoreError {
    /// Creates an unavailable-store error.
    pub fn unavailable(store: impl Into<String>) -> Self {
        Self::Unavailable {
            store: store.into(),
        }
    }

    /// Creates a missing-record error.
    pub const fn not_found(id: TrackId) -> Self {
        Self::NotFound { id }
    }
}
