//! Error types for the request processor lifecycle.

use std::io;

use thiserror::Error;

use crate::library::ScanError;
use crate::store::StoreError;

/// Errors that end or prevent a worker run.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The processor already ran; it serves at most once.
    #[error("request processor has already been started")]
    AlreadyStarted,

    /// The queue reported work but yielded none.
    #[error("request queue invariant violated: {message}")]
    QueueInvariantViolation { message: String },

    /// Spawning the worker thread failed.
    #[error("failed to spawn worker thread: {source}")]
    Spawn {
        #[source]
        source: io::Error,
    },

    /// The worker thread panicked.
    #[error("worker thread panicked")]
    WorkerPanic,
}

impl ProcessorError {
    /// Creates a queue invariant violation.
    pub fn queue_invariant(message: impl Into<String>) -> Self {
        Self::QueueInvariantViolation {
            message: message.into(),
        }
    }
}

/// Startup initialisation failures. These degrade the store but never stop
/// the worker from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Clearing the store failed; the scan was skipped.
    #[error("failed to clear metadata store: {0}")]
    Clear(#[source] StoreError),

    /// Populating the store failed; it may be incomplete.
    #[error("failed to populate metadata store: {0}")]
    Populate(#[source] ScanError),
}
