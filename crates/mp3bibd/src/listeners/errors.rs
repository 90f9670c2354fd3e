//! Error types for response delivery.

use std::io;

use thiserror::Error;

/// Errors a listener reports when it cannot accept a response.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The client behind the listener has gone away.
    #[error("listener disconnected")]
    Disconnected,

    /// Writing the response failed.
    #[error("failed to write response: {0}")]
    Io(#[from] io::Error),
}
