//! Error types for request decoding and command dispatch.
//!
//! None of these errors leave the dispatch layer. The registry renders each
//! one into an error response so the client always receives an answer and the
//! worker loop keeps running.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced while decoding or executing a request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request could not be decoded into a command name and payload.
    #[error("malformed request: {message}")]
    MalformedRequest {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// No handler is registered under the decoded command name.
    #[error("unknown command: {command}")]
    UnknownCommand { command: String },

    /// The handler rejected its argument payload.
    #[error("invalid arguments for '{command}': {message}")]
    InvalidArguments { command: String, message: String },

    /// The handler failed internally.
    #[error("command '{command}' failed: {message}")]
    HandlerFailure { command: String, message: String },

    /// The metadata store rejected an operation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A handler's response could not be serialised.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[from] serde_json::Error),
}

impl DispatchError {
    /// Stable machine-readable code carried by error responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedRequest { .. } => "malformed_request",
            Self::UnknownCommand { .. } => "unknown_command",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::HandlerFailure { .. } => "handler_failure",
            Self::Store(StoreError::Unavailable { .. }) => "store_unavailable",
            Self::Store(StoreError::NotFound { .. }) => "not_found",
            Self::SerializeResponse(_) => "serialize_response",
        }
    }

    /// Creates a malformed request error from a serde error.
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedRequest {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed request error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an unknown command error.
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Creates an invalid arguments error.
    pub fn invalid_arguments(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates a handler failure error.
    pub fn handler_failure(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerFailure {
            command: command.into(),
            message: message.into(),
        }
    }
}
