//! Response rendering for the dispatch layer.
//!
//! Handler responses are opaque strings broadcast verbatim. The messages the
//! dispatch layer itself produces (errors and acknowledgements) are rendered
//! as single-line JSON objects tagged by `kind`:
//!
//! ```json
//! {"kind":"error","code":"unknown_command","message":"unknown command: nosuchcmd"}
//! {"kind":"ack","command":"sys_kill","message":"backend shutting down"}
//! ```

use serde::Serialize;

use super::errors::DispatchError;

/// Messages generated by the dispatch layer.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseMessage<'a> {
    /// A request failed.
    Error {
        /// Stable error code.
        code: &'a str,
        /// Human-readable description.
        message: String,
    },
    /// A control command was accepted.
    Ack {
        /// Command being acknowledged.
        command: &'a str,
        /// Human-readable description.
        message: &'a str,
    },
}

impl<'a> ResponseMessage<'a> {
    /// Builds the error message for a dispatch failure.
    pub fn error(error: &'a DispatchError) -> Self {
        Self::Error {
            code: error.code(),
            message: error.to_string(),
        }
    }

    /// Builds an acknowledgement for `command`.
    pub fn ack(command: &'a str, message: &'a str) -> Self {
        Self::Ack { command, message }
    }

    /// Renders the message as a single JSON line.
    pub fn render(&self) -> String {
        match serde_json::to_string(self) {
            Ok(rendered) => rendered,
            // Only reachable if serde_json rejects plain strings.
            Err(error) => format!("error: {error}"),
        }
    }
}

/// Serialises a handler's structured result into a response string.
///
/// # Errors
///
/// Returns `DispatchError::SerializeResponse` if serialisation fails.
pub fn json_response<T: Serialize + ?Sized>(value: &T) -> Result<String, DispatchError> {
    Ok(serde_json::to_string(value)?)
}
