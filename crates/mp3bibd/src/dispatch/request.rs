//! Request decoding for the dispatch layer.
//!
//! Two encodings are accepted. The text form is `<command> [payload]`: the
//! command name is the first whitespace-delimited token and the payload is
//! the remainder with surrounding whitespace trimmed. A request whose first
//! non-whitespace character is `{` is decoded as a JSON envelope:
//!
//! ```json
//! {"command":"detail","payload":"3"}
//! ```

use serde::Deserialize;

use super::errors::DispatchError;

/// A decoded request: command name plus argument payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    name: String,
    payload: String,
}

#[derive(Debug, Deserialize)]
struct JsonEnvelope {
    command: String,
    #[serde(default)]
    payload: String,
}

impl CommandRequest {
    /// Decodes a raw request string.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedRequest` if the request is empty, is
    /// not a valid JSON envelope, or names an empty command.
    pub fn parse(raw: &str) -> Result<Self, DispatchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DispatchError::malformed("empty request"));
        }

        if trimmed.starts_with('{') {
            return Self::parse_json(trimmed);
        }

        let (name, payload) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        Ok(Self {
            name: name.to_owned(),
            payload: payload.trim().to_owned(),
        })
    }

    fn parse_json(trimmed: &str) -> Result<Self, DispatchError> {
        let envelope: JsonEnvelope =
            serde_json::from_str(trimmed).map_err(DispatchError::from_json_error)?;
        let name = envelope.command.trim();
        if name.is_empty() {
            return Err(DispatchError::malformed("command field is empty"));
        }
        Ok(Self {
            name: name.to_owned(),
            payload: envelope.payload,
        })
    }

    /// Command name used for registry lookup.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument payload forwarded to the handler.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}
