//! Output formats for the backend's diagnostic log stream.
//!
//! Logs always go to stderr because stdout carries responses. The format name
//! is read from configuration files, `MP3BIB_LOG_FORMAT` or `--log-format`,
//! and is matched without regard to case.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How log events are rendered on stderr.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, with event fields flattened.
    #[default]
    Json,
    /// One terse line per event for reading at a terminal.
    Compact,
}
