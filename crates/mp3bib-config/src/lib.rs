//! Layered configuration for the mp3bib backend.
//!
//! Values are merged from built-in defaults, configuration files, `MP3BIB_*`
//! environment variables and command-line flags, in increasing order of
//! precedence. Loading is delegated to [`ortho_config`].

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_COLLECTION_NAME, DEFAULT_DATABASE_NAME, DEFAULT_LIBRARY_CONFIG, DEFAULT_LOG_FILTER,
    default_collection_name, default_database_name, default_library_config, default_log_filter,
    default_log_filter_string, default_log_format,
};
pub use logging::LogFormat;

/// Resolved backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MP3BIB")]
pub struct Config {
    /// `tracing` filter expression applied to the backend's logs.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Output format for structured logs.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
    /// File listing the directories scanned into the store at startup.
    #[ortho_config(default = defaults::default_library_config())]
    pub library_config: Utf8PathBuf,
    /// Label of the metadata database.
    #[ortho_config(default = defaults::default_database_name())]
    pub database_name: String,
    /// Label of the collection holding track records.
    #[ortho_config(default = defaults::default_collection_name())]
    pub collection_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            library_config: default_library_config(),
            database_name: default_database_name(),
            collection_name: default_collection_name(),
        }
    }
}

impl Config {
    /// Filter expression handed to the tracing subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for structured logs.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Path of the library configuration file.
    #[must_use]
    pub fn library_config(&self) -> &Utf8Path {
        &self.library_config
    }

    /// Fully qualified store label in `database.collection` form.
    #[must_use]
    pub fn store_label(&self) -> String {
        format!("{}.{}", self.database_name, self.collection_name)
    }
}
