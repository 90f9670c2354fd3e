use camino::Utf8PathBuf;

/// Default log filter expression used by the backend.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// File listing the music directories to index at startup.
pub const DEFAULT_LIBRARY_CONFIG: &str = "MusicLibrary.conf";

/// Database label used when none is configured.
pub const DEFAULT_DATABASE_NAME: &str = "musicDB";

/// Collection label used when none is configured.
pub const DEFAULT_COLLECTION_NAME: &str = "musicDB";

/// Default log filter expression used by the backend.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the backend.
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Library configuration path resolved relative to the working directory.
pub fn default_library_config() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_LIBRARY_CONFIG)
}

/// Owned database label.
pub fn default_database_name() -> String {
    DEFAULT_DATABASE_NAME.to_owned()
}

/// Owned collection label.
pub fn default_collection_name() -> String {
    DEFAULT_COLLECTION_NAME.to_owned()
}
