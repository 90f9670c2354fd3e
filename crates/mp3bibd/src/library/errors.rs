//! Error types for library scanning.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that abort a library scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The library configuration could not be read.
    #[error("failed to read library configuration '{path}': {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// The store rejected an insert.
    #[error("failed to record track: {0}")]
    Store(#[from] StoreError),
}
