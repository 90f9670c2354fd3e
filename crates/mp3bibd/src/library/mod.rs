//! Library scanning collaborator.
//!
//! The scanner reads a library configuration file listing one music
//! directory per line (blank lines and `#` comments are ignored), walks each
//! directory recursively, and records one track per `.mp3` file. Track
//! metadata comes from the file's ID3 tag when present, otherwise the file
//! stem becomes the title.
//!
//! Only an unreadable configuration file or a store failure aborts the scan.
//! Unreadable directories are logged and skipped; a tag that cannot be read
//! is logged and the track is recorded under its file name.

mod errors;
mod tags;

use std::fs;
use std::path::{Path, PathBuf};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info, warn};

use crate::store::{MetadataStore, NewTrack, TrackMetadata};

pub use errors::ScanError;

const LIBRARY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::library");
const TRACK_EXTENSION: &str = "mp3";

/// Populates a metadata store from some external source.
pub trait LibraryScanner: Send {
    /// Inserts every discovered track and returns how many were recorded.
    fn populate(&self, store: &mut dyn MetadataStore) -> Result<usize, ScanError>;
}

/// Scanner driven by a library configuration file on disk.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    library_config: Utf8PathBuf,
}

impl DirectoryScanner {
    /// Creates a scanner reading directories from `library_config`.
    pub fn new(library_config: impl Into<Utf8PathBuf>) -> Self {
        Self {
            library_config: library_config.into(),
        }
    }

    /// Path of the library configuration file.
    #[must_use]
    pub fn library_config(&self) -> &Utf8Path {
        &self.library_config
    }

    fn read_directories(&self) -> Result<Vec<PathBuf>, ScanError> {
        let contents =
            fs::read_to_string(&self.library_config).map_err(|source| ScanError::Io {
                path: self.library_config.clone(),
                source,
            })?;
        Ok(parse_library_config(&contents))
    }
}

impl LibraryScanner for DirectoryScanner {
    fn populate(&self, store: &mut dyn MetadataStore) -> Result<usize, ScanError> {
        let directories = self.read_directories()?;
        let mut files = Vec::new();
        for directory in &directories {
            collect_tracks(directory, &mut files);
        }
        files.sort();

        let mut recorded = 0_usize;
        for file in files {
            let Some(track) = build_track(&file) else {
                continue;
            };
            let id = store.insert(track)?;
            debug!(target: LIBRARY_TARGET, id, path = %file.display(), "track recorded");
            recorded += 1;
        }

        info!(
            target: LIBRARY_TARGET,
            directories = directories.len(),
            tracks = recorded,
            "library scan completed"
        );
        Ok(recorded)
    }
}

fn parse_library_config(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}

fn collect_tracks(directory: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(
                target: LIBRARY_TARGET,
                path = %directory.display(),
                %error,
                "skipping unreadable directory"
            );
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => collect_tracks(&path, files),
            Ok(kind) if kind.is_file() && is_track(&path) => files.push(path),
            Ok(_) => {}
            Err(error) => warn!(
                target: LIBRARY_TARGET,
                path = %path.display(),
                %error,
                "skipping entry with unreadable type"
            ),
        }
    }
}

fn is_track(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(TRACK_EXTENSION))
}

fn build_track(path: &Path) -> Option<NewTrack> {
    let Ok(utf8_path) = Utf8PathBuf::from_path_buf(path.to_path_buf()) else {
        warn!(
            target: LIBRARY_TARGET,
            path = %path.display(),
            "skipping track with non UTF-8 path"
        );
        return None;
    };

    let metadata = match tags::read_tag(path) {
        Ok(Some(metadata)) => metadata,
        Ok(None) => untagged_metadata(&utf8_path),
        Err(error) => {
            warn!(
                target: LIBRARY_TARGET,
                path = %utf8_path,
                %error,
                "unreadable tag, recording track by file name"
            );
            untagged_metadata(&utf8_path)
        }
    };

    Some(NewTrack {
        metadata,
        path: utf8_path,
    })
}

fn untagged_metadata(path: &Utf8Path) -> TrackMetadata {
    TrackMetadata {
        title: path.file_stem().unwrap_or_default().to_owned(),
        ..TrackMetadata::default()
    }
}
