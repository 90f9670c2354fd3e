//! Scanner double that inserts synthetic tracks.

use camino::Utf8PathBuf;

use crate::library::{LibraryScanner, ScanError};
use crate::store::{MetadataStore, NewTrack, TrackMetadata};

/// Inserts `tracks` numbered tracks without touching the filesystem.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StubScanner {
    tracks: usize,
}

impl StubScanner {
    pub(crate) const fn with_tracks(tracks: usize) -> Self {
        Self { tracks }
    }
}

impl LibraryScanner for StubScanner {
    fn populate(&self, store: &mut dyn MetadataStore) -> Result<usize, ScanError> {
        for index in 1..=self.tracks {
            store.insert(NewTrack {
                metadata: TrackMetadata {
                    title: format!("Track {index}"),
                    ..TrackMetadata::default()
                },
                path: Utf8PathBuf::from(format!("/music/track{index}.mp3")),
            })?;
        }
        Ok(self.tracks)
    }
}
