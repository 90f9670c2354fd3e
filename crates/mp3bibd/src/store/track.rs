//! Track metadata records.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store when a track is inserted.
pub type TrackId = u32;

/// Descriptive tag fields for a single track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub genre: String,
}

/// A track awaiting insertion; the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrack {
    pub metadata: TrackMetadata,
    pub path: Utf8PathBuf,
}

/// A stored track with every recorded field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: TrackId,
    #[serde(flatten)]
    pub metadata: TrackMetadata,
    pub path: Utf8PathBuf,
}

/// The subset of a record returned by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl From<&TrackRecord> for TrackSummary {
    fn from(record: &TrackRecord) -> Self {
        Self {
            id: record.id,
            title: record.metadata.title.clone(),
            artist: record.metadata.artist.clone(),
            album: record.metadata.album.clone(),
        }
    }
}
