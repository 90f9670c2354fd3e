//! Tag reading for scanned tracks, backed by the `id3` crate.
//!
//! ID3v2 frames win over an ID3v1 trailer when a file carries both. A file
//! without any tag is not an error; the caller falls back to its file name.

use std::path::Path;

use id3::{ErrorKind, TagLike};

use crate::store::TrackMetadata;

/// Reads the tag of `path`, returning `Ok(None)` for untagged files.
pub(crate) fn read_tag(path: &Path) -> Result<Option<TrackMetadata>, id3::Error> {
    match id3::v1v2::read_from_path(path) {
        Ok(tag) => Ok(Some(metadata_from(&tag))),
        Err(error) if matches!(error.kind, ErrorKind::NoTag) => Ok(None),
        Err(error) => Err(error),
    }
}

fn metadata_from(tag: &id3::Tag) -> TrackMetadata {
    let text = |value: Option<&str>| value.map(str::trim).unwrap_or_default().to_owned();
    TrackMetadata {
        title: text(tag.title()),
        artist: text(tag.artist()),
        album: text(tag.album()),
        year: tag.year().map(|year| year.to_string()).unwrap_or_default(),
        genre: text(tag.genre()),
    }
}
