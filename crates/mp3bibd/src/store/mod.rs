//! Metadata store boundary.
//!
//! The request processor owns exactly one store and touches it only from the
//! worker thread, so implementations need `Send` but no internal locking.
//! [`InMemoryStore`] is the document store used by the shipped binary.

mod errors;
mod memory;
mod track;

use camino::Utf8PathBuf;

pub use errors::StoreError;
pub use memory::InMemoryStore;
pub use track::{NewTrack, TrackId, TrackMetadata, TrackRecord, TrackSummary};

/// Operations the backend performs against the metadata store.
pub trait MetadataStore: Send {
    /// Removes every record.
    fn clear(&mut self) -> Result<(), StoreError>;

    /// Inserts a track and returns the identifier the store assigned.
    fn insert(&mut self, track: NewTrack) -> Result<TrackId, StoreError>;

    /// Number of stored tracks.
    fn count(&self) -> Result<usize, StoreError>;

    /// Summaries of every stored track in identifier order.
    fn all(&self) -> Result<Vec<TrackSummary>, StoreError>;

    /// Full record for `id`.
    fn get(&self, id: TrackId) -> Result<TrackRecord, StoreError>;

    /// Filesystem location of the track `id`.
    fn file_path(&self, id: TrackId) -> Result<Utf8PathBuf, StoreError>;
}
