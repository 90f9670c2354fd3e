//! Process-local document store.

use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use tracing::debug;

use super::{MetadataStore, NewTrack, StoreError, TrackId, TrackRecord, TrackSummary};

const STORE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::store");

/// Document store keeping track records in memory.
///
/// Identifiers are allocated as one past the largest identifier currently
/// stored, starting at 1, so clearing the store restarts numbering.
#[derive(Debug)]
pub struct InMemoryStore {
    label: String,
    connected: bool,
    records: BTreeMap<TrackId, TrackRecord>,
}

impl InMemoryStore {
    /// Opens a connected, empty store with the given label.
    pub fn connect(label: impl Into<String>) -> Self {
        let label = label.into();
        debug!(target: STORE_TARGET, store = %label, "metadata store connected");
        Self {
            label,
            connected: true,
            records: BTreeMap::new(),
        }
    }

    /// Builds a store that rejects every operation as unavailable.
    pub fn disconnected(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            connected: false,
            records: BTreeMap::new(),
        }
    }

    /// Label identifying the store in logs and errors.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    fn ensure_connected(&self) -> Result<(), StoreError> {
        if self.connected {
            Ok(())
        } else {
            Err(StoreError::unavailable(&self.label))
        }
    }

    fn next_id(&self) -> TrackId {
        self.records
            .last_key_value()
            .map_or(1, |(id, _)| id.saturating_add(1))
    }

    fn record(&self, id: TrackId) -> Result<&TrackRecord, StoreError> {
        self.ensure_connected()?;
        self.records.get(&id).ok_or(StoreError::not_found(id))
    }
}

impl MetadataStore for InMemoryStore {
    fn clear(&mut self) -> Result<(), StoreError> {
        self.ensure_connected()?;
        self.records.clear();
        Ok(())
    }

    fn insert(&mut self, track: NewTrack) -> Result<TrackId, StoreError> {
        self.ensure_connected()?;
        let id = self.next_id();
        self.records.insert(
            id,
            TrackRecord {
                id,
                metadata: track.metadata,
                path: track.path,
            },
        );
        Ok(id)
    }

    fn count(&self) -> Result<usize, StoreError> {
        self.ensure_connected()?;
        Ok(self.records.len())
    }

    fn all(&self) -> Result<Vec<TrackSummary>, StoreError> {
        self.ensure_connected()?;
        Ok(self.records.values().map(TrackSummary::from).collect())
    }

    fn get(&self, id: TrackId) -> Result<TrackRecord, StoreError> {
        self.record(id).cloned()
    }

    fn file_path(&self, id: TrackId) -> Result<Utf8PathBuf, StoreError> {
        self.record(id).map(|record| record.path.clone())
    }
}
