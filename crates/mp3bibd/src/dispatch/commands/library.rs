//! Queries against the metadata store.

use serde::Serialize;

use crate::dispatch::response::json_response;
use crate::dispatch::{CommandHandler, CommandOutcome, DispatchError};
use crate::store::{MetadataStore, TrackId};

/// Replies with `{"count":N}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountCommand;

/// Replies with a JSON array of track summaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListCommand;

/// Replies with the full record for the track id in the payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetailCommand;

/// Replies with `{"id":N,"path":"..."}` for the track id in the payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathCommand;

#[derive(Serialize)]
struct CountResponse {
    count: usize,
}

#[derive(Serialize)]
struct PathResponse<'a> {
    id: TrackId,
    path: &'a str,
}

fn parse_track_id(command: &str, payload: &str) -> Result<TrackId, DispatchError> {
    let raw = payload.trim();
    if raw.is_empty() {
        return Err(DispatchError::invalid_arguments(command, "missing track id"));
    }
    raw.parse().map_err(|_| {
        DispatchError::invalid_arguments(command, format!("'{raw}' is not a track id"))
    })
}

impl CommandHandler for CountCommand {
    fn handle(
        &self,
        _payload: &str,
        store: &mut dyn MetadataStore,
    ) -> Result<CommandOutcome, DispatchError> {
        let count = store.count()?;
        json_response(&CountResponse { count }).map(CommandOutcome::reply)
    }
}

impl CommandHandler for ListCommand {
    fn handle(
        &self,
        _payload: &str,
        store: &mut dyn MetadataStore,
    ) -> Result<CommandOutcome, DispatchError> {
        let tracks = store.all()?;
        json_response(&tracks).map(CommandOutcome::reply)
    }
}

impl CommandHandler for DetailCommand {
    fn handle(
        &self,
        payload: &str,
        store: &mut dyn MetadataStore,
    ) -> Result<CommandOutcome, DispatchError> {
        let id = parse_track_id("detail", payload)?;
        let record = store.get(id)?;
        json_response(&record).map(CommandOutcome::reply)
    }
}

impl CommandHandler for PathCommand {
    fn handle(
        &self,
        payload: &str,
        store: &mut dyn MetadataStore,
    ) -> Result<CommandOutcome, DispatchError> {
        let id = parse_track_id("path", payload)?;
        let path = store.file_path(id)?;
        json_response(&PathResponse {
            id,
            path: path.as_str(),
        })
        .map(CommandOutcome::reply)
    }
}
