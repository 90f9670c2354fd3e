//! The `echo` command.

use crate::dispatch::{CommandHandler, CommandOutcome, DispatchError};
use crate::store::MetadataStore;

/// Replies with its payload unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoCommand;

impl CommandHandler for EchoCommand {
    fn handle(
        &self,
        payload: &str,
        _store: &mut dyn MetadataStore,
    ) -> Result<CommandOutcome, DispatchError> {
        Ok(CommandOutcome::reply(payload))
    }
}
