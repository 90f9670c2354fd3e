//! The `sys_kill` shutdown command.

use crate::dispatch::response::ResponseMessage;
use crate::dispatch::{CommandHandler, CommandOutcome, DispatchError};
use crate::store::MetadataStore;

/// Reserved command name that stops the worker loop.
pub const SHUTDOWN_COMMAND: &str = "sys_kill";

const SHUTDOWN_MESSAGE: &str = "backend shutting down";

/// Acknowledges the request and tells the worker to terminate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShutdownCommand;

impl CommandHandler for ShutdownCommand {
    fn handle(
        &self,
        _payload: &str,
        _store: &mut dyn MetadataStore,
    ) -> Result<CommandOutcome, DispatchError> {
        let ack = ResponseMessage::ack(SHUTDOWN_COMMAND, SHUTDOWN_MESSAGE).render();
        Ok(CommandOutcome::terminate(ack))
    }
}
