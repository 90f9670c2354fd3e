//! The capability every registered command implements.

use crate::store::MetadataStore;

use super::errors::DispatchError;

/// Whether the worker keeps serving after a command completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep processing queued requests.
    Continue,
    /// Stop the worker once the response has been broadcast.
    Terminate,
}

/// Result of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Response broadcast to every attached listener.
    pub response: String,
    /// Instruction for the worker loop.
    pub control: Control,
}

impl CommandOutcome {
    /// An ordinary reply; the worker keeps serving.
    pub fn reply(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            control: Control::Continue,
        }
    }

    /// A final reply; the worker stops after broadcasting it.
    pub fn terminate(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            control: Control::Terminate,
        }
    }

    /// Returns `true` when the worker should stop.
    pub fn is_terminal(&self) -> bool {
        self.control == Control::Terminate
    }
}

/// Executable unit bound to a command name.
///
/// Handlers run on the worker thread, one at a time, with exclusive access to
/// the metadata store. Failures are returned, never panicked; the registry
/// turns them into error responses.
pub trait CommandHandler: Send + Sync {
    /// Executes the command with its argument payload.
    fn handle(
        &self,
        payload: &str,
        store: &mut dyn MetadataStore,
    ) -> Result<CommandOutcome, DispatchError>;
}

impl<F> CommandHandler for F
where
    F: Fn(&str, &mut dyn MetadataStore) -> Result<CommandOutcome, DispatchError> + Send + Sync,
{
    fn handle(
        &self,
        payload: &str,
        store: &mut dyn MetadataStore,
    ) -> Result<CommandOutcome, DispatchError> {
        self(payload, store)
    }
}
