//! Name-keyed handler registry.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::store::MetadataStore;

use super::commands::{
    CountCommand, DetailCommand, EchoCommand, ListCommand, PathCommand, SHUTDOWN_COMMAND,
    ShutdownCommand,
};
use super::errors::DispatchError;
use super::handler::{CommandHandler, CommandOutcome};
use super::request::CommandRequest;
use super::response::ResponseMessage;
use super::DISPATCH_TARGET;

/// Maps command names to handlers and invokes them.
///
/// Registration normally happens once during startup, but the map sits behind
/// a [`RwLock`] so late registration is safe alongside invocation. The lock is
/// held only for the lookup, never while a handler runs.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn CommandHandler>>>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in command.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register("echo", EchoCommand);
        registry.register(SHUTDOWN_COMMAND, ShutdownCommand);
        registry.register("count", CountCommand);
        registry.register("list", ListCommand);
        registry.register("detail", DetailCommand);
        registry.register("path", PathCommand);
        registry
    }

    /// Binds `handler` to `name`, replacing any previous binding.
    pub fn register<H>(&self, name: impl Into<String>, handler: H)
    where
        H: CommandHandler + 'static,
    {
        let name = name.into();
        let previous = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), Arc::new(handler));
        if previous.is_some() {
            debug!(target: DISPATCH_TARGET, command = %name, "command handler replaced");
        }
    }

    /// Returns `true` when a handler is bound to `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered command names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Decodes and executes `request`, returning its response string.
    pub fn invoke(&self, request: &str, store: &mut dyn MetadataStore) -> String {
        self.dispatch(request, store).response
    }

    /// Decodes and executes `request`, returning the typed outcome.
    ///
    /// Every failure is rendered as an error response with
    /// [`Control::Continue`](super::Control::Continue); only a handler can ask
    /// the worker to terminate.
    pub fn dispatch(&self, request: &str, store: &mut dyn MetadataStore) -> CommandOutcome {
        match self.try_dispatch(request, store) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, code = error.code(), %error, "request failed");
                CommandOutcome::reply(ResponseMessage::error(&error).render())
            }
        }
    }

    fn try_dispatch(
        &self,
        raw: &str,
        store: &mut dyn MetadataStore,
    ) -> Result<CommandOutcome, DispatchError> {
        let request = CommandRequest::parse(raw)?;
        let handler = self
            .lookup(request.name())
            .ok_or_else(|| DispatchError::unknown_command(request.name()))?;

        debug!(
            target: DISPATCH_TARGET,
            command = request.name(),
            "dispatching request"
        );

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            handler.handle(request.payload(), store)
        }));
        match result {
            Ok(outcome) => outcome,
            Err(panic) => Err(DispatchError::handler_failure(
                request.name(),
                panic_message(panic.as_ref()),
            )),
        }
    }

    fn lookup(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("handler panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("handler panicked: {message}")
    } else {
        "handler panicked".to_owned()
    }
}
