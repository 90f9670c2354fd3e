//! Command registry and invocation.
//!
//! Requests are opaque strings decoded by [`CommandRequest`] into a command
//! name and an argument payload. The [`CommandRegistry`] maps names to
//! [`CommandHandler`] trait objects and converts every failure (unknown
//! command, malformed request, handler error or panic) into an error response,
//! so each request yields exactly one response and the worker loop never
//! observes an error.

mod commands;
mod errors;
mod handler;
mod registry;
mod request;
mod response;

pub use commands::{
    CountCommand, DetailCommand, EchoCommand, ListCommand, PathCommand, SHUTDOWN_COMMAND,
    ShutdownCommand,
};
pub use errors::DispatchError;
pub use handler::{CommandHandler, CommandOutcome, Control};
pub use registry::CommandRegistry;
pub use request::CommandRequest;
pub use response::{ResponseMessage, json_response};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
