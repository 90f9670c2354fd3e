//! Built-in commands registered by [`CommandRegistry::with_builtins`].
//!
//! [`CommandRegistry::with_builtins`]: super::CommandRegistry::with_builtins

mod echo;
mod kill;
mod library;

pub use echo::EchoCommand;
pub use kill::{SHUTDOWN_COMMAND, ShutdownCommand};
pub use library::{CountCommand, DetailCommand, ListCommand, PathCommand};
