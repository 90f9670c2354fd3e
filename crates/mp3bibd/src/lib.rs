//! Request dispatch core for the mp3bib library backend.
//!
//! Front ends submit encoded requests such as `echo hello` or `detail 3`. A
//! single worker thread takes them in submission order, invokes the command
//! bound to the request's name, and broadcasts the response to every attached
//! listener. The worker owns the track metadata store, which it clears and
//! repopulates from the configured music library before serving.
//!
//! The pieces, bottom-up:
//!
//! - [`MetadataStore`] and [`InMemoryStore`] hold track records.
//! - [`LibraryScanner`] and [`DirectoryScanner`] fill the store at startup.
//! - [`CommandRegistry`] maps command names to [`CommandHandler`]s and turns
//!   every failure into an error response.
//! - [`ListenerSet`] and [`ResponseDistributor`] fan responses out.
//! - [`RequestProcessor`] owns the queue and the worker loop.
//! - [`bootstrap_with`] loads configuration, installs telemetry and wires the
//!   above into a [`Backend`].
//!
//! Shutdown is cooperative: the `sys_kill` command, [`RequestProcessor::kill`]
//! and [`RequestProcessor::request_shutdown`] all stop the worker between
//! requests, never during one.

mod bootstrap;
pub mod dispatch;
mod health;
pub mod library;
pub mod listeners;
mod processor;
mod shutdown;
pub mod store;
mod telemetry;

pub use bootstrap::{
    Backend, BootstrapError, ConfigLoader, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use dispatch::{CommandHandler, CommandOutcome, CommandRegistry, Control, DispatchError};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use library::{DirectoryScanner, LibraryScanner, ScanError};
pub use listeners::{
    DeliveryError, ListenerId, ListenerSet, ResponseDistributor, ResponseListener, WriterListener,
};
pub use processor::{ProcessorError, RequestProcessor, RunSummary, StartupError, WorkerHandle};
pub use shutdown::{ShutdownError, ShutdownSignal, SystemShutdownSignal};
pub use store::{InMemoryStore, MetadataStore, StoreError};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
