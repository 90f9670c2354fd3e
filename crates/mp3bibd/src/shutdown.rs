//! Termination signals that stop the backend between requests.
//!
//! Handlers are registered when [`SystemShutdownSignal::install`] runs, not
//! when a thread starts waiting, so a signal that arrives while the worker is
//! still indexing the library is held until [`ShutdownSignal::wait`] picks it
//! up instead of killing the process outright.

use std::io;
use std::os::raw::c_int;
use std::sync::{Mutex, PoisonError};

use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::{Handle, Signals};
use thiserror::Error;
use tracing::info;

const SHUTDOWN_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::shutdown");

/// Signals that ask the backend to stop.
pub const SHUTDOWN_SIGNALS: [c_int; 4] = [SIGTERM, SIGINT, SIGQUIT, SIGHUP];

/// Something a front end can block on until the backend should stop.
pub trait ShutdownSignal: Send + Sync {
    /// Blocks until shutdown should proceed.
    fn wait(&self) -> Result<(), ShutdownError>;
}

/// Errors reported while watching for shutdown signals.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// The signal handlers could not be registered.
    #[error("failed to install signal handlers: {source}")]
    Install {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Watches [`SHUTDOWN_SIGNALS`] through handlers registered up front.
pub struct SystemShutdownSignal {
    signals: Mutex<Signals>,
    handle: Handle,
}

impl std::fmt::Debug for SystemShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemShutdownSignal")
            .field("released", &self.handle.is_closed())
            .finish_non_exhaustive()
    }
}

impl SystemShutdownSignal {
    /// Registers the handlers. Signals delivered from here on are queued
    /// for [`wait`](ShutdownSignal::wait).
    ///
    /// # Errors
    ///
    /// Returns [`ShutdownError::Install`] when registration fails.
    pub fn install() -> Result<Self, ShutdownError> {
        let signals =
            Signals::new(SHUTDOWN_SIGNALS).map_err(|source| ShutdownError::Install { source })?;
        let handle = signals.handle();
        Ok(Self {
            signals: Mutex::new(signals),
            handle,
        })
    }

    /// Wakes a pending [`wait`](ShutdownSignal::wait) without a signal and
    /// unregisters the handlers.
    pub fn release(&self) {
        self.handle.close();
    }
}

impl ShutdownSignal for SystemShutdownSignal {
    fn wait(&self) -> Result<(), ShutdownError> {
        let mut signals = self.signals.lock().unwrap_or_else(PoisonError::into_inner);
        match signals.forever().next() {
            Some(signal) => info!(target: SHUTDOWN_TARGET, signal, "shutdown signal received"),
            None => info!(target: SHUTDOWN_TARGET, "signal watch released"),
        }
        Ok(())
    }
}
