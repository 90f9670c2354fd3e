//! Structured health reporting for backend lifecycle events.

use std::sync::Arc;

use mp3bib_config::Config;

use crate::bootstrap::BootstrapError;
use crate::processor::{ProcessorError, RunSummary, StartupError};

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked when the worker enters its run loop.
    fn processor_starting(&self);

    /// Invoked when startup initialisation of the store failed.
    fn startup_degraded(&self, error: &StartupError);

    /// Invoked after the library scan populated the store.
    fn library_indexed(&self, tracks: usize);

    /// Invoked when the worker loop exits normally.
    fn processor_stopped(&self, summary: &RunSummary);

    /// Invoked when the worker loop exits with an error.
    fn processor_failed(&self, error: &ProcessorError);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn processor_starting(&self) {
        (**self).processor_starting();
    }

    fn startup_degraded(&self, error: &StartupError) {
        (**self).startup_degraded(error);
    }

    fn library_indexed(&self, tracks: usize) {
        (**self).library_indexed(tracks);
    }

    fn processor_stopped(&self, summary: &RunSummary) {
        (**self).processor_stopped(summary);
    }

    fn processor_failed(&self, error: &ProcessorError) {
        (**self).processor_failed(error);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting backend bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            library_config = %config.library_config(),
            store = %config.store_label(),
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            "backend bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "backend bootstrap failed"
        );
    }

    fn processor_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "processor_starting",
            thread = std::thread::current().name().unwrap_or("unnamed"),
            "request processor starting"
        );
    }

    fn startup_degraded(&self, error: &StartupError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "startup_degraded",
            error = %error,
            "store initialisation failed; serving with a possibly incomplete library"
        );
    }

    fn library_indexed(&self, tracks: usize) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "library_indexed",
            tracks,
            "library indexed"
        );
    }

    fn processor_stopped(&self, summary: &RunSummary) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "processor_stopped",
            processed = summary.processed,
            dropped = summary.dropped,
            "request processor finished"
        );
    }

    fn processor_failed(&self, error: &ProcessorError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "processor_failed",
            error = %error,
            "request processor terminated abnormally"
        );
    }
}
