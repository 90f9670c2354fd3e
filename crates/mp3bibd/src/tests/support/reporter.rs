//! Test double for [`HealthReporter`] that records structured events for assertions.

use std::sync::Mutex;

use mp3bib_config::Config;

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::processor::{ProcessorError, RunSummary, StartupError};

/// Records health events for assertions.
#[derive(Default)]
pub(crate) struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    pub(crate) fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn processor_starting(&self) {
        self.record(HealthEvent::ProcessorStarting);
    }

    fn startup_degraded(&self, error: &StartupError) {
        let stage = match error {
            StartupError::Clear(_) => "clear",
            StartupError::Populate(_) => "populate",
        };
        self.record(HealthEvent::StartupDegraded(stage.to_owned()));
    }

    fn library_indexed(&self, tracks: usize) {
        self.record(HealthEvent::LibraryIndexed(tracks));
    }

    fn processor_stopped(&self, summary: &RunSummary) {
        self.record(HealthEvent::ProcessorStopped(*summary));
    }

    fn processor_failed(&self, error: &ProcessorError) {
        self.record(HealthEvent::ProcessorFailed(error.to_string()));
    }
}

/// Structured health events tracked during tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HealthEvent {
    /// Bootstrap started.
    BootstrapStarting,
    /// Bootstrap completed successfully.
    BootstrapSucceeded,
    /// Bootstrap failed with an error description.
    BootstrapFailed(String),
    /// The worker entered its run loop.
    ProcessorStarting,
    /// Startup initialisation failed at the named stage.
    StartupDegraded(String),
    /// The scan recorded this many tracks.
    LibraryIndexed(usize),
    /// The worker exited normally.
    ProcessorStopped(RunSummary),
    /// The worker exited with an error description.
    ProcessorFailed(String),
}
