//! Scenario world driving a bootstrapped backend end to end.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use crate::bootstrap::{Backend, BootstrapError, ConfigLoader, bootstrap_with};
use crate::listeners::ListenerId;
use crate::listeners::test_utils::RecordingListener;
use crate::processor::{ProcessorError, RunSummary, WorkerHandle};

use super::config_loader::{FailingConfigLoader, TestConfigLoader};
use super::reporter::RecordingHealthReporter;

const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Scenario world shared across BDD steps.
pub(crate) struct TestWorld {
    loader: Box<dyn ConfigLoader>,
    pub(crate) reporter: Arc<RecordingHealthReporter>,
    listener: Arc<RecordingListener>,
    listener_id: Option<ListenerId>,
    backend: Option<Backend>,
    worker: Option<WorkerHandle>,
    bootstrap_error: Option<BootstrapError>,
    summary: Option<Result<RunSummary, ProcessorError>>,
}

impl TestWorld {
    /// Builds a world whose library holds no tracks.
    pub(crate) fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::with_tracks(0)),
            reporter: Arc::new(RecordingHealthReporter::default()),
            listener: RecordingListener::new(),
            listener_id: None,
            backend: None,
            worker: None,
            bootstrap_error: None,
            summary: None,
        }
    }

    /// Installs a library with `tracks` untagged files.
    pub(crate) fn use_library(&mut self, tracks: usize) {
        self.loader = Box::new(TestConfigLoader::with_tracks(tracks));
    }

    /// Installs a configuration whose library file is absent.
    pub(crate) fn use_missing_library(&mut self) {
        self.loader = Box::new(TestConfigLoader::with_missing_library());
    }

    /// Installs a loader that always fails.
    pub(crate) fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
    }

    /// Runs the bootstrap sequence once.
    pub(crate) fn bootstrap(&mut self) {
        if self.backend.is_some() || self.bootstrap_error.is_some() {
            return;
        }
        match bootstrap_with(&*self.loader, self.reporter.clone()) {
            Ok(backend) => self.backend = Some(backend),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    /// Returns the bootstrap error, if any.
    pub(crate) fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    fn backend(&self) -> &Backend {
        self.backend.as_ref().expect("backend was not bootstrapped")
    }

    /// Attaches the recording client to the processor.
    pub(crate) fn attach_client(&mut self) {
        let id = self.backend().processor().listeners().attach(&self.listener);
        self.listener_id = Some(id);
    }

    /// Detaches the recording client.
    pub(crate) fn detach_client(&mut self) {
        if let Some(id) = self.listener_id.take() {
            self.backend().processor().listeners().detach(id);
        }
    }

    /// Returns `true` when the processor reports no attached listeners.
    pub(crate) fn should_close(&self) -> bool {
        self.backend().processor().should_close()
    }

    /// Starts the worker thread.
    pub(crate) fn start(&mut self) {
        let backend = self.backend.as_mut().expect("backend was not bootstrapped");
        self.worker = Some(backend.start().expect("worker should start"));
    }

    /// Submits `request` to the processor.
    pub(crate) fn submit(&self, request: &str) {
        self.backend().processor().submit(request);
    }

    /// Queues the shutdown command and waits for the worker to exit.
    pub(crate) fn kill(&mut self) {
        self.backend().processor().kill();
        self.join();
    }

    /// Requests shutdown and waits for the worker to exit.
    pub(crate) fn request_shutdown(&mut self) {
        self.backend().processor().request_shutdown();
        self.join();
    }

    /// Waits for the worker to exit on its own.
    pub(crate) fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.summary = Some(worker.join());
        }
    }

    /// Waits until the client received at least `count` responses.
    pub(crate) fn responses(&self, count: usize) -> Vec<String> {
        self.listener.wait_for(count, RESPONSE_TIMEOUT)
    }

    /// Summary returned by the stopped worker.
    pub(crate) fn summary(&self) -> &RunSummary {
        match self.summary.as_ref() {
            Some(Ok(summary)) => summary,
            Some(Err(error)) => panic!("worker failed: {error}"),
            None => panic!("worker has not stopped"),
        }
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestWorld {
    fn drop(&mut self) {
        if let (Some(backend), Some(worker)) = (self.backend.as_ref(), self.worker.take()) {
            backend.processor().request_shutdown();
            drop(worker.join());
        }
    }
}

/// Default test world fixture.
pub(crate) fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
