//! The request processor and its worker loop.
//!
//! Producers on any thread [`submit`](RequestProcessor::submit) encoded
//! requests. One worker thread drains them in FIFO order, invokes the bound
//! command through the [`CommandRegistry`], and broadcasts each response to
//! every attached listener before taking the next request. The worker owns the
//! metadata store for the lifetime of the loop, so handlers never contend for
//! it.
//!
//! Shutdown is cooperative. [`request_shutdown`](RequestProcessor::request_shutdown)
//! stops the worker before any further request, while
//! [`kill`](RequestProcessor::kill) queues the shutdown command behind the work
//! already submitted. Requests still queued when the worker stops are dropped
//! and counted in the [`RunSummary`].

mod errors;
mod queue;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::dispatch::{CommandRegistry, SHUTDOWN_COMMAND};
use crate::health::HealthReporter;
use crate::library::LibraryScanner;
use crate::listeners::{ListenerSet, ResponseDistributor};
use crate::store::MetadataStore;

pub use errors::{ProcessorError, StartupError};
use queue::{Next, RequestQueue};

const PROCESSOR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::processor");
const WORKER_THREAD_NAME: &str = "mp3bibd-worker";

/// Totals recorded when the worker loop exits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Requests invoked and broadcast.
    pub processed: usize,
    /// Requests still queued at shutdown and discarded.
    pub dropped: usize,
}

/// Serialises request processing on a single worker.
pub struct RequestProcessor {
    queue: RequestQueue,
    registry: CommandRegistry,
    distributor: ResponseDistributor,
    reporter: Arc<dyn HealthReporter>,
    started: AtomicBool,
    terminated: AtomicBool,
}

impl std::fmt::Debug for RequestProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestProcessor")
            .field("pending", &self.pending())
            .field("listeners", &self.distributor.listeners().len())
            .field("started", &self.started.load(Ordering::Acquire))
            .field("terminated", &self.is_terminated())
            .finish_non_exhaustive()
    }
}

impl RequestProcessor {
    /// Creates an idle processor with an empty listener set.
    pub fn new(registry: CommandRegistry, reporter: Arc<dyn HealthReporter>) -> Self {
        Self {
            queue: RequestQueue::new(),
            registry,
            distributor: ResponseDistributor::new(Arc::new(ListenerSet::new())),
            reporter,
            started: AtomicBool::new(false),
            terminated: AtomicBool::new(false),
        }
    }

    /// Listeners receiving every broadcast response.
    pub fn listeners(&self) -> &Arc<ListenerSet> {
        self.distributor.listeners()
    }

    /// Commands this processor can invoke.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Enqueues `request` for processing and wakes the worker.
    ///
    /// Never rejects. Requests submitted after the worker stopped are
    /// accepted but never processed.
    pub fn submit(&self, request: impl Into<String>) {
        let pending = self.queue.push(request.into());
        debug!(target: PROCESSOR_TARGET, pending, "request queued");
    }

    /// Asks the worker to stop before taking another request.
    pub fn request_shutdown(&self) {
        self.queue.close();
        info!(target: PROCESSOR_TARGET, "shutdown requested");
    }

    /// Queues the shutdown command behind all previously submitted requests.
    pub fn kill(&self) {
        self.submit(SHUTDOWN_COMMAND);
    }

    /// Returns `true` when no listener is attached. Advisory only; the
    /// processor never acts on it.
    pub fn should_close(&self) -> bool {
        self.listeners().is_empty()
    }

    /// Returns `true` once the worker loop has exited.
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    /// Number of requests waiting for the worker.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Initialises the store, then serves requests on the calling thread
    /// until shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::AlreadyStarted`] when the processor has
    /// already been run, or [`ProcessorError::QueueInvariantViolation`] if
    /// the queue misbehaves.
    pub fn run(
        &self,
        store: &mut dyn MetadataStore,
        scanner: &dyn LibraryScanner,
    ) -> Result<RunSummary, ProcessorError> {
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(ProcessorError::AlreadyStarted);
        }

        self.reporter.processor_starting();
        self.initialise(store, scanner);

        let result = self.serve(store);
        self.terminated.store(true, Ordering::Release);
        match &result {
            Ok(summary) => self.reporter.processor_stopped(summary),
            Err(error) => self.reporter.processor_failed(error),
        }
        result
    }

    /// Runs [`run`](Self::run) on a dedicated named thread.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::Spawn`] when the thread cannot be created.
    pub fn spawn(
        self: &Arc<Self>,
        mut store: Box<dyn MetadataStore>,
        scanner: Box<dyn LibraryScanner>,
    ) -> Result<WorkerHandle, ProcessorError> {
        let processor = Arc::clone(self);
        let thread = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_owned())
            .spawn(move || processor.run(&mut *store, &*scanner))
            .map_err(|source| ProcessorError::Spawn { source })?;
        Ok(WorkerHandle { thread })
    }

    fn initialise(&self, store: &mut dyn MetadataStore, scanner: &dyn LibraryScanner) {
        if let Err(source) = store.clear() {
            let error = StartupError::Clear(source);
            warn!(target: PROCESSOR_TARGET, %error, "skipping library scan");
            self.reporter.startup_degraded(&error);
            return;
        }

        match scanner.populate(store) {
            Ok(tracks) => self.reporter.library_indexed(tracks),
            Err(source) => {
                let error = StartupError::Populate(source);
                warn!(target: PROCESSOR_TARGET, %error, "library scan incomplete");
                self.reporter.startup_degraded(&error);
            }
        }
    }

    fn serve(&self, store: &mut dyn MetadataStore) -> Result<RunSummary, ProcessorError> {
        let mut summary = RunSummary::default();
        loop {
            let request = match self.queue.next()? {
                Next::Request(request) => request,
                Next::Shutdown { dropped } => {
                    summary.dropped = dropped;
                    if dropped > 0 {
                        warn!(
                            target: PROCESSOR_TARGET,
                            dropped, "discarding requests queued at shutdown"
                        );
                    }
                    return Ok(summary);
                }
            };

            let outcome = self.registry.dispatch(&request, store);
            let report = self.distributor.broadcast(&outcome.response);
            summary.processed += 1;
            debug!(
                target: PROCESSOR_TARGET,
                delivered = report.delivered,
                failed = report.failed,
                "response broadcast"
            );

            if outcome.is_terminal() {
                info!(target: PROCESSOR_TARGET, "shutdown command processed");
                self.queue.close();
            }
        }
    }
}

/// Join handle for a worker started with [`RequestProcessor::spawn`].
#[derive(Debug)]
pub struct WorkerHandle {
    thread: JoinHandle<Result<RunSummary, ProcessorError>>,
}

impl WorkerHandle {
    /// Waits for the worker to exit.
    ///
    /// # Errors
    ///
    /// Returns the worker's own error, or [`ProcessorError::WorkerPanic`]
    /// when the thread panicked.
    pub fn join(self) -> Result<RunSummary, ProcessorError> {
        self.thread
            .join()
            .map_err(|_| ProcessorError::WorkerPanic)?
    }
}
