//! Backend bootstrap orchestration.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use mp3bib_config::Config;

use crate::dispatch::CommandRegistry;
use crate::health::HealthReporter;
use crate::library::{DirectoryScanner, LibraryScanner};
use crate::processor::{ProcessorError, RequestProcessor, WorkerHandle};
use crate::store::{InMemoryStore, MetadataStore};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the backend configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
}

/// A bootstrapped backend whose worker has not necessarily started yet.
///
/// The store and scanner are handed to the worker thread by
/// [`Backend::start`]; until then they are held here.
pub struct Backend {
    config: Config,
    processor: Arc<RequestProcessor>,
    collaborators: Option<(Box<dyn MetadataStore>, Box<dyn LibraryScanner>)>,
    telemetry: TelemetryHandle,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("config", &self.config)
            .field("processor", &self.processor)
            .field("started", &self.collaborators.is_none())
            .finish_non_exhaustive()
    }
}

impl Backend {
    fn new(
        config: Config,
        processor: Arc<RequestProcessor>,
        store: Box<dyn MetadataStore>,
        scanner: Box<dyn LibraryScanner>,
        telemetry: TelemetryHandle,
    ) -> Self {
        Self {
            config,
            processor,
            collaborators: Some((store, scanner)),
            telemetry,
        }
    }

    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the request processor.
    #[must_use]
    pub fn processor(&self) -> &Arc<RequestProcessor> {
        &self.processor
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Replaces the store and scanner before the worker starts.
    pub fn with_collaborators(
        mut self,
        store: Box<dyn MetadataStore>,
        scanner: Box<dyn LibraryScanner>,
    ) -> Self {
        self.collaborators = Some((store, scanner));
        self
    }

    /// Starts the worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessorError::AlreadyStarted`] on a second call, or
    /// [`ProcessorError::Spawn`] when the thread cannot be created.
    pub fn start(&mut self) -> Result<WorkerHandle, ProcessorError> {
        let (store, scanner) = self
            .collaborators
            .take()
            .ok_or(ProcessorError::AlreadyStarted)?;
        self.processor.spawn(store, scanner)
    }
}

/// Bootstraps the backend using the supplied collaborators.
///
/// Loads configuration, installs telemetry and wires a processor holding the
/// built-in commands to an in-memory store labelled from the configuration
/// and a scanner reading the configured library file.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Backend, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let store = InMemoryStore::connect(config.store_label());
    let scanner = DirectoryScanner::new(config.library_config());
    let processor = Arc::new(RequestProcessor::new(
        CommandRegistry::with_builtins(),
        Arc::clone(&reporter),
    ));
    reporter.bootstrap_succeeded(&config);

    Ok(Backend::new(
        config,
        processor,
        Box::new(store),
        Box::new(scanner),
        telemetry,
    ))
}
