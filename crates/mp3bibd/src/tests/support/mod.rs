//! Test harness utilities shared by the unit and behavioural suites.

mod config_loader;
mod reporter;
mod scanner;
mod world;

pub(crate) use config_loader::{FailingConfigLoader, TestConfigLoader};
pub(crate) use reporter::{HealthEvent, RecordingHealthReporter};
pub(crate) use scanner::StubScanner;
pub(crate) use world::{TestWorld, world};
