//! Line-oriented front end for the mp3bib backend.
//!
//! Each stdin line is submitted as one request; every response is written to
//! stdout as one line. End of input queues the shutdown command behind the
//! outstanding requests, while a termination signal stops the worker before
//! its next request.

use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;

use tracing::{error, info, warn};

use mp3bibd::{
    BootstrapError, RequestProcessor, ShutdownSignal, StructuredHealthReporter,
    SystemConfigLoader, SystemShutdownSignal, WriterListener, bootstrap_with,
};

const MAIN_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::main");

fn main() -> ExitCode {
    let reporter = Arc::new(StructuredHealthReporter::new());
    let mut backend = match bootstrap_with(&SystemConfigLoader, reporter) {
        Ok(backend) => backend,
        Err(error) => {
            report_bootstrap_failure(&error);
            return ExitCode::FAILURE;
        }
    };

    let stdout = Arc::new(WriterListener::new(io::stdout()));
    let processor = Arc::clone(backend.processor());
    processor.listeners().attach(&stdout);

    let signals = match SystemShutdownSignal::install() {
        Ok(signals) => Some(signals),
        Err(error) => {
            warn!(target: MAIN_TARGET, %error, "signal handling unavailable");
            None
        }
    };

    let worker = match backend.start() {
        Ok(worker) => worker,
        Err(error) => {
            error!(target: MAIN_TARGET, %error, "failed to start worker");
            return ExitCode::FAILURE;
        }
    };

    if let Some(signals) = signals {
        let processor = Arc::clone(&processor);
        spawn_helper("mp3bibd-signals", move || match signals.wait() {
            Ok(()) => processor.request_shutdown(),
            Err(error) => warn!(target: MAIN_TARGET, %error, "signal watch failed"),
        });
    }
    spawn_helper("mp3bibd-stdin", {
        let processor = Arc::clone(&processor);
        move || read_requests(&processor)
    });

    // Helper threads may still be blocked on stdin or signals; returning
    // from main ends them.
    match worker.join() {
        Ok(summary) => {
            info!(
                target: MAIN_TARGET,
                processed = summary.processed,
                dropped = summary.dropped,
                "backend stopped"
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!(target: MAIN_TARGET, %error, "backend stopped abnormally");
            ExitCode::FAILURE
        }
    }
}

fn read_requests(processor: &RequestProcessor) {
    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => processor.submit(line),
            Err(error) => {
                warn!(target: MAIN_TARGET, %error, "stopped reading requests");
                break;
            }
        }
        if processor.is_terminated() {
            return;
        }
    }
    processor.kill();
}

fn spawn_helper<F>(name: &str, task: F)
where
    F: FnOnce() + Send + 'static,
{
    if let Err(error) = thread::Builder::new().name(name.to_owned()).spawn(task) {
        warn!(target: MAIN_TARGET, thread = name, %error, "failed to spawn helper thread");
    }
}

/// Telemetry may not be installed yet, so stderr is the only sink.
fn report_bootstrap_failure(error: &BootstrapError) {
    eprintln!("mp3bibd: {error}");
}
