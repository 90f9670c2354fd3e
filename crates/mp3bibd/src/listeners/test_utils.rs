//! Test helpers for the listener set.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use super::{DeliveryError, ResponseListener};

/// Records every response it receives.
#[derive(Debug, Default)]
pub(crate) struct RecordingListener {
    responses: Mutex<Vec<String>>,
    delivered: Condvar,
}

impl RecordingListener {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn responses(&self) -> Vec<String> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Blocks until at least `expected` responses arrived or `timeout` passed.
    pub(crate) fn wait_for(&self, expected: usize, timeout: Duration) -> Vec<String> {
        let deadline = Instant::now() + timeout;
        let mut responses = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while responses.len() < expected {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            responses = self
                .delivered
                .wait_timeout(responses, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        responses.clone()
    }
}

impl ResponseListener for RecordingListener {
    fn deliver(&self, response: &str) -> Result<(), DeliveryError> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(response.to_owned());
        self.delivered.notify_all();
        Ok(())
    }
}

/// Rejects every response as if the client had disconnected.
#[derive(Debug, Default)]
pub(crate) struct FailingListener;

impl ResponseListener for FailingListener {
    fn deliver(&self, _response: &str) -> Result<(), DeliveryError> {
        Err(DeliveryError::Disconnected)
    }
}

/// Panics on every delivery.
#[derive(Debug, Default)]
pub(crate) struct PanickingListener;

impl ResponseListener for PanickingListener {
    fn deliver(&self, response: &str) -> Result<(), DeliveryError> {
        panic!("listener cannot handle {response}");
    }
}
