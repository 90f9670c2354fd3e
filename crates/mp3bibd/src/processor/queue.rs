//! The shared request queue.
//!
//! Pending requests and the close flag live behind one mutex paired with one
//! condition variable. The consumer checks for work and enters the wait while
//! holding that mutex, so a request pushed between the check and the wait
//! cannot be missed.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use super::ProcessorError;

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<String>,
    close_requested: bool,
}

/// What the worker should do next.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Next {
    /// Process this request.
    Request(String),
    /// Stop; `dropped` requests were still queued and are discarded.
    Shutdown { dropped: usize },
}

/// FIFO queue with a single blocking consumer.
#[derive(Debug, Default)]
pub(crate) struct RequestQueue {
    state: Mutex<QueueState>,
    ready: Condvar,
}

impl RequestQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // Push, pop and flag updates are single statements; a poisoned guard
        // still holds a consistent queue.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `request` and wakes the consumer. Returns the new queue length.
    pub(crate) fn push(&self, request: String) -> usize {
        let mut state = self.lock();
        state.pending.push_back(request);
        let len = state.pending.len();
        drop(state);
        self.ready.notify_one();
        len
    }

    /// Sets the close flag and wakes the consumer. The flag is never reset.
    pub(crate) fn close(&self) {
        self.lock().close_requested = true;
        self.ready.notify_all();
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Blocks until a request is available or close was requested.
    ///
    /// Close takes priority over pending work: once the flag is observed the
    /// remaining requests are discarded and reported as dropped.
    pub(crate) fn next(&self) -> Result<Next, ProcessorError> {
        let mut state = self.lock();
        while state.pending.is_empty() && !state.close_requested {
            state = self
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if state.close_requested {
            let dropped = state.pending.len();
            state.pending.clear();
            return Ok(Next::Shutdown { dropped });
        }

        state
            .pending
            .pop_front()
            .map(Next::Request)
            .ok_or_else(|| ProcessorError::queue_invariant("woke with an empty queue"))
    }
}
