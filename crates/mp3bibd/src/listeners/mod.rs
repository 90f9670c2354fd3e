//! Attached response recipients and the broadcast fan-out.
//!
//! The [`ListenerSet`] tracks attachment only. It holds weak references, so a
//! listener whose owner drops it is treated as detached and pruned on the next
//! access. [`ResponseDistributor::broadcast`] copies the live members under the
//! lock, releases the lock, and then delivers, so attach and detach never wait
//! on a slow listener and never race with the iteration.

mod errors;
#[cfg(test)]
pub(crate) mod test_utils;
mod writer;

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, warn};

pub use errors::DeliveryError;
pub use writer::WriterListener;

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::listeners");

/// A client able to receive broadcast responses.
pub trait ResponseListener: Send + Sync {
    /// Accepts one response. Implementations should not block for long.
    fn deliver(&self, response: &str) -> Result<(), DeliveryError>;
}

/// Handle returned by [`ListenerSet::attach`] and used to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Members {
    next_id: u64,
    entries: Vec<(ListenerId, Weak<dyn ResponseListener>)>,
}

impl Members {
    fn prune(&mut self) {
        self.entries.retain(|(id, listener)| {
            let alive = listener.strong_count() > 0;
            if !alive {
                debug!(target: LISTENER_TARGET, listener = id.0, "pruning dropped listener");
            }
            alive
        });
    }
}

/// Thread-safe set of attached listeners.
#[derive(Default)]
pub struct ListenerSet {
    members: Mutex<Members>,
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.len())
            .finish()
    }
}

impl ListenerSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Members> {
        // Membership is a plain vector; a panic elsewhere cannot leave it torn.
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attaches `listener` without taking ownership of it.
    pub fn attach<L>(&self, listener: &Arc<L>) -> ListenerId
    where
        L: ResponseListener + 'static,
    {
        let listener: Arc<dyn ResponseListener> = listener.clone();
        let mut members = self.lock();
        let id = ListenerId(members.next_id);
        members.next_id += 1;
        members.entries.push((id, Arc::downgrade(&listener)));
        debug!(target: LISTENER_TARGET, listener = id.0, "listener attached");
        id
    }

    /// Detaches the listener registered under `id`. Unknown ids are ignored.
    pub fn detach(&self, id: ListenerId) {
        let mut members = self.lock();
        let before = members.entries.len();
        members.entries.retain(|(entry, _)| *entry != id);
        if members.entries.len() < before {
            debug!(target: LISTENER_TARGET, listener = id.0, "listener detached");
        }
    }

    /// Returns `true` when no live listener is attached.
    pub fn is_empty(&self) -> bool {
        let mut members = self.lock();
        members.prune();
        members.entries.is_empty()
    }

    /// Number of live attached listeners.
    pub fn len(&self) -> usize {
        let mut members = self.lock();
        members.prune();
        members.entries.len()
    }

    /// Strong references to every live listener, in attach order.
    fn snapshot(&self) -> Vec<(ListenerId, Arc<dyn ResponseListener>)> {
        let mut members = self.lock();
        members.prune();
        members
            .entries
            .iter()
            .filter_map(|(id, listener)| listener.upgrade().map(|listener| (*id, listener)))
            .collect()
    }
}

/// Outcome of one broadcast.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Listeners that accepted the response.
    pub delivered: usize,
    /// Listeners that rejected it.
    pub failed: usize,
}

/// Delivers responses to every member of a [`ListenerSet`].
#[derive(Debug, Clone)]
pub struct ResponseDistributor {
    listeners: Arc<ListenerSet>,
}

impl ResponseDistributor {
    /// Creates a distributor over `listeners`.
    pub fn new(listeners: Arc<ListenerSet>) -> Self {
        Self { listeners }
    }

    /// The set this distributor broadcasts to.
    pub fn listeners(&self) -> &Arc<ListenerSet> {
        &self.listeners
    }

    /// Delivers `response` to the listeners attached at call time.
    ///
    /// A failing or panicking listener is logged and skipped; the remaining
    /// listeners still receive the response.
    pub fn broadcast(&self, response: &str) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        for (id, listener) in self.listeners.snapshot() {
            match panic::catch_unwind(AssertUnwindSafe(|| listener.deliver(response))) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(error)) => {
                    report.failed += 1;
                    warn!(
                        target: LISTENER_TARGET,
                        listener = id.0,
                        %error,
                        "response delivery failed"
                    );
                }
                Err(_) => {
                    report.failed += 1;
                    warn!(
                        target: LISTENER_TARGET,
                        listener = id.0,
                        "listener panicked during delivery"
                    );
                }
            }
        }
        report
    }
}
