// src/exec/registry.rs

//! Registry of in-flight child processes.
//!
//! Every process spawned through the gateway is registered right after spawn
//! and released as soon as it is known to have terminated. The registry is
//! created explicitly at startup and handed to the [`Gateway`] (and to
//! whatever handles interrupts), so there is no hidden global state.
//!
//! The registry never kills anything itself. `terminate_all` fires the
//! per-invocation cancel channel; the invocation owning the child does the
//! kill and then releases its entry like on any other exit path.
//!
//! [`Gateway`]: crate::exec::Gateway

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::{debug, trace};

/// Registry-unique id of a registered invocation.
///
/// OS pids get reused, so entries are keyed by this instead.
pub type ProcessId = u64;

/// Public view of a registered process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveProcess {
    pub id: ProcessId,
    /// OS pid, if the platform reported one at spawn time.
    pub pid: Option<u32>,
    /// Display form of the command line.
    pub command: String,
}

#[derive(Debug)]
struct Entry {
    info: ActiveProcess,
    cancel: Option<oneshot::Sender<()>>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: AtomicU64,
    active: Mutex<HashMap<ProcessId, Entry>>,
}

/// Concurrency-safe set of running children. Cloning shares the same set.
#[derive(Debug, Clone, Default)]
pub struct ProcessRegistry {
    inner: Arc<Inner>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly spawned child.
    ///
    /// Returns the guard that keeps the entry alive and the receiving end of
    /// the cancel channel the owning invocation should listen on.
    pub fn register(
        &self,
        pid: Option<u32>,
        command: impl Into<String>,
    ) -> (Registration, oneshot::Receiver<()>) {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let info = ActiveProcess {
            id,
            pid,
            command: command.into(),
        };

        trace!(id, ?pid, command = %info.command, "registering process");
        self.lock().insert(
            id,
            Entry {
                info,
                cancel: Some(cancel_tx),
            },
        );

        let registration = Registration {
            registry: self.clone(),
            id,
        };
        (registration, cancel_rx)
    }

    /// Remove an entry. Returns whether it was present.
    ///
    /// Normally called through dropping the [`Registration`].
    fn unregister(&self, id: ProcessId) -> bool {
        let removed = self.lock().remove(&id).is_some();
        trace!(id, removed, "unregistering process");
        removed
    }

    pub fn snapshot(&self) -> Vec<ActiveProcess> {
        let mut procs: Vec<ActiveProcess> =
            self.lock().values().map(|e| e.info.clone()).collect();
        procs.sort_by_key(|p| p.id);
        procs
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.lock().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Ask every registered invocation to kill its child.
    ///
    /// Returns how many cancel signals were delivered. Entries stay in the
    /// registry until their owners observe the termination and release them.
    pub fn terminate_all(&self) -> usize {
        let mut delivered = 0;
        for entry in self.lock().values_mut() {
            let Some(cancel) = entry.cancel.take() else {
                continue;
            };
            if cancel.send(()).is_ok() {
                delivered += 1;
            } else {
                debug!(
                    id = entry.info.id,
                    command = %entry.info.command,
                    "invocation no longer listening for cancellation"
                );
            }
        }
        delivered
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ProcessId, Entry>> {
        // A panic while holding the lock can't leave the map half-updated.
        self.inner
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps a registry entry alive; dropping it unregisters exactly once.
#[derive(Debug)]
#[must_use = "dropping the registration unregisters the process immediately"]
pub struct Registration {
    registry: ProcessRegistry,
    id: ProcessId,
}

impl Registration {
    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Explicitly release the entry (same as dropping the guard).
    pub fn release(self) {}
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}
