//! Registry of in-flight cancellable effects.
//!
//! Every `Effect::Cancellable` the store runs is spawned through
//! [`CancellationRegistry::spawn`], which records the task's abort handle
//! under its [`EffectId`]. `Effect::Cancel` aborts every task still
//! registered under that id. Tasks deregister themselves when their future
//! resolves, before the store dispatches the produced action.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use todos_core::effect::EffectId;
use tokio::task::{AbortHandle, JoinHandle};

type Entries = HashMap<EffectId, Vec<(u64, AbortHandle)>>;

/// Tracks abort handles of pending cancellable effects, keyed by id
///
/// Registering the same id twice keeps both tasks; effects are never
/// coalesced, and a cancel aborts all of them.
#[derive(Debug, Default)]
pub struct CancellationRegistry {
    next_token: AtomicU64,
    tasks: Mutex<Entries>,
}

impl CancellationRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Spawn `future` on the tokio runtime and register it under `id`
    ///
    /// The lock is held while spawning so the task cannot deregister before
    /// it has been registered.
    pub fn spawn<F>(self: &Arc<Self>, id: EffectId, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.entries();

        let registry = Arc::clone(self);
        let task_id = id.clone();
        let handle = tokio::spawn(async move {
            let output = future.await;
            registry.deregister(&task_id, token);
            output
        });

        entries
            .entry(id)
            .or_default()
            .push((token, handle.abort_handle()));

        handle
    }

    fn deregister(&self, id: &EffectId, token: u64) {
        let mut entries = self.entries();
        if let Some(tasks) = entries.get_mut(id) {
            tasks.retain(|(t, _)| *t != token);
            if tasks.is_empty() {
                entries.remove(id);
            }
        }
    }

    /// Abort every task registered under `id`
    ///
    /// Returns the number of tasks that were aborted. Unknown ids are a no-op.
    pub fn cancel(&self, id: &EffectId) -> usize {
        let Some(tasks) = self.entries().remove(id) else {
            return 0;
        };

        for (_, handle) in &tasks {
            handle.abort();
        }
        tasks.len()
    }

    /// Number of pending tasks registered under `id`
    #[must_use]
    pub fn pending(&self, id: &EffectId) -> usize {
        self.entries().get(id).map_or(0, Vec::len)
    }

    /// Total number of pending cancellable tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().values().map(Vec::len).sum()
    }

    /// Returns true when nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
