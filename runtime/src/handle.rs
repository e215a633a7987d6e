use crate::StoreError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Waits for the effects started by one [`Store::send`](crate::Store::send)
///
/// Only the effects returned for that action are counted. A timer that fires
/// and dispatches its own action starts a new, untracked round.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(add_todo(id, "Milk")).await?;
/// handle.wait_with_timeout(Duration::from_secs(6)).await?;
/// // the notification timer has fired (or was cancelled)
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    running: Arc<AtomicUsize>,
    settled: watch::Receiver<()>,
}

impl EffectHandle {
    /// A fresh handle and the tracker that effects register with
    pub(crate) fn new() -> (Self, EffectTracking) {
        let running = Arc::new(AtomicUsize::new(0));
        let (notify, settled) = watch::channel(());

        let handle = Self {
            running: Arc::clone(&running),
            settled,
        };
        (handle, EffectTracking { running, notify })
    }

    /// A handle with nothing to wait for
    #[must_use]
    pub fn completed() -> Self {
        Self::new().0
    }

    /// Number of tracked effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    /// Wait until every tracked effect has finished or been cancelled
    pub async fn wait(&mut self) {
        while self.pending() > 0 {
            if self.settled.changed().await.is_err() {
                break;
            }
        }
    }

    /// Like [`EffectHandle::wait`], bounded by `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] when effects are still running after
    /// `timeout`.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Sender side of an [`EffectHandle`]
#[derive(Clone)]
pub(crate) struct EffectTracking {
    running: Arc<AtomicUsize>,
    notify: watch::Sender<()>,
}

impl EffectTracking {
    /// Count a newly started effect against this handle and the store total
    ///
    /// Both counts drop again when the returned guard is dropped, whether the
    /// effect completed, was aborted or panicked.
    pub(crate) fn start(&self, store_running: &Arc<AtomicUsize>) -> RunningEffect {
        self.running.fetch_add(1, Ordering::SeqCst);
        store_running.fetch_add(1, Ordering::SeqCst);
        RunningEffect {
            tracking: self.clone(),
            store_running: Arc::clone(store_running),
        }
    }
}

/// Drop guard for one running effect
pub(crate) struct RunningEffect {
    tracking: EffectTracking,
    store_running: Arc<AtomicUsize>,
}

impl Drop for RunningEffect {
    fn drop(&mut self) {
        self.store_running.fetch_sub(1, Ordering::SeqCst);
        if self.tracking.running.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.tracking.notify.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completed_handle_does_not_wait() {
        let mut handle = EffectHandle::completed();
        assert_eq!(handle.pending(), 0);
        assert!(handle.wait_with_timeout(Duration::from_millis(10)).await.is_ok());
    }

    #[tokio::test]
    async fn dropping_last_guard_wakes_waiter() {
        let store_running = Arc::new(AtomicUsize::new(0));
        let (mut handle, tracking) = EffectHandle::new();

        let first = tracking.start(&store_running);
        let second = tracking.start(&store_running);
        assert_eq!(handle.pending(), 2);
        assert_eq!(store_running.load(Ordering::SeqCst), 2);

        let waiter = tokio::spawn(async move {
            handle.wait().await;
            handle.pending()
        });

        drop(first);
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        drop(second);
        assert!(matches!(waiter.await, Ok(0)));
        assert_eq!(store_running.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn wait_times_out_while_effect_runs() {
        let store_running = Arc::new(AtomicUsize::new(0));
        let (mut handle, tracking) = EffectHandle::new();
        let _guard = tracking.start(&store_running);

        let result = handle.wait_with_timeout(Duration::from_millis(10)).await;
        assert_eq!(result, Err(StoreError::Timeout));
    }
}
