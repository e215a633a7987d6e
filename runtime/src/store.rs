use crate::handle::{EffectHandle, EffectTracking};
use crate::{CancellationRegistry, StoreConfig, StoreError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use todos_core::effect::{Effect, EffectId};
use todos_core::reducer::Reducer;
use tokio::sync::{broadcast, RwLock};

/// How often shutdown re-checks for running effects
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Single owner of application state
///
/// Every action is reduced under the state write lock, then broadcast to
/// subscribers before the lock is released, so subscribers observe actions
/// in exactly the order they were applied. Effects returned by the reducer
/// run on the tokio runtime and feed their actions back through
/// [`Store::send`].
///
/// Cloning a store yields another handle to the same state.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    environment: Arc<E>,
    closing: Arc<AtomicBool>,
    shutdown_timeout: Duration,
    running: Arc<AtomicUsize>,
    timers: Arc<CancellationRegistry>,
    actions: broadcast::Sender<A>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a store with [`StoreConfig::default`]
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Create a store with explicit configuration
    ///
    /// A zero broadcast capacity is raised to one.
    #[must_use]
    pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
        let (actions, _) = broadcast::channel(config.broadcast_capacity.max(1));

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            environment: Arc::new(environment),
            closing: Arc::new(AtomicBool::new(false)),
            shutdown_timeout: config.default_shutdown_timeout,
            running: Arc::new(AtomicUsize::new(0)),
            timers: Arc::new(CancellationRegistry::new()),
            actions,
        }
    }

    /// The injected environment
    #[must_use]
    pub fn environment(&self) -> &E {
        &self.environment
    }

    /// Timeout used by [`Store::shutdown_gracefully`]
    #[must_use]
    pub const fn default_shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }

    /// Number of effects currently running, across all sends
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.running.load(Ordering::Acquire)
    }

    /// Number of timers still registered under `id`
    #[must_use]
    pub fn pending_cancellable(&self, id: &EffectId) -> usize {
        self.timers.pending(id)
    }

    /// Stop accepting actions and wait up to `timeout` for running effects
    ///
    /// A timer that fires after shutdown began has its action rejected, which
    /// also counts as finishing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] with the number of effects
    /// still running when `timeout` elapses.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!(?timeout, "Store shutting down");
        metrics::counter!("store.shutdown.initiated").increment(1);
        self.closing.store(true, Ordering::Release);

        let deadline = Instant::now() + timeout;
        loop {
            let running = self.pending_effects();
            if running == 0 {
                tracing::info!("Store drained");
                metrics::counter!("store.shutdown.completed").increment(1);
                return Ok(());
            }

            if Instant::now() >= deadline {
                tracing::error!(running, "Shutdown timed out with effects still running");
                metrics::counter!("store.shutdown.timeout").increment(1);
                return Err(StoreError::ShutdownTimeout(running));
            }

            tracing::trace!(running, "Waiting for effects before shutdown");
            tokio::time::sleep(SHUTDOWN_POLL_INTERVAL).await;
        }
    }

    /// [`Store::shutdown`] with the configured default timeout
    ///
    /// # Errors
    ///
    /// See [`Store::shutdown`].
    pub async fn shutdown_gracefully(&self) -> Result<(), StoreError> {
        self.shutdown(self.shutdown_timeout).await
    }

    /// Reduce `action`, notify subscribers and start the returned effects
    ///
    /// Returns once the effects are started, not finished; use the returned
    /// handle to wait for them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once shutdown has begun.
    #[tracing::instrument(skip_all, name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
        if self.closing.load(Ordering::Acquire) {
            tracing::warn!("Store is shutting down, action rejected");
            metrics::counter!("store.shutdown.rejected_actions").increment(1);
            return Err(StoreError::ShutdownInProgress);
        }

        metrics::counter!("store.actions.total").increment(1);
        let (handle, tracking) = EffectHandle::new();

        let effects = {
            let mut state = self.state.write().await;

            let started = Instant::now();
            let effects = self
                .reducer
                .reduce(&mut *state, action.clone(), &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(started.elapsed().as_secs_f64());

            // Still under the write lock: broadcast order is reduction order
            let _ = self.actions.send(action);
            effects
        };

        tracing::trace!(effects = effects.len(), "Action reduced");
        for effect in effects {
            self.run_effect(effect, &tracking);
        }

        Ok(handle)
    }

    /// Send `action`, then wait for the first broadcast action matching
    /// `predicate`
    ///
    /// The subscription is taken before sending, so a matching action fed
    /// back by one of `action`'s timers is never missed.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ShutdownInProgress`]: shutdown has begun
    /// - [`StoreError::Timeout`]: nothing matched within `timeout`
    /// - [`StoreError::ChannelClosed`]: the broadcast channel closed
    pub async fn send_and_wait_for<F>(
        &self,
        action: A,
        predicate: F,
        timeout: Duration,
    ) -> Result<A, StoreError>
    where
        F: Fn(&A) -> bool,
    {
        let mut rx = self.actions.subscribe();
        self.send(action).await?;

        let wait = async {
            loop {
                match rx.recv().await {
                    Ok(action) if predicate(&action) => return Ok(action),
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Waiter lagged, actions were skipped");
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        };

        tokio::time::timeout(timeout, wait)
            .await
            .map_err(|_| StoreError::Timeout)?
    }

    /// Receive every action the store reduces from now on
    ///
    /// Includes actions dispatched by timers. A subscriber that falls more
    /// than the broadcast capacity behind gets `RecvError::Lagged`.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.actions.subscribe()
    }

    /// Read state through a closure
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&*state)
    }

    fn run_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
        match effect {
            Effect::None => {},
            Effect::Delay { duration, action } => {
                metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                self.start_timer(None, duration, *action, tracking);
            },
            Effect::Cancellable { id, effect } => match *effect {
                Effect::Delay { duration, action } => {
                    metrics::counter!("store.effects.executed", "type" => "cancellable")
                        .increment(1);
                    self.start_timer(Some(id), duration, *action, tracking);
                },
                other => {
                    tracing::debug!(%id, "Only timers are cancellable, running effect as is");
                    self.run_effect(other, tracking);
                },
            },
            Effect::Cancel { id } => {
                let cancelled = self.timers.cancel(&id);
                tracing::debug!(%id, cancelled, "Cancelled timers");
                metrics::counter!("store.effects.cancelled")
                    .increment(u64::try_from(cancelled).unwrap_or(u64::MAX));
            },
        }
    }

    /// Spawn a timer that sends `action` after `duration`
    ///
    /// With an id the timer is registered so [`Effect::Cancel`] can abort it.
    fn start_timer(
        &self,
        id: Option<EffectId>,
        duration: Duration,
        action: A,
        tracking: &EffectTracking,
    ) {
        let running = tracking.start(&self.running);
        let store = self.clone();
        let timer = async move {
            tokio::time::sleep(duration).await;
            action
        };

        let Some(id) = id else {
            tokio::spawn(async move {
                let _running = running;
                store.feed_back(timer.await).await;
            });
            return;
        };

        let task = self.timers.spawn(id.clone(), timer);
        tokio::spawn(async move {
            let _running = running;
            match task.await {
                Ok(action) => store.feed_back(action).await,
                Err(error) if error.is_cancelled() => tracing::debug!(%id, "Timer cancelled"),
                Err(error) => tracing::warn!(%id, %error, "Timer task failed"),
            }
        });
    }

    async fn feed_back(&self, action: A) {
        if let Err(error) = self.send(action).await {
            tracing::debug!(%error, "Timer action dropped");
        }
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: Arc::clone(&self.environment),
            closing: Arc::clone(&self.closing),
            shutdown_timeout: self.shutdown_timeout,
            running: Arc::clone(&self.running),
            timers: Arc::clone(&self.timers),
            actions: self.actions.clone(),
        }
    }
}
