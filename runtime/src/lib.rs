//! # Todos Runtime
//!
//! The [`Store`] owns application state, runs the reducer for every action
//! it is sent and executes the effects the reducer returns.
//!
//! ## Components
//!
//! - [`Store`]: state owner, reducer driver and timer executor
//! - [`EffectHandle`]: waits for the timers started by one `send`
//! - [`CancellationRegistry`]: cancellable timers keyed by id
//! - [`StoreConfig`]: subscriber buffer size and shutdown timeout
//!
//! ## Example
//!
//! ```ignore
//! use todos_runtime::Store;
//!
//! let store = Store::new(initial_state, reducer, environment);
//! let mut updates = store.subscribe_actions();
//!
//! store.send(action).await?;
//! let count = store.state(|s| s.todos.count()).await;
//! ```

/// Registry of in-flight cancellable effects
pub mod cancellation;

/// Store tuning knobs
pub mod config;

/// Error types for the Store runtime
pub mod error;

/// Completion tracking for effects started by a single action
pub mod handle;

/// Store runtime for coordinating reducer execution and effect handling
pub mod store;

pub use cancellation::CancellationRegistry;
pub use config::StoreConfig;
pub use error::StoreError;
pub use handle::EffectHandle;
pub use store::Store;
