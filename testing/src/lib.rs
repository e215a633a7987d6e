//! # Todos Testing
//!
//! Testing utilities and helpers for the todos state container.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - The [`ReducerTest`] Given-When-Then harness
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use todos_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(AppReducer::new())
//!     .with_env(test_environment())
//!     .given_state(AppState::default())
//!     .when_action(TodoAction::SetFilter { filter: Filter::ShowCompleted })
//!     .then_state(|state| assert_eq!(state.filter, Filter::ShowCompleted))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use todos_core::environment::IdGenerator;


/// Deterministic implementations of environment traits
pub mod mocks {
    use super::IdGenerator;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Id generator producing `prefix-1`, `prefix-2`, ...
    ///
    /// # Example
    ///
    /// ```
    /// use todos_core::environment::IdGenerator;
    /// use todos_testing::mocks::SequentialIdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new("todo");
    /// assert_eq!(ids.next_id(), "todo-1");
    /// assert_eq!(ids.next_id(), "todo-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose ids start at `prefix-1`
        #[must_use]
        pub fn new(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }

        /// Number of ids handed out so far
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.next.load(Ordering::SeqCst) - 1
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new("id")
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            format!("{}-{n}", self.prefix)
        }
    }

    /// Create a default sequential id generator for tests (`id-1`, `id-2`, ...)
    #[must_use]
    pub fn test_ids() -> SequentialIdGenerator {
        SequentialIdGenerator::default()
    }
}

// Re-export commonly used items
pub use mocks::{test_ids, SequentialIdGenerator};
pub use reducer_test::{assertions, ReducerTest};
