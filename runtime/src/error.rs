use thiserror::Error;

/// Errors returned by [`Store`](crate::Store) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `send()` was called after shutdown began
    #[error("Store is shutting down")]
    ShutdownInProgress,

    /// Shutdown gave up while this many effects were still running
    #[error("Shutdown timed out with {0} effects still running")]
    ShutdownTimeout(usize),

    /// No matching action arrived before the deadline
    #[error("Timeout waiting for action")]
    Timeout,

    /// The action broadcast channel has no sender left
    #[error("Action broadcast channel closed")]
    ChannelClosed,
}
