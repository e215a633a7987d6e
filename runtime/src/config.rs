use std::time::Duration;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use todos_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(256)
///     .with_shutdown_timeout(Duration::from_secs(5));
/// assert_eq!(config.broadcast_capacity, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Actions buffered per subscriber before it starts lagging
    pub broadcast_capacity: usize,
    /// Timeout used by [`Store::shutdown_gracefully`](crate::Store::shutdown_gracefully)
    pub default_shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Default number of actions buffered per subscriber
    pub const DEFAULT_BROADCAST_CAPACITY: usize = 16;

    /// Default graceful shutdown timeout
    pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

    /// Build a configuration from explicit values
    #[must_use]
    pub const fn new(broadcast_capacity: usize, default_shutdown_timeout: Duration) -> Self {
        Self {
            broadcast_capacity,
            default_shutdown_timeout,
        }
    }

    /// Replace the subscriber buffer size
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Replace the graceful shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.default_shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_BROADCAST_CAPACITY,
            Self::DEFAULT_SHUTDOWN_TIMEOUT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = StoreConfig::default();
        assert_eq!(config.broadcast_capacity, 16);
        assert_eq!(config.default_shutdown_timeout, Duration::from_secs(30));
    }

    #[test]
    fn builders_override_fields() {
        let config = StoreConfig::new(4, Duration::from_secs(1))
            .with_broadcast_capacity(64)
            .with_shutdown_timeout(Duration::from_secs(9));
        assert_eq!(config, StoreConfig::new(64, Duration::from_secs(9)));
    }
}
