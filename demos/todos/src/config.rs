//! Configuration management for the todo application.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::reducer::{TodoEnvironment, NOTIFICATION_TTL};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use todos_core::environment::UuidGenerator;
use todos_runtime::StoreConfig;

/// Notification lifetime in milliseconds
pub const NOTIFICATION_TTL_VAR: &str = "TODOS_NOTIFICATION_TTL_MS";
/// Whether to preload the seed todos
pub const SEED_VAR: &str = "TODOS_SEED";
/// Capacity of the store's action broadcast channel
pub const BROADCAST_CAPACITY_VAR: &str = "TODOS_BROADCAST_CAPACITY";
/// Seconds to wait for pending timers on exit
pub const SHUTDOWN_TIMEOUT_VAR: &str = "TODOS_SHUTDOWN_TIMEOUT_SECS";
/// Tracing filter directive
pub const LOG_VAR: &str = "RUST_LOG";

/// An environment variable holds a value that cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value '{value}' for {var}: {reason}")]
pub struct ConfigError {
    /// Offending variable
    pub var: &'static str,
    /// Raw value found
    pub value: String,
    /// Parser message
    pub reason: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// How long "Todo Created" notifications stay visible
    pub notification_ttl: Duration,
    /// Start with the ten seed todos instead of an empty list
    pub seed_todos: bool,
    /// Capacity of the store's action broadcast channel
    pub broadcast_capacity: usize,
    /// How long to wait for pending timers on exit
    pub shutdown_timeout: Duration,
    /// Tracing filter directive (`RUST_LOG` syntax)
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notification_ttl: NOTIFICATION_TTL,
            seed_todos: true,
            broadcast_capacity: 64,
            shutdown_timeout: Duration::from_secs(1),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, rejecting malformed values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first variable that fails to parse.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::try_from_lookup(|var| env::var(var).ok())
    }

    /// Like [`AppConfig::try_from_env`], reading variables through `lookup`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first variable that fails to parse.
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let broadcast_capacity =
            parse_var(&lookup, BROADCAST_CAPACITY_VAR)?.unwrap_or(defaults.broadcast_capacity);
        if broadcast_capacity == 0 {
            return Err(ConfigError {
                var: BROADCAST_CAPACITY_VAR,
                value: "0".to_string(),
                reason: "capacity must be at least 1".to_string(),
            });
        }

        Ok(Self {
            notification_ttl: parse_var(&lookup, NOTIFICATION_TTL_VAR)?
                .map_or(defaults.notification_ttl, Duration::from_millis),
            seed_todos: parse_var(&lookup, SEED_VAR)?.unwrap_or(defaults.seed_todos),
            broadcast_capacity,
            shutdown_timeout: parse_var(&lookup, SHUTDOWN_TIMEOUT_VAR)?
                .map_or(defaults.shutdown_timeout, Duration::from_secs),
            log_level: lookup(LOG_VAR).unwrap_or(defaults.log_level),
        })
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.broadcast_capacity, self.shutdown_timeout)
    }

    /// Production environment: random UUID ids and the configured TTL
    #[must_use]
    pub fn environment(&self) -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(UuidGenerator), self.notification_ttl)
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(var)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError {
                var,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}
