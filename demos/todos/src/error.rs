//! Typed outcomes for rejected actions and bad input.

use crate::types::TodoId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted todo name, in characters
pub const MAX_NAME_LEN: usize = 500;

/// Reasons an action or a piece of user input is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoError {
    /// No todo with this id exists
    #[error("Todo with ID {0} not found")]
    NotFound(TodoId),

    /// A todo with this id already exists
    #[error("Todo with ID {0} already exists")]
    DuplicateId(TodoId),

    /// The todo name (or other free-form input) is unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The text does not name a visibility filter
    #[error("Unknown filter '{0}' (expected all, completed or incompleted)")]
    InvalidFilter(String),
}

impl TodoError {
    /// Validate a todo name: not blank and at most [`MAX_NAME_LEN`] characters
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::InvalidInput`] when the name is rejected.
    pub fn check_name(name: &str) -> Result<(), Self> {
        if name.trim().is_empty() {
            return Err(Self::InvalidInput("Todo name cannot be empty".to_string()));
        }

        if name.chars().count() > MAX_NAME_LEN {
            return Err(Self::InvalidInput(format!(
                "Todo name too long (max {MAX_NAME_LEN} characters)"
            )));
        }

        Ok(())
    }
}
