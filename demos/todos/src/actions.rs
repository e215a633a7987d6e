//! Actions and action creators.

use crate::reducer::TodoEnvironment;
use crate::types::{Filter, TodoId};
use serde::{Deserialize, Serialize};

/// Everything that can happen to the application state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TodoAction {
    /// Append a todo and show its "created" notification
    AddTodo {
        /// Id of the new todo
        id: TodoId,
        /// Text of the new todo
        name: String,
    },
    /// Flip the completed flag of a todo
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },
    /// Change which todos are visible
    SetFilter {
        /// New visibility filter
        filter: Filter,
    },
    /// Show a notification with no expiry
    ShowNotification {
        /// Key of the notification
        id: TodoId,
        /// Text to show
        text: String,
    },
    /// Remove a notification, whether expired or dismissed
    HideNotification {
        /// Key of the notification
        id: TodoId,
    },
}

impl TodoAction {
    /// Short name used in logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddTodo { .. } => "add_todo",
            Self::ToggleTodo { .. } => "toggle_todo",
            Self::SetFilter { .. } => "set_filter",
            Self::ShowNotification { .. } => "show_notification",
            Self::HideNotification { .. } => "hide_notification",
        }
    }
}

/// Builds a [`TodoAction::AddTodo`]
#[must_use]
pub fn add_todo(id: TodoId, name: impl Into<String>) -> TodoAction {
    TodoAction::AddTodo {
        id,
        name: name.into(),
    }
}

/// Builds a [`TodoAction::AddTodo`] with an id drawn from the environment
#[must_use]
pub fn new_todo(env: &TodoEnvironment, name: impl Into<String>) -> TodoAction {
    add_todo(TodoId::generate(env.ids()), name)
}

/// Builds a [`TodoAction::ToggleTodo`]
#[must_use]
pub const fn toggle_todo(id: TodoId) -> TodoAction {
    TodoAction::ToggleTodo { id }
}

/// Builds a [`TodoAction::SetFilter`]
#[must_use]
pub const fn set_filter(filter: Filter) -> TodoAction {
    TodoAction::SetFilter { filter }
}

/// Builds a [`TodoAction::ShowNotification`]
#[must_use]
pub fn show_notification(id: TodoId, text: impl Into<String>) -> TodoAction {
    TodoAction::ShowNotification {
        id,
        text: text.into(),
    }
}

/// Builds a [`TodoAction::HideNotification`]
#[must_use]
pub const fn hide_notification(id: TodoId) -> TodoAction {
    TodoAction::HideNotification { id }
}
