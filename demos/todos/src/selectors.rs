//! Read-only derivations of [`AppState`].

use crate::error::TodoError;
use crate::types::{AppState, Todo, TodoId};

/// Ids of the todos the active filter lets through, in insertion order
#[must_use]
pub fn visible_todo_ids(state: &AppState) -> Vec<TodoId> {
    visible_todos(state).into_iter().map(|todo| todo.id.clone()).collect()
}

/// Todos the active filter lets through, in insertion order
#[must_use]
pub fn visible_todos(state: &AppState) -> Vec<&Todo> {
    state
        .todos
        .iter()
        .filter(|todo| state.filter.matches(todo))
        .collect()
}

/// Looks up a single todo
///
/// # Errors
///
/// Returns [`TodoError::NotFound`] if no todo has this id.
pub fn get_todo<'a>(state: &'a AppState, id: &TodoId) -> Result<&'a Todo, TodoError> {
    state
        .todos
        .get(id)
        .ok_or_else(|| TodoError::NotFound(id.clone()))
}

/// Texts of the active notifications, oldest first
#[must_use]
pub fn notifications(state: &AppState) -> Vec<&str> {
    state.notifications.texts().collect()
}

/// Total number of todos
#[must_use]
pub fn todo_count(state: &AppState) -> usize {
    state.todos.count()
}

/// Number of completed todos
#[must_use]
pub fn completed_count(state: &AppState) -> usize {
    state.todos.completed_count()
}
