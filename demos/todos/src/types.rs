//! Domain types for the todo list.
//!
//! The application state is split into three independent slices, each owned
//! by its own reducer: the todo collection, the active visibility filter and
//! the active notifications.

use crate::error::TodoError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use todos_core::environment::IdGenerator;

/// Opaque identifier of a todo
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wraps an existing identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Draws a fresh identifier from `ids`
    #[must_use]
    pub fn generate(ids: &dyn IdGenerator) -> Self {
        Self(ids.next_id())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Text shown in the list
    pub name: String,
    /// Whether the todo is done
    pub completed: bool,
}

impl Todo {
    /// Creates a new, incomplete todo
    #[must_use]
    pub const fn new(id: TodoId, name: String) -> Self {
        Self {
            id,
            name,
            completed: false,
        }
    }
}

/// The todo collection: entities by id plus their insertion order
///
/// Every id in `ids` has an entry in `entities` and appears exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    entities: HashMap<TodoId, Todo>,
    ids: Vec<TodoId>,
}

impl TodoState {
    /// Creates an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.entities.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &TodoId) -> Option<&mut Todo> {
        self.entities.get_mut(id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.entities.contains_key(id)
    }

    /// Ids in insertion order
    #[must_use]
    pub fn ids(&self) -> &[TodoId] {
        &self.ids
    }

    /// Todos in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Todo> {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.entities.values().filter(|t| t.completed).count()
    }

    /// Appends `todo` unless its id is already present
    ///
    /// Returns false, leaving the collection unchanged, for a taken id.
    pub(crate) fn insert(&mut self, todo: Todo) -> bool {
        if self.contains(&todo.id) {
            return false;
        }
        self.ids.push(todo.id.clone());
        self.entities.insert(todo.id.clone(), todo);
        true
    }
}

/// Names of the todos every fresh session starts with, ids "1" through "10"
pub const SEED_TODOS: [&str; 10] = [
    "Hands On: Redux Standalone with advanced Actions",
    "Hands On: Redux Standalone with advanced Reducers",
    "Hands On: Bootstrap App with Redux",
    "Hands On: Naive Todo with React and Redux",
    "Hands On: Sophisticated Todo with React and Redux",
    "Hands On: Connecting State Everywhere",
    "Hands On: Todo with advanced Redux",
    "Hands On: Todo but more Features",
    "Hands On: Todo with Notifications",
    "Hands On: Hacker News with Redux",
];

impl FromIterator<Todo> for TodoState {
    /// Later duplicates of an id are skipped
    fn from_iter<I: IntoIterator<Item = Todo>>(iter: I) -> Self {
        let mut state = Self::new();
        for todo in iter {
            state.insert(todo);
        }
        state
    }
}

/// Which todos the list shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Filter {
    /// Every todo
    #[default]
    ShowAll,
    /// Only completed todos
    ShowCompleted,
    /// Only todos not yet completed
    ShowIncompleted,
}

impl Filter {
    /// All filters, in the order the filter bar shows them
    pub const ALL: [Self; 3] = [Self::ShowAll, Self::ShowCompleted, Self::ShowIncompleted];

    /// Visibility predicate
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::ShowAll => true,
            Self::ShowCompleted => todo.completed,
            Self::ShowIncompleted => !todo.completed,
        }
    }

    /// Canonical name (`SHOW_ALL`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShowAll => "SHOW_ALL",
            Self::ShowCompleted => "SHOW_COMPLETED",
            Self::ShowIncompleted => "SHOW_INCOMPLETED",
        }
    }

    /// Button label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShowAll => "All",
            Self::ShowCompleted => "Completed",
            Self::ShowIncompleted => "Incompleted",
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHOW_ALL" | "ALL" => Ok(Self::ShowAll),
            "SHOW_COMPLETED" | "COMPLETED" => Ok(Self::ShowCompleted),
            "SHOW_INCOMPLETED" | "INCOMPLETED" => Ok(Self::ShowIncompleted),
            _ => Err(TodoError::InvalidFilter(s.to_string())),
        }
    }
}

/// Active notifications: todo id → display text, in insertion order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationState {
    entries: Vec<(TodoId, String)>,
}

impl NotificationState {
    /// Creates an empty notification set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `text` for `id`, replacing any text already shown for it
    pub fn insert(&mut self, id: TodoId, text: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            entry.1 = text;
        } else {
            self.entries.push((id, text));
        }
    }

    /// Removes the notification for `id`, returning its text
    pub fn remove(&mut self, id: &TodoId) -> Option<String> {
        let index = self.entries.iter().position(|(existing, _)| existing == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Text shown for `id`
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, text)| text.as_str())
    }

    /// Notification texts in insertion order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, text)| text.as_str())
    }

    /// Number of notifications shown
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is shown
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Text of the notification shown when a todo is created
#[must_use]
pub fn created_notification_text(name: &str) -> String {
    format!("Todo Created {name}")
}

/// Whole application state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Todo collection slice
    pub todos: TodoState,
    /// Visibility filter slice
    pub filter: Filter,
    /// Notification slice
    pub notifications: NotificationState,
    /// Why the most recent action was rejected, cleared by the next accepted one
    pub last_error: Option<TodoError>,
}

impl AppState {
    /// Creates an empty state with the `ShowAll` filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State preloaded with [`SEED_TODOS`]
    #[must_use]
    pub fn seeded() -> Self {
        let todos = SEED_TODOS
            .iter()
            .zip(1..)
            .map(|(name, n)| Todo::new(TodoId::new(n.to_string()), (*name).to_string()))
            .collect();

        Self {
            todos,
            ..Self::default()
        }
    }
}
