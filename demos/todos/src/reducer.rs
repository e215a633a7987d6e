//! Reducer logic for the todo application.
//!
//! Each state slice has its own reducer, and [`AppReducer`] scopes and
//! combines them. Before any slice sees an action, the root checks it
//! against the whole state. Rejected actions leave the slices untouched
//! and are recorded in [`AppState::last_error`].

use crate::actions::TodoAction;
use crate::error::TodoError;
use crate::types::{
    created_notification_text, AppState, Filter, NotificationState, Todo, TodoId, TodoState,
};
use std::sync::Arc;
use std::time::Duration;
use todos_core::{
    composition::{combine_reducers, scope_reducer, CombinedReducer},
    delay,
    effect::{Effect, EffectId},
    environment::{IdGenerator, UuidGenerator},
    reducer::Reducer,
    smallvec, SmallVec,
};

/// How long a "Todo Created" notification stays visible
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

/// Environment dependencies for the todo reducers
#[derive(Clone)]
pub struct TodoEnvironment {
    ids: Arc<dyn IdGenerator>,
    notification_ttl: Duration,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>, notification_ttl: Duration) -> Self {
        Self {
            ids,
            notification_ttl,
        }
    }

    /// Source of ids for new todos
    #[must_use]
    pub fn ids(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }

    /// Lifetime of a "Todo Created" notification
    #[must_use]
    pub const fn notification_ttl(&self) -> Duration {
        self.notification_ttl
    }
}

impl Default for TodoEnvironment {
    fn default() -> Self {
        Self::new(Arc::new(UuidGenerator), NOTIFICATION_TTL)
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("notification_ttl", &self.notification_ttl)
            .finish_non_exhaustive()
    }
}

/// Timer key of the notification shown for `id`
#[must_use]
pub fn notification_timer(id: &TodoId) -> EffectId {
    EffectId::new(format!("notification-{id}"))
}

/// Checks that `name` is usable and `id` is free
///
/// # Errors
///
/// Returns [`TodoError::InvalidInput`] for a blank or over-long name and
/// [`TodoError::DuplicateId`] if the id is taken.
pub fn check_add(todos: &TodoState, id: &TodoId, name: &str) -> Result<(), TodoError> {
    TodoError::check_name(name)?;
    if todos.contains(id) {
        return Err(TodoError::DuplicateId(id.clone()));
    }
    Ok(())
}

/// Checks that a todo with `id` exists
///
/// # Errors
///
/// Returns [`TodoError::NotFound`] if no todo has this id.
pub fn check_toggle(todos: &TodoState, id: &TodoId) -> Result<(), TodoError> {
    if todos.contains(id) {
        Ok(())
    } else {
        Err(TodoError::NotFound(id.clone()))
    }
}

/// Owns the todo collection
///
/// Applies actions as given. [`AppReducer`] rejects invalid ones before they
/// get here; a duplicate add that reaches this reducer directly is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoListReducer;

impl Reducer for TodoListReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::AddTodo { id, name } => {
                state.insert(Todo::new(id, name));
            },
            TodoAction::ToggleTodo { id } => {
                if let Some(todo) = state.get_mut(&id) {
                    todo.completed = !todo.completed;
                    tracing::debug!(%id, completed = todo.completed, "Todo toggled");
                }
            },
            _ => {},
        }

        smallvec![Effect::None]
    }
}

/// Owns the visibility filter
#[derive(Clone, Copy, Debug, Default)]
pub struct FilterReducer;

impl Reducer for FilterReducer {
    type State = Filter;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if let TodoAction::SetFilter { filter } = action {
            *state = filter;
        }

        smallvec![Effect::None]
    }
}

/// Owns the notifications and their expiry timers
///
/// Adding a todo shows "Todo Created <name>" and schedules a
/// [`TodoAction::HideNotification`] after the environment's TTL. The timer
/// is cancellable under [`notification_timer`], and hiding a notification
/// early cancels it.
#[derive(Clone, Copy, Debug, Default)]
pub struct NotificationReducer;

impl Reducer for NotificationReducer {
    type State = NotificationState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::AddTodo { id, name } => {
                state.insert(id.clone(), created_notification_text(&name));

                smallvec![delay! {
                    id: notification_timer(&id),
                    duration: env.notification_ttl(),
                    action: TodoAction::HideNotification { id }
                }]
            },
            TodoAction::ShowNotification { id, text } => {
                state.insert(id, text);
                smallvec![Effect::None]
            },
            TodoAction::HideNotification { id } => {
                if state.remove(&id).is_none() {
                    tracing::trace!(%id, "No notification to hide");
                }

                // Dismissing early must stop the pending timer
                smallvec![Effect::Cancel {
                    id: notification_timer(&id),
                }]
            },
            TodoAction::ToggleTodo { .. } | TodoAction::SetFilter { .. } => {
                smallvec![Effect::None]
            },
        }
    }
}

fn todos_slice(state: &mut AppState) -> &mut TodoState {
    &mut state.todos
}

fn filter_slice(state: &mut AppState) -> &mut Filter {
    &mut state.filter
}

fn notifications_slice(state: &mut AppState) -> &mut NotificationState {
    &mut state.notifications
}

/// Root reducer for [`AppState`]
pub struct AppReducer {
    slices: CombinedReducer<AppState, TodoAction, TodoEnvironment>,
}

impl AppReducer {
    /// Creates the root reducer from the three slice reducers
    #[must_use]
    pub fn new() -> Self {
        let slices = combine_reducers(vec![
            Box::new(scope_reducer(TodoListReducer, todos_slice)),
            Box::new(scope_reducer(FilterReducer, filter_slice)),
            Box::new(scope_reducer(NotificationReducer, notifications_slice)),
        ]);

        Self { slices }
    }

    /// Checks an action against the whole state
    fn validate(state: &AppState, action: &TodoAction) -> Result<(), TodoError> {
        match action {
            TodoAction::AddTodo { id, name } => check_add(&state.todos, id, name),
            TodoAction::ToggleTodo { id } => check_toggle(&state.todos, id),
            TodoAction::ShowNotification { text, .. } if text.trim().is_empty() => Err(
                TodoError::InvalidInput("Notification text cannot be empty".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppReducer")
            .field("slices", &self.slices.len())
            .finish()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if let Err(error) = Self::validate(state, &action) {
            tracing::warn!(action = action.kind(), %error, "Action rejected");
            state.last_error = Some(error);
            return smallvec![Effect::None];
        }

        // Timer expiry is not a user action and must not hide the last rejection
        if !matches!(action, TodoAction::HideNotification { .. }) {
            state.last_error = None;
        }
        tracing::debug!(action = action.kind(), "Reducing action");

        self.slices.reduce(state, action, env)
    }
}
