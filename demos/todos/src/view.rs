//! Text rendering of the application.
//!
//! Components are pure functions of their props. [`App`] connects them to
//! the store state through the selectors, and [`UiEvent`] maps what a user
//! does on a component back to an action.

use crate::actions::{self, TodoAction};
use crate::reducer::TodoEnvironment;
use crate::selectors;
use crate::types::{AppState, Filter, Todo, TodoId};
use std::fmt::Write as _;

/// Props of the filter bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterBarProps {
    /// Filter currently applied
    pub active: Filter,
}

/// "Show" followed by one button per filter; the active one is starred
#[derive(Debug)]
pub struct FilterBar;

impl FilterBar {
    /// Renders the filter bar as a single line
    #[must_use]
    pub fn render(props: &FilterBarProps) -> String {
        let mut out = String::from("Show");
        for filter in Filter::ALL {
            let marker = if filter == props.active { "*" } else { "" };
            let _ = write!(out, " [{}{marker}]", filter.label());
        }
        out
    }
}

/// Props of the todo creation input
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoCreateProps {
    /// Current content of the input
    pub value: String,
}

/// Input with an "Add" button
#[derive(Debug)]
pub struct TodoCreate;

impl TodoCreate {
    /// Placeholder shown when the input is empty
    pub const PLACEHOLDER: &'static str = "Add Todo...";

    /// Renders the input line
    #[must_use]
    pub fn render(props: &TodoCreateProps) -> String {
        let value = if props.value.is_empty() {
            Self::PLACEHOLDER
        } else {
            props.value.as_str()
        };
        format!("> {value} [Add]")
    }
}

/// Props of one todo row
#[derive(Clone, Copy, Debug)]
pub struct TodoItemProps<'a> {
    /// Todo to show
    pub todo: &'a Todo,
}

/// Name, a "Completed" toggle button, and the status word
#[derive(Debug)]
pub struct TodoItem;

impl TodoItem {
    /// Renders one row, prefixed with the id so the shell can address it
    #[must_use]
    pub fn render(props: &TodoItemProps<'_>) -> String {
        let status = if props.todo.completed {
            "Completed"
        } else {
            "Incomplete"
        };
        format!("#{} {} [Completed] {status}", props.todo.id, props.todo.name)
    }
}

/// Props of the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoListProps<'a> {
    /// Visible todos, in display order
    pub todos: Vec<&'a Todo>,
}

/// One [`TodoItem`] per visible todo
#[derive(Debug)]
pub struct TodoList;

impl TodoList {
    /// Renders the list, one row per line
    #[must_use]
    pub fn render(props: &TodoListProps<'_>) -> String {
        props
            .todos
            .iter()
            .map(|&todo| TodoItem::render(&TodoItemProps { todo }))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Props of the notification area
#[derive(Clone, Debug, Default)]
pub struct NotificationsProps<'a> {
    /// Texts to show, oldest first
    pub notifications: Vec<&'a str>,
}

/// One line per active notification
#[derive(Debug)]
pub struct Notifications;

impl Notifications {
    /// Renders the notification area
    #[must_use]
    pub fn render(props: &NotificationsProps<'_>) -> String {
        props
            .notifications
            .iter()
            .map(|text| format!("! {text}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Root component
#[derive(Debug)]
pub struct App;

impl App {
    /// Props of the filter bar derived from the state
    #[must_use]
    pub const fn filter_bar_props(state: &AppState) -> FilterBarProps {
        FilterBarProps {
            active: state.filter,
        }
    }

    /// Props of the todo list derived from the state
    #[must_use]
    pub fn todo_list_props(state: &AppState) -> TodoListProps<'_> {
        TodoListProps {
            todos: selectors::visible_todos(state),
        }
    }

    /// Props of the notification area derived from the state
    #[must_use]
    pub fn notifications_props(state: &AppState) -> NotificationsProps<'_> {
        NotificationsProps {
            notifications: selectors::notifications(state),
        }
    }

    /// Renders filter bar, input, list and notifications, in that order
    #[must_use]
    pub fn render(state: &AppState) -> String {
        let mut sections = vec![
            FilterBar::render(&Self::filter_bar_props(state)),
            TodoCreate::render(&TodoCreateProps::default()),
        ];

        let list = TodoList::render(&Self::todo_list_props(state));
        if !list.is_empty() {
            sections.push(list);
        }

        let notifications = Notifications::render(&Self::notifications_props(state));
        if !notifications.is_empty() {
            sections.push(notifications);
        }

        if let Some(error) = &state.last_error {
            sections.push(format!("error: {error}"));
        }

        sections.join("\n")
    }
}

/// Something the user did on a component
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// Submitted the creation input
    Submit {
        /// Input content
        name: String,
    },
    /// Pressed the "Completed" button of a row
    Toggle {
        /// Row's todo
        id: TodoId,
    },
    /// Pressed a filter button
    SelectFilter {
        /// Chosen filter
        filter: Filter,
    },
    /// Dismissed a notification
    Dismiss {
        /// Notification key
        id: TodoId,
    },
}

impl UiEvent {
    /// Maps the event to the action it dispatches
    ///
    /// Submitting draws the new todo's id from the environment.
    #[must_use]
    pub fn into_action(self, env: &TodoEnvironment) -> TodoAction {
        match self {
            Self::Submit { name } => actions::new_todo(env, name),
            Self::Toggle { id } => actions::toggle_todo(id),
            Self::SelectFilter { filter } => actions::set_filter(filter),
            Self::Dismiss { id } => actions::hide_notification(id),
        }
    }
}
