//! Todo list with visibility filters and expiring notifications.
//!
//! The application state has three slices: the todo collection, the active
//! visibility filter, and the notifications. Each slice has its own reducer
//! and [`AppReducer`] combines them. Adding a todo shows a
//! "Todo Created <name>" notification that hides itself after
//! [`reducer::NOTIFICATION_TTL`] unless dismissed first.
//!
//! # Quick Start
//!
//! ```no_run
//! use todos::{actions, selectors, AppReducer, AppState, Filter, TodoEnvironment};
//! use todos_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::default();
//! let add = actions::new_todo(&env, "Buy milk");
//! let store = Store::new(AppState::seeded(), AppReducer::new(), env);
//!
//! store.send(add).await?;
//! store.send(actions::set_filter(Filter::ShowIncompleted)).await?;
//!
//! let visible = store.state(selectors::visible_todo_ids).await;
//! println!("{} incomplete todos", visible.len());
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod reducer;
pub mod selectors;
pub mod shell;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use actions::TodoAction;
pub use config::{AppConfig, ConfigError};
pub use error::TodoError;
pub use reducer::{AppReducer, TodoEnvironment};
pub use types::{AppState, Filter, NotificationState, Todo, TodoId, TodoState};
pub use view::{App, UiEvent};

/// Store type used by the application
pub type TodoStore = todos_runtime::Store<AppState, TodoAction, TodoEnvironment, AppReducer>;
