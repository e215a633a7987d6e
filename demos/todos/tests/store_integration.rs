//! Integration tests for the todo application running on a Store
//!
//! Notification timers run for real here, so TTLs are kept short.

use std::sync::Arc;
use std::time::Duration;
use todos::{
    actions, reducer::notification_timer, selectors, AppReducer, AppState, Filter, TodoAction,
    TodoEnvironment, TodoError, TodoId, TodoStore,
};
use todos_runtime::Store;
use todos_testing::SequentialIdGenerator;

const TTL: Duration = Duration::from_millis(40);

fn test_store(initial: AppState) -> TodoStore {
    let env = TodoEnvironment::new(Arc::new(SequentialIdGenerator::new("todo")), TTL);
    Store::new(initial, AppReducer::new(), env)
}

#[tokio::test]
async fn test_created_notification_expires() {
    let store = test_store(AppState::new());

    let mut handle = store
        .send(actions::add_todo(TodoId::new("1"), "A"))
        .await
        .unwrap();

    let shown = store.state(|s| selectors::notifications(s).len()).await;
    assert_eq!(shown, 1);
    assert_eq!(store.pending_cancellable(&notification_timer(&TodoId::new("1"))), 1);

    handle
        .wait_with_timeout(Duration::from_secs(2))
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert!(state.notifications.is_empty());
    assert_eq!(state.todos.count(), 1);
    assert_eq!(store.pending_cancellable(&notification_timer(&TodoId::new("1"))), 0);
}

#[tokio::test]
async fn test_expiry_is_broadcast_to_subscribers() {
    let store = test_store(AppState::new());

    let hidden = store
        .send_and_wait_for(
            actions::add_todo(TodoId::new("1"), "A"),
            |action| matches!(action, TodoAction::HideNotification { .. }),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    assert_eq!(hidden, actions::hide_notification(TodoId::new("1")));
    assert!(store.state(|s| s.notifications.is_empty()).await);
}

#[tokio::test]
async fn test_explicit_hide_cancels_timer() {
    let store = test_store(AppState::new());
    let mut subscriber = store.subscribe_actions();
    let id = TodoId::new("1");

    let mut add = store.send(actions::add_todo(id.clone(), "A")).await.unwrap();
    store.send(actions::hide_notification(id.clone())).await.unwrap();

    assert!(store.state(|s| s.notifications.is_empty()).await);

    // The aborted timer completes the handle without dispatching anything
    add.wait_with_timeout(Duration::from_secs(2)).await.unwrap();
    assert_eq!(store.pending_cancellable(&notification_timer(&id)), 0);

    tokio::time::sleep(TTL * 2).await;

    let mut seen = Vec::new();
    while let Ok(action) = subscriber.try_recv() {
        seen.push(action);
    }
    assert_eq!(
        seen,
        vec![actions::add_todo(id.clone(), "A"), actions::hide_notification(id)]
    );
}

#[tokio::test]
async fn test_notifications_for_several_todos_expire_independently() {
    let store = test_store(AppState::new());

    let mut first = store.send(actions::add_todo(TodoId::new("a"), "A")).await.unwrap();
    let mut second = store.send(actions::add_todo(TodoId::new("b"), "B")).await.unwrap();

    store.send(actions::hide_notification(TodoId::new("a"))).await.unwrap();
    let texts = store
        .state(|s| selectors::notifications(s).into_iter().map(str::to_string).collect::<Vec<_>>())
        .await;
    assert_eq!(texts, vec!["Todo Created B".to_string()]);

    first.wait_with_timeout(Duration::from_secs(2)).await.unwrap();
    second.wait_with_timeout(Duration::from_secs(2)).await.unwrap();
    assert!(store.state(|s| s.notifications.is_empty()).await);
}

#[tokio::test]
async fn test_rejected_add_starts_no_timer() {
    let store = test_store(AppState::seeded());

    let mut handle = store
        .send(actions::add_todo(TodoId::new("1"), "Duplicate"))
        .await
        .unwrap();

    assert_eq!(handle.pending(), 0);
    handle.wait().await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.last_error, Some(TodoError::DuplicateId(TodoId::new("1"))));
    assert!(state.notifications.is_empty());
    assert_eq!(state.todos.count(), 10);
}

#[tokio::test]
async fn test_filter_and_toggle_through_store() {
    let store = test_store(AppState::seeded());

    store.send(actions::toggle_todo(TodoId::new("2"))).await.unwrap();
    store.send(actions::set_filter(Filter::ShowCompleted)).await.unwrap();

    let visible = store.state(selectors::visible_todo_ids).await;
    assert_eq!(visible, vec![TodoId::new("2")]);

    store.send(actions::set_filter(Filter::ShowIncompleted)).await.unwrap();
    let visible = store.state(selectors::visible_todo_ids).await;
    assert_eq!(visible.len(), 9);
    assert!(!visible.contains(&TodoId::new("2")));
}

#[tokio::test]
async fn test_generated_ids_are_unique() {
    let store = test_store(AppState::new());

    for name in ["A", "B", "C"] {
        let action = actions::new_todo(store.environment(), name);
        store.send(action).await.unwrap();
    }

    let ids = store.state(|s| s.todos.ids().to_vec()).await;
    assert_eq!(
        ids,
        vec![TodoId::new("todo-1"), TodoId::new("todo-2"), TodoId::new("todo-3")]
    );
}

#[tokio::test]
async fn test_shutdown_waits_for_timers() {
    let store = test_store(AppState::new());

    store.send(actions::add_todo(TodoId::new("1"), "A")).await.unwrap();
    assert_eq!(store.pending_effects(), 1);

    store.shutdown(Duration::from_secs(2)).await.unwrap();
    assert_eq!(store.pending_effects(), 0);

    // A timer firing during shutdown is dropped along with its action
    assert_eq!(store.state(|s| s.notifications.len()).await, 1);
    assert!(store.send(actions::set_filter(Filter::ShowAll)).await.is_err());
}

#[tokio::test]
async fn test_shutdown_timeout_reports_pending_timers() {
    let env = TodoEnvironment::new(
        Arc::new(SequentialIdGenerator::new("todo")),
        Duration::from_secs(30),
    );
    let store = Store::new(AppState::new(), AppReducer::new(), env);

    store.send(actions::add_todo(TodoId::new("1"), "A")).await.unwrap();

    let result = store.shutdown(Duration::from_millis(30)).await;
    assert!(matches!(result, Err(todos_runtime::StoreError::ShutdownTimeout(1))));
}
