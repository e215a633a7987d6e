//! Property-based tests for the todo reducers and selectors.
//!
//! States are built by running generated action sequences through
//! `AppReducer`, so every generated state is reachable.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use todos::{actions, selectors, AppReducer, AppState, Filter, TodoAction, TodoEnvironment, TodoId};
use todos_core::reducer::Reducer;
use todos_testing::test_ids;

fn env() -> TodoEnvironment {
    TodoEnvironment::new(Arc::new(test_ids()), Duration::from_secs(5))
}

fn run(state: &mut AppState, actions: Vec<TodoAction>) {
    let reducer = AppReducer::new();
    let env = env();
    for action in actions {
        let _ = reducer.reduce(state, action, &env);
    }
}

prop_compose! {
    fn arbitrary_filter()(variant in 0..3u8) -> Filter {
        match variant {
            0 => Filter::ShowAll,
            1 => Filter::ShowCompleted,
            _ => Filter::ShowIncompleted,
        }
    }
}

prop_compose! {
    /// A state with `n` todos and an arbitrary subset completed
    fn arbitrary_state()(completed in prop::collection::vec(any::<bool>(), 0..20)) -> AppState {
        let mut state = AppState::new();
        let mut setup = Vec::new();
        for (n, done) in completed.iter().enumerate() {
            let id = TodoId::new(n.to_string());
            setup.push(actions::add_todo(id.clone(), format!("todo {n}")));
            if *done {
                setup.push(actions::toggle_todo(id));
            }
        }
        run(&mut state, setup);
        state
    }
}

proptest! {
    #[test]
    fn completed_and_incompleted_partition_all(state in arbitrary_state()) {
        let mut state = state;

        state.filter = Filter::ShowAll;
        let all = selectors::visible_todo_ids(&state);

        state.filter = Filter::ShowCompleted;
        let completed = selectors::visible_todo_ids(&state);

        state.filter = Filter::ShowIncompleted;
        let incompleted = selectors::visible_todo_ids(&state);

        let completed_set: HashSet<_> = completed.iter().collect();
        let incompleted_set: HashSet<_> = incompleted.iter().collect();

        prop_assert!(completed_set.is_disjoint(&incompleted_set));
        prop_assert_eq!(completed.len() + incompleted.len(), all.len());
        prop_assert_eq!(completed.len(), selectors::completed_count(&state));
    }

    #[test]
    fn filtered_views_keep_insertion_order(state in arbitrary_state(), filter in arbitrary_filter()) {
        let mut state = state;
        state.filter = filter;

        let visible = selectors::visible_todo_ids(&state);
        let positions: Vec<usize> = visible
            .iter()
            .filter_map(|id| state.todos.ids().iter().position(|existing| existing == id))
            .collect();

        prop_assert_eq!(positions.len(), visible.len());
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn toggling_twice_is_identity(state in arbitrary_state(), pick in any::<prop::sample::Index>()) {
        prop_assume!(state.todos.count() > 0);
        let id = state.todos.ids()[pick.index(state.todos.count())].clone();

        let mut toggled = state.clone();
        run(&mut toggled, vec![actions::toggle_todo(id.clone()), actions::toggle_todo(id)]);

        prop_assert_eq!(toggled.todos, state.todos);
    }

    #[test]
    fn adding_grows_show_all_by_one(state in arbitrary_state(), name in "[a-z]{1,12}") {
        let mut state = state;
        state.filter = Filter::ShowAll;
        let before = selectors::visible_todo_ids(&state);

        let id = TodoId::new("fresh");
        run(&mut state, vec![actions::add_todo(id.clone(), name)]);

        let after = selectors::visible_todo_ids(&state);
        prop_assert_eq!(after.len(), before.len() + 1);
        prop_assert_eq!(&after[..before.len()], &before[..]);
        prop_assert_eq!(after.last(), Some(&id));
        prop_assert_eq!(selectors::notifications(&state).len(), before.len() + 1);
    }

    #[test]
    fn set_filter_leaves_todos_alone(state in arbitrary_state(), filter in arbitrary_filter()) {
        let mut filtered = state.clone();
        run(&mut filtered, vec![actions::set_filter(filter)]);

        prop_assert_eq!(filtered.filter, filter);
        prop_assert_eq!(filtered.todos, state.todos);
        prop_assert_eq!(filtered.notifications, state.notifications);
    }
}

#[test]
fn single_incomplete_todo_example() {
    let mut state = AppState::new();
    run(&mut state, vec![actions::add_todo(TodoId::new("1"), "A")]);

    assert_eq!(selectors::visible_todo_ids(&state), vec![TodoId::new("1")]);

    state.filter = Filter::ShowCompleted;
    assert!(selectors::visible_todo_ids(&state).is_empty());
}
