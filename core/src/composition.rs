//! Reducer composition utilities
//!
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on one slice of a larger state
//!
//! Together they give the "one reducer per slice" layout: every slice
//! reducer is scoped to its field and the scoped reducers are combined into
//! the root reducer.
//!
//! # Examples
//!
//! ```
//! use todos_core::composition::{combine_reducers, scope_reducer};
//! use todos_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Default)]
//! struct AppState {
//!     hits: u32,
//!     label: String,
//! }
//!
//! #[derive(Clone)]
//! enum AppAction {
//!     Hit,
//!     Rename(String),
//! }
//!
//! struct HitsReducer;
//! struct LabelReducer;
//!
//! impl Reducer for HitsReducer {
//!     type State = u32;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut u32, action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
//!         if matches!(action, AppAction::Hit) {
//!             *state += 1;
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! impl Reducer for LabelReducer {
//!     type State = String;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut String, action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
//!         if let AppAction::Rename(label) = action {
//!             *state = label;
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! fn hits(state: &mut AppState) -> &mut u32 {
//!     &mut state.hits
//! }
//!
//! fn label(state: &mut AppState) -> &mut String {
//!     &mut state.label
//! }
//!
//! let root = combine_reducers::<AppState, AppAction, ()>(vec![
//!     Box::new(scope_reducer(HitsReducer, hits)),
//!     Box::new(scope_reducer(LabelReducer, label)),
//! ]);
//!
//! let mut state = AppState::default();
//! let _ = root.reduce(&mut state, AppAction::Hit, &());
//! let _ = root.reduce(&mut state, AppAction::Rename("inbox".into()), &());
//! assert_eq!(state.hits, 1);
//! assert_eq!(state.label, "inbox");
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Boxed reducer over a shared state/action/environment triple
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines reducers that operate on the same state and action types.
///
/// Each reducer sees every action, in order. Their effects are concatenated
/// with `Effect::None` entries dropped.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// Reducers run one after another on the same state.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E> {
    /// Number of reducers in the combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns true when no reducers were combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects.into_iter().filter(|effect| !effect.is_none()));
        }

        all_effects
    }
}

/// Scopes a reducer to one field of a larger state.
///
/// `slice` borrows the field mutably, so the child reducer updates it in
/// place and the slice type need not be `Clone`.
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    slice: fn(&mut S) -> &mut SubS,
) -> ScopedReducer<S, SubS, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer { reducer, slice }
}

/// A reducer focused on one slice of its parent state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, R> {
    reducer: R,
    slice: fn(&mut S) -> &mut SubS,
}

impl<S, SubS, R> Reducer for ScopedReducer<S, SubS, R>
where
    R: Reducer<State = SubS>,
{
    type State = S;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.reducer.reduce((self.slice)(state), action, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectId;
    use crate::{smallvec, SmallVec};

    // Deliberately not Clone: scoping must work on the field in place
    #[derive(Default)]
    struct Journal {
        entries: Vec<String>,
    }

    #[derive(Default)]
    struct Inbox {
        unread: u32,
        journal: Journal,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum InboxAction {
        Receive(String),
        ReadAll,
    }

    struct UnreadReducer;

    impl Reducer for UnreadReducer {
        type State = u32;
        type Action = InboxAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut u32,
            action: InboxAction,
            _env: &(),
        ) -> SmallVec<[Effect<InboxAction>; 4]> {
            match action {
                InboxAction::Receive(_) => {
                    *state += 1;
                    smallvec![Effect::None]
                },
                InboxAction::ReadAll => {
                    *state = 0;
                    smallvec![Effect::Cancel {
                        id: EffectId::new("badge"),
                    }]
                },
            }
        }
    }

    struct JournalReducer;

    impl Reducer for JournalReducer {
        type State = Journal;
        type Action = InboxAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Journal,
            action: InboxAction,
            _env: &(),
        ) -> SmallVec<[Effect<InboxAction>; 4]> {
            if let InboxAction::Receive(subject) = action {
                state.entries.push(subject);
            }
            smallvec![Effect::None]
        }
    }

    fn unread(inbox: &mut Inbox) -> &mut u32 {
        &mut inbox.unread
    }

    fn journal(inbox: &mut Inbox) -> &mut Journal {
        &mut inbox.journal
    }

    fn inbox_reducer() -> CombinedReducer<Inbox, InboxAction, ()> {
        combine_reducers(vec![
            Box::new(scope_reducer(UnreadReducer, unread)),
            Box::new(scope_reducer(JournalReducer, journal)),
        ])
    }

    #[test]
    fn every_slice_sees_every_action() {
        let root = inbox_reducer();
        assert_eq!(root.len(), 2);

        let mut state = Inbox::default();
        let _ = root.reduce(&mut state, InboxAction::Receive("hello".into()), &());
        let _ = root.reduce(&mut state, InboxAction::Receive("again".into()), &());

        assert_eq!(state.unread, 2);
        assert_eq!(state.journal.entries, vec!["hello", "again"]);
    }

    #[test]
    fn scoped_reducer_updates_field_in_place() {
        let scoped = scope_reducer(JournalReducer, journal);
        let mut state = Inbox {
            unread: 7,
            journal: Journal {
                entries: vec!["kept".into()],
            },
        };
        let before = state.journal.entries.as_ptr();

        let _ = scoped.reduce(&mut state, InboxAction::ReadAll, &());

        assert_eq!(state.unread, 7);
        assert_eq!(state.journal.entries.as_ptr(), before);
        assert_eq!(state.journal.entries, vec!["kept"]);
    }

    #[test]
    fn combined_effects_drop_noops() {
        let root = inbox_reducer();
        let mut state = Inbox::default();

        let effects = root.reduce(&mut state, InboxAction::Receive("x".into()), &());
        assert!(effects.is_empty());

        let effects = root.reduce(&mut state, InboxAction::ReadAll, &());
        assert_eq!(effects.len(), 1);
        assert!(matches!(&effects[0], Effect::Cancel { id } if id.as_str() == "badge"));
        assert_eq!(state.unread, 0);
    }

    #[test]
    fn empty_combination_is_a_noop() {
        let root: CombinedReducer<Inbox, InboxAction, ()> = combine_reducers(Vec::new());
        assert!(root.is_empty());

        let mut state = Inbox::default();
        let effects = root.reduce(&mut state, InboxAction::ReadAll, &());
        assert!(effects.is_empty());
    }
}
