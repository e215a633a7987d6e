//! Declarative macros for ergonomic effect construction
//!
//! `delay!` builds the timer effects reducers return, with or without a
//! cancellation id.

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// With an `id:` argument the delay is wrapped in `Effect::Cancellable`.
///
/// # Example
///
/// ```rust,ignore
/// use todos_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(5),
///     action: TodoAction::HideNotification { id }
/// }
///
/// delay! {
///     id: EffectId::new("notification-1"),
///     duration: Duration::from_secs(5),
///     action: TodoAction::HideNotification { id }
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
    (
        id: $id:expr,
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($crate::effect::Effect::Delay {
                duration: $duration,
                action: ::std::boxed::Box::new($action),
            }),
        }
    };
}
