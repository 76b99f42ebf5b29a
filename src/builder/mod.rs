//! Builder API for assembling machines, state definitions and transitions.
//!
//! Builders validate required fields at `build()` time and seal immutable
//! values; nothing is mutable after sealing.

pub mod definition;
pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use definition::StateDefinitionBuilder;
pub use error::BuildError;
pub use machine::MachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Event, State};
use crate::graph::Transition;

/// Create a simple unguarded, effect-free transition.
///
/// # Example
///
/// ```
/// use waypoint::builder::simple_transition;
/// use waypoint::{event_enum, state_enum};
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
///     terminal: [End]
/// }
///
/// event_enum! {
///     enum MyEvent {
///         Finish,
///     }
/// }
///
/// let transition = simple_transition::<MyState, MyEvent, (), ()>(MyEvent::Finish, MyState::End);
/// assert_eq!(transition.target(), &MyState::End);
/// ```
pub fn simple_transition<S, E, C, I>(event: E, target: S) -> Transition<S, E, C, I>
where
    S: State,
    E: Event,
{
    TransitionBuilder::new()
        .event(event)
        .to(target)
        .build()
        .expect("Simple transition should always build")
}

/// Create an effect-free transition with a guard predicate.
///
/// # Example
///
/// ```
/// use waypoint::builder::guarded_transition;
/// use waypoint::{event_enum, state_enum};
///
/// state_enum! {
///     enum MyState {
///         Start,
///         End,
///     }
/// }
///
/// event_enum! {
///     enum MyEvent {
///         Finish,
///     }
/// }
///
/// let transition = guarded_transition::<MyState, MyEvent, u32, (), _>(
///     MyEvent::Finish,
///     MyState::End,
///     |ctx, _input| ctx.is_some(),
/// );
/// assert!(!transition.accepts(None, &()));
/// ```
pub fn guarded_transition<S, E, C, I, F>(event: E, target: S, guard: F) -> Transition<S, E, C, I>
where
    S: State,
    E: Event,
    F: Fn(Option<&C>, &I) -> bool + Send + Sync + 'static,
{
    TransitionBuilder::new()
        .event(event)
        .to(target)
        .when(guard)
        .build()
        .expect("Guarded transition should always build")
}
