//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Event, Guard, State};
use crate::graph::Transition;
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
///
/// # Example
///
/// ```rust
/// use waypoint::builder::TransitionBuilder;
/// use waypoint::{event_enum, state_enum};
///
/// state_enum! {
///     enum RunState {
///         Created,
///         Built,
///     }
/// }
///
/// event_enum! {
///     enum RunEvent {
///         Build,
///     }
/// }
///
/// let transition = TransitionBuilder::<RunState, RunEvent, String, u32>::new()
///     .event(RunEvent::Build)
///     .to(RunState::Built)
///     .when(|ctx, _input| ctx.is_none())
///     .effect(|_ctx, input| Some(format!("image-{input}")))
///     .build()
///     .unwrap();
///
/// assert_eq!(transition.target(), &RunState::Built);
/// ```
pub struct TransitionBuilder<S: State, E: Event, C, I> {
    event: Option<E>,
    target: Option<S>,
    guard: Option<Guard<C, I>>,
    effect: Option<crate::graph::SideEffect<C, I>>,
}

impl<S: State, E: Event, C, I> TransitionBuilder<S, E, C, I> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            event: None,
            target: None,
            guard: None,
            effect: None,
        }
    }

    /// Set the triggering event (required).
    pub fn event(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Add a pre-built guard (optional).
    pub fn guard(mut self, guard: Guard<C, I>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Option<&C>, &I) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the side effect (optional). Returning `Some` from the closure
    /// replaces the machine's context value after the hop.
    pub fn effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(Option<&C>, &I) -> Option<C> + Send + Sync + 'static,
    {
        self.effect = Some(Arc::new(effect));
        self
    }

    /// Build the transition, assigning its identity.
    pub fn build(self) -> Result<Transition<S, E, C, I>, BuildError> {
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let target = self.target.ok_or(BuildError::MissingTarget)?;

        Ok(Transition::new(event, target, self.guard, self.effect))
    }
}

impl<S: State, E: Event, C, I> Default for TransitionBuilder<S, E, C, I> {
    fn default() -> Self {
        Self::new()
    }
}
