//! Transition edges of the state graph.

use crate::core::{Event, Guard, State};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Side effect run after a hop is applied.
///
/// Receives the context value current at that point of the walk and the
/// caller's input. Returning `Some` replaces the machine's context value;
/// returning `None` leaves it untouched.
pub type SideEffect<C, I> = Arc<dyn Fn(Option<&C>, &I) -> Option<C> + Send + Sync>;

/// A directed edge out of one state.
///
/// A transition belongs to exactly one source [`StateDefinition`]; it is
/// never shared structurally between states. Each transition carries a
/// unique id assigned at build time, and the factory's union-merge
/// de-duplicates by that id — never by structural equality — so two
/// look-alike transitions contributed by different modules stay distinct.
///
/// [`StateDefinition`]: crate::graph::StateDefinition
pub struct Transition<S: State, E: Event, C, I> {
    id: Uuid,
    event: E,
    target: S,
    guard: Option<Guard<C, I>>,
    effect: Option<SideEffect<C, I>>,
}

impl<S: State, E: Event, C, I> Transition<S, E, C, I> {
    pub(crate) fn new(
        event: E,
        target: S,
        guard: Option<Guard<C, I>>,
        effect: Option<SideEffect<C, I>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event,
            target,
            guard,
            effect,
        }
    }

    /// Identity of this transition, stable across clones.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The event that triggers this transition.
    pub fn event(&self) -> &E {
        &self.event
    }

    /// The state this transition leads to.
    pub fn target(&self) -> &S {
        &self.target
    }

    /// Evaluate the guard against the current context and input.
    ///
    /// A transition without a guard always accepts.
    pub fn accepts(&self, context: Option<&C>, input: &I) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(context, input))
    }

    /// Run the side effect, if any, returning the replacement context value.
    pub fn apply_effect(&self, context: Option<&C>, input: &I) -> Option<C> {
        self.effect.as_ref().and_then(|f| f(context, input))
    }
}

impl<S: State, E: Event, C, I> Clone for Transition<S, E, C, I> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            event: self.event.clone(),
            target: self.target.clone(),
            guard: self.guard.clone(),
            effect: self.effect.as_ref().map(Arc::clone),
        }
    }
}

impl<S: State, E: Event, C, I> fmt::Debug for Transition<S, E, C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("id", &self.id)
            .field("event", &self.event)
            .field("target", &self.target)
            .field("guarded", &self.guard.is_some())
            .field("has_effect", &self.effect.is_some())
            .finish()
    }
}
