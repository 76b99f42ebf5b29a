//! State definitions: one node of the graph and its outgoing edges.

use crate::core::{Event, State};
use crate::graph::transition::Transition;
use std::fmt;
use std::sync::Arc;

/// Hook run when the machine enters or leaves a state.
///
/// Receives the context value current at that point of the walk. Hooks run
/// inside the machine's lock and cannot replace the context; context
/// replacement belongs to the transition's side effect.
pub type StateAction<C> = Arc<dyn Fn(Option<&C>) + Send + Sync>;

/// A state together with its outgoing transitions and entry/exit hooks.
///
/// Transitions are kept in registration order. Both lookups scan that order
/// and return the first match, so when two transitions out of a state share
/// a target (two events leading to the same place), [`transition_for_target`]
/// deterministically picks the one registered first.
///
/// [`transition_for_target`]: StateDefinition::transition_for_target
pub struct StateDefinition<S: State, E: Event, C, I> {
    state: S,
    transitions: Vec<Transition<S, E, C, I>>,
    entry_action: Option<StateAction<C>>,
    exit_action: Option<StateAction<C>>,
}

impl<S: State, E: Event, C, I> StateDefinition<S, E, C, I> {
    pub(crate) fn new(
        state: S,
        transitions: Vec<Transition<S, E, C, I>>,
        entry_action: Option<StateAction<C>>,
        exit_action: Option<StateAction<C>>,
    ) -> Self {
        Self {
            state,
            transitions,
            entry_action,
            exit_action,
        }
    }

    /// The state this definition describes.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Outgoing transitions in registration order.
    pub fn transitions(&self) -> &[Transition<S, E, C, I>] {
        &self.transitions
    }

    /// The transition triggered by `event`, if one is declared.
    pub fn transition_for_event(&self, event: &E) -> Option<&Transition<S, E, C, I>> {
        self.transitions.iter().find(|t| t.event() == event)
    }

    /// The transition leading to `target`, if one is declared.
    ///
    /// First registered wins when several events lead to the same target.
    pub fn transition_for_target(&self, target: &S) -> Option<&Transition<S, E, C, I>> {
        self.transitions.iter().find(|t| t.target() == target)
    }

    /// Run the entry hook, if any.
    pub(crate) fn run_entry(&self, context: Option<&C>) {
        if let Some(action) = &self.entry_action {
            action(context);
        }
    }

    /// Run the exit hook, if any.
    pub(crate) fn run_exit(&self, context: Option<&C>) {
        if let Some(action) = &self.exit_action {
            action(context);
        }
    }

    /// Fold another contribution for the same state into this definition.
    ///
    /// Transitions are unioned by id (identity, not structure), preserving
    /// contribution order. Entry/exit hooks survive the merge: the first
    /// contribution that supplies one wins.
    pub(crate) fn merge_from(&mut self, other: &StateDefinition<S, E, C, I>) {
        for transition in &other.transitions {
            if !self.transitions.iter().any(|t| t.id() == transition.id()) {
                self.transitions.push(transition.clone());
            }
        }
        if self.entry_action.is_none() {
            self.entry_action = other.entry_action.clone();
        }
        if self.exit_action.is_none() {
            self.exit_action = other.exit_action.clone();
        }
    }
}

impl<S: State, E: Event, C, I> Clone for StateDefinition<S, E, C, I> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            transitions: self.transitions.clone(),
            entry_action: self.entry_action.clone(),
            exit_action: self.exit_action.clone(),
        }
    }
}

impl<S: State, E: Event, C, I> fmt::Debug for StateDefinition<S, E, C, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("state", &self.state)
            .field("transitions", &self.transitions)
            .field("has_entry", &self.entry_action.is_some())
            .field("has_exit", &self.exit_action.is_some())
            .finish()
    }
}
