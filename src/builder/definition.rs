//! Builder for constructing state definitions.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Event, State};
use crate::graph::{StateDefinition, Transition};
use std::sync::Arc;

/// Builder accumulating one state's transitions and entry/exit hooks.
///
/// Zero transitions is legal — terminal states have none. Transition order
/// is preserved; it drives both path search and the first-registered
/// tie-break of the target-indexed lookup.
pub struct StateDefinitionBuilder<S: State, E: Event, C, I> {
    state: Option<S>,
    transitions: Vec<Transition<S, E, C, I>>,
    entry_action: Option<crate::graph::StateAction<C>>,
    exit_action: Option<crate::graph::StateAction<C>>,
}

impl<S: State, E: Event, C, I> StateDefinitionBuilder<S, E, C, I> {
    /// Create a new definition builder.
    pub fn new() -> Self {
        Self {
            state: None,
            transitions: Vec::new(),
            entry_action: None,
            exit_action: None,
        }
    }

    /// Set the state this definition describes (required).
    pub fn state(mut self, state: S) -> Self {
        self.state = Some(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(
        mut self,
        builder: TransitionBuilder<S, E, C, I>,
    ) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, E, C, I>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Set the hook run when the machine enters this state (optional).
    pub fn on_entry<F>(mut self, action: F) -> Self
    where
        F: Fn(Option<&C>) + Send + Sync + 'static,
    {
        self.entry_action = Some(Arc::new(action));
        self
    }

    /// Set the hook run when the machine leaves this state (optional).
    pub fn on_exit<F>(mut self, action: F) -> Self
    where
        F: Fn(Option<&C>) + Send + Sync + 'static,
    {
        self.exit_action = Some(Arc::new(action));
        self
    }

    /// Seal the definition.
    pub fn build(self) -> Result<StateDefinition<S, E, C, I>, BuildError> {
        let state = self.state.ok_or(BuildError::MissingState)?;

        Ok(StateDefinition::new(
            state,
            self.transitions,
            self.entry_action,
            self.exit_action,
        ))
    }
}

impl<S: State, E: Event, C, I> Default for StateDefinitionBuilder<S, E, C, I> {
    fn default() -> Self {
        Self::new()
    }
}
