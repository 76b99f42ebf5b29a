//! Builder for constructing sealed machines.

use crate::builder::error::BuildError;
use crate::core::{Event, MachineContext, State};
use crate::graph::StateDefinition;
use crate::machine::{
    EventListener, Machine, StateChangeListener, DEFAULT_LOCK_TIMEOUT,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Builder accumulating states, listeners and the error state before
/// sealing an immutable-shape [`Machine`].
///
/// # Example
///
/// ```rust
/// use waypoint::builder::{MachineBuilder, StateDefinitionBuilder, TransitionBuilder};
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
/// let machine = MachineBuilder::<RunState, RunEvent, u32, u32>::new()
///     .initial(RunState::Created)
///     .context(0)
///     .state(
///         StateDefinitionBuilder::new()
///             .state(RunState::Created)
///             .transition(TransitionBuilder::new().event(RunEvent::Build).to(RunState::Built))
///             .unwrap()
///             .build()
///             .unwrap(),
///     )
///     .state(StateDefinitionBuilder::new().state(RunState::Built).build().unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state().unwrap(), RunState::Created);
/// ```
pub struct MachineBuilder<S: State, E: Event, C, I> {
    initial: Option<S>,
    context: MachineContext<C>,
    states: HashMap<S, StateDefinition<S, E, C, I>>,
    error_state: Option<StateDefinition<S, E, C, I>>,
    event_listeners: HashMap<E, EventListener<C, I>>,
    state_change_listener: Option<StateChangeListener<S, C>>,
    lock_timeout: Duration,
}

impl<S: State, E: Event, C, I> MachineBuilder<S, E, C, I> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            context: MachineContext::empty(),
            states: HashMap::new(),
            error_state: None,
            event_listeners: HashMap::new(),
            state_change_listener: None,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Set the initial state (required). Must be declared via [`state`] or
    /// [`error_state`].
    ///
    /// [`state`]: MachineBuilder::state
    /// [`error_state`]: MachineBuilder::error_state
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the initial context value (optional; machines start empty).
    pub fn context(mut self, value: C) -> Self {
        self.context = MachineContext::new(Some(value));
        self
    }

    /// Declare a state. A later declaration for the same state replaces the
    /// earlier one.
    pub fn state(mut self, definition: StateDefinition<S, E, C, I>) -> Self {
        self.states.insert(definition.state().clone(), definition);
        self
    }

    /// Designate the error state the machine diverts to when no path to a
    /// requested target exists. Inserted into the state table only if that
    /// state is not otherwise declared; an explicit [`state`] entry wins.
    ///
    /// [`state`]: MachineBuilder::state
    pub fn error_state(mut self, definition: StateDefinition<S, E, C, I>) -> Self {
        self.error_state = Some(definition);
        self
    }

    /// Pre-register a listener for one event. First registration wins.
    pub fn event_listener<F>(mut self, event: E, listener: F) -> Self
    where
        F: Fn(Option<&C>, &I) + Send + Sync + 'static,
    {
        self.event_listeners
            .entry(event)
            .or_insert_with(|| Arc::new(listener));
        self
    }

    /// Pre-register the state-change listener. First registration wins.
    pub fn state_change_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&S, Option<&C>) + Send + Sync + 'static,
    {
        if self.state_change_listener.is_none() {
            self.state_change_listener = Some(Arc::new(listener));
        }
        self
    }

    /// Override the bound on waiting for the transition lock
    /// (default: 10 minutes).
    pub fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Seal the machine.
    /// Returns an error if required fields are missing or inconsistent.
    pub fn build(mut self) -> Result<Machine<S, E, C, I>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() && self.error_state.is_none() {
            return Err(BuildError::NoStates);
        }

        let mut error_state = None;
        if let Some(definition) = self.error_state.take() {
            let state = definition.state().clone();
            self.states.entry(state.clone()).or_insert(definition);
            error_state = Some(state);
        }

        if !self.states.contains_key(&initial) {
            return Err(BuildError::UnknownInitialState(
                initial.name().to_string(),
            ));
        }

        Ok(Machine::new(
            self.states,
            error_state,
            initial,
            self.context,
            self.event_listeners,
            self.state_change_listener,
            self.lock_timeout,
        ))
    }
}

impl<S: State, E: Event, C, I> Default for MachineBuilder<S, E, C, I> {
    fn default() -> Self {
        Self::new()
    }
}
