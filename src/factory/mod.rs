//! Factory composing independently contributed transition sets.
//!
//! Lifecycle capabilities are usually authored by separate modules: a
//! "build" module knows how to take a `Created` run to `Built`, an
//! "execute" module knows how to take `Built` to `Running`, and both
//! declare edges out of states they share without knowing about each
//! other. The factory accepts each module's list of state-definition
//! builders, merges same-state contributions into one coherent table, and
//! seals machines from it — repeatedly, so a lifecycle manager can
//! reconstruct a machine from an entity's persisted state on every request.

use crate::builder::{BuildError, MachineBuilder, StateDefinitionBuilder};
use crate::core::{Event, State};
use crate::graph::StateDefinition;
use crate::machine::{Machine, DEFAULT_LOCK_TIMEOUT};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Factory over contributed partial state definitions.
///
/// Contributions are sealed when registered; `create` can then be called
/// any number of times. Same-state contributions are merged by transition
/// union, de-duplicated by transition identity (never by structure), with
/// contribution order preserved; the first contribution supplying an
/// entry or exit hook for a state wins.
///
/// # Example
///
/// ```rust
/// use waypoint::builder::{StateDefinitionBuilder, TransitionBuilder};
/// use waypoint::factory::MachineFactory;
/// use waypoint::{event_enum, state_enum};
///
/// state_enum! {
///     enum RunState {
///         Created,
///         Built,
///         Running,
///     }
/// }
///
/// event_enum! {
///     enum RunEvent {
///         Build,
///         Run,
///     }
/// }
///
/// // The "build" module contributes Created --Build--> Built.
/// let build_module = vec![
///     StateDefinitionBuilder::<RunState, RunEvent, (), ()>::new()
///         .state(RunState::Created)
///         .transition(TransitionBuilder::new().event(RunEvent::Build).to(RunState::Built))
///         .unwrap(),
///     StateDefinitionBuilder::new().state(RunState::Built),
/// ];
///
/// // The "execute" module contributes Built --Run--> Running.
/// let execute_module = vec![
///     StateDefinitionBuilder::new()
///         .state(RunState::Built)
///         .transition(TransitionBuilder::new().event(RunEvent::Run).to(RunState::Running))
///         .unwrap(),
///     StateDefinitionBuilder::new().state(RunState::Running),
/// ];
///
/// let factory = MachineFactory::new()
///     .contribute(build_module)
///     .unwrap()
///     .contribute(execute_module)
///     .unwrap();
///
/// let machine = factory.create(RunState::Created, None).unwrap();
/// let report = machine.go_to(&RunState::Running, &()).unwrap();
/// assert!(report.reached_target);
/// ```
pub struct MachineFactory<S: State, E: Event, C, I> {
    definitions: Vec<StateDefinition<S, E, C, I>>,
    error_state: Option<StateDefinition<S, E, C, I>>,
    lock_timeout: Duration,
}

impl<S: State, E: Event, C, I> MachineFactory<S, E, C, I> {
    /// Create an empty factory.
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            error_state: None,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Register one module's list of state-definition builders.
    /// The builders are sealed immediately; an invalid one fails the whole
    /// contribution.
    pub fn contribute(
        mut self,
        builders: Vec<StateDefinitionBuilder<S, E, C, I>>,
    ) -> Result<Self, BuildError> {
        for builder in builders {
            self.definitions.push(builder.build()?);
        }
        Ok(self)
    }

    /// Designate the error state for machines created by this factory.
    pub fn error_state(mut self, definition: StateDefinition<S, E, C, I>) -> Self {
        self.error_state = Some(definition);
        self
    }

    /// Override the lock timeout for machines created by this factory.
    pub fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Seal a machine starting at `initial` with the given context value.
    ///
    /// Reusable: each call merges the registered contributions afresh and
    /// yields an independent machine, so lifecycle managers can reconstruct
    /// one from an entity's last persisted state.
    pub fn create(
        &self,
        initial: S,
        context: Option<C>,
    ) -> Result<Machine<S, E, C, I>, BuildError> {
        let merged = self.merge_contributions();

        let mut builder = MachineBuilder::new()
            .initial(initial)
            .lock_timeout(self.lock_timeout);
        if let Some(value) = context {
            builder = builder.context(value);
        }
        for definition in merged {
            builder = builder.state(definition);
        }
        if let Some(error_definition) = &self.error_state {
            builder = builder.error_state(error_definition.clone());
        }

        builder.build()
    }

    /// Group contributed definitions by state, preserving first-seen order,
    /// and fold same-state contributions together.
    fn merge_contributions(&self) -> Vec<StateDefinition<S, E, C, I>> {
        let mut order: Vec<S> = Vec::new();
        let mut merged: HashMap<S, StateDefinition<S, E, C, I>> = HashMap::new();

        for definition in &self.definitions {
            match merged.get_mut(definition.state()) {
                Some(existing) => {
                    debug!(
                        state = definition.state().name(),
                        added = definition.transitions().len(),
                        "merging contribution"
                    );
                    existing.merge_from(definition);
                }
                None => {
                    order.push(definition.state().clone());
                    merged.insert(definition.state().clone(), definition.clone());
                }
            }
        }

        order
            .into_iter()
            .filter_map(|state| merged.remove(&state))
            .collect()
    }
}

impl<S: State, E: Event, C, I> Default for MachineFactory<S, E, C, I> {
    fn default() -> Self {
        Self::new()
    }
}
