//! The sealed machine: serialized transition execution over a state graph.
//!
//! A [`Machine`] owns the current state, the immutable state table, an
//! optional designated error state and the context holder. Transition
//! requests name a target state anywhere in the graph; the machine finds a
//! path by depth-first search and walks it hop by hop under an exclusive,
//! bounded-wait lock.

mod error;
mod path;

pub use error::MachineError;

use crate::core::{Event, MachineContext, State, TransitionJournal, TransitionRecord};
use crate::graph::StateDefinition;
use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};
use path::find_path;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Default bound on waiting for the transition lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(600);

/// Listener notified when a transition for its event is applied.
///
/// Receives the context value from before the hop and the caller's input.
pub type EventListener<C, I> = Arc<dyn Fn(Option<&C>, &I) + Send + Sync>;

/// Listener notified after every state change.
///
/// Receives the new state and the context value current at that point.
pub type StateChangeListener<S, C> = Arc<dyn Fn(&S, Option<&C>) + Send + Sync>;

/// Outcome of a transition request.
///
/// A request that stops short of its target — a guard rejected a hop, or
/// the machine diverted to its error state — is not an error: the machine
/// simply reports where it ended up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionReport<S: State> {
    /// The state the machine is in after the request.
    pub reached: S,
    /// Whether `reached` is the requested target.
    pub reached_target: bool,
}

struct MachineInner<S: State, E: Event, C, I> {
    current: S,
    context: MachineContext<C>,
    journal: TransitionJournal<S, E>,
    event_listeners: HashMap<E, EventListener<C, I>>,
    state_change_listener: Option<StateChangeListener<S, C>>,
}

/// A sealed state machine driving one lifecycle-managed entity.
///
/// Built by [`MachineBuilder`] or [`MachineFactory`]; the state table is
/// immutable once sealed, while the current state, context, journal and
/// listeners live behind a single bounded-wait mutex. Transition requests
/// against one machine are fully serialized; machines are independent of
/// each other.
///
/// [`MachineBuilder`]: crate::builder::MachineBuilder
/// [`MachineFactory`]: crate::factory::MachineFactory
pub struct Machine<S: State, E: Event, C, I> {
    id: Uuid,
    states: HashMap<S, StateDefinition<S, E, C, I>>,
    error_state: Option<S>,
    lock_timeout: Duration,
    inner: Mutex<MachineInner<S, E, C, I>>,
}

impl<S: State, E: Event, C, I> Machine<S, E, C, I> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        states: HashMap<S, StateDefinition<S, E, C, I>>,
        error_state: Option<S>,
        initial: S,
        context: MachineContext<C>,
        event_listeners: HashMap<E, EventListener<C, I>>,
        state_change_listener: Option<StateChangeListener<S, C>>,
        lock_timeout: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            states,
            error_state,
            lock_timeout,
            inner: Mutex::new(MachineInner {
                current: initial,
                context,
                journal: TransitionJournal::new(),
                event_listeners,
                state_change_listener,
            }),
        }
    }

    /// This machine's unique id, carried in every error it raises.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The designated error state, if one is configured.
    pub fn error_state(&self) -> Option<&S> {
        self.error_state.as_ref()
    }

    /// Introspect a declared state's definition. Lock-free: the table is
    /// immutable once sealed.
    pub fn state_definition(&self, state: &S) -> Option<&StateDefinition<S, E, C, I>> {
        self.states.get(state)
    }

    /// The current state, read under the lock.
    pub fn current_state(&self) -> Result<S, MachineError> {
        Ok(self.lock_inner()?.current.clone())
    }

    /// Whether the machine sits in a terminal state.
    pub fn is_terminal(&self) -> Result<bool, MachineError> {
        Ok(self.lock_inner()?.current.is_terminal())
    }

    /// Snapshot of the context value, read under the lock.
    ///
    /// Returns `Ok(None)` when the current state does not resolve to a
    /// declared definition.
    pub fn context(&self) -> Result<Option<C>, MachineError>
    where
        C: Clone,
    {
        let inner = self.lock_inner()?;
        if self.states.contains_key(&inner.current) {
            Ok(inner.context.cloned())
        } else {
            Ok(None)
        }
    }

    /// Snapshot of the journal of applied hops.
    pub fn journal(&self) -> Result<TransitionJournal<S, E>, MachineError> {
        Ok(self.lock_inner()?.journal.clone())
    }

    /// Register a listener for one event. First registration wins; later
    /// registrations for the same event are ignored.
    pub fn set_event_listener<F>(&self, event: E, listener: F)
    where
        F: Fn(Option<&C>, &I) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        inner
            .event_listeners
            .entry(event)
            .or_insert_with(|| Arc::new(listener));
    }

    /// Register the state-change listener. First registration wins.
    pub fn set_state_change_listener<F>(&self, listener: F)
    where
        F: Fn(&S, Option<&C>) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        if inner.state_change_listener.is_none() {
            inner.state_change_listener = Some(Arc::new(listener));
        }
    }

    /// Request a transition to `target`, possibly several hops away.
    ///
    /// Finds a path from the current state by depth-first search and walks
    /// it pairwise. Per hop, in order: the source state's exit action, guard
    /// evaluation against `(context, input)`, the event listener for the
    /// hop's event (old context), state advance, the state-change listener,
    /// the target state's entry action, and the transition's side effect
    /// (which may replace the context value).
    ///
    /// A rejecting guard halts the walk at the last entered state; hops
    /// applied before it stay applied — there is no rollback. Requesting
    /// the current state with no self-transition is a no-op that reports
    /// `reached_target: true`.
    ///
    /// When no path exists the machine diverts to its error state (a normal
    /// outcome, `reached_target: false`); without one configured this is
    /// [`MachineError::NoRecoveryPath`]. Failing to acquire the lock within
    /// the machine's bound is [`MachineError::LockTimeout`] and leaves the
    /// machine untouched.
    pub fn go_to(&self, target: &S, input: &I) -> Result<TransitionReport<S>, MachineError> {
        let mut inner = self.lock_inner()?;

        let path = find_path(&self.states, &inner.current, target);
        if path.is_empty() {
            debug!(
                machine = %self.id,
                from = inner.current.name(),
                target = target.name(),
                "no path to requested state"
            );
            return self.divert_to_error_state(&mut inner);
        }

        let mut reached_target = true;
        for pair in path.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);

            // Path states are declared by construction; bail defensively
            // rather than panic if the table disagrees.
            let Some(definition) = self.states.get(from) else {
                reached_target = false;
                break;
            };

            definition.run_exit(inner.context.value());

            let Some(transition) = definition.transition_for_target(to) else {
                debug!(
                    machine = %self.id,
                    from = from.name(),
                    to = to.name(),
                    "no transition resolves this hop, stopping walk"
                );
                reached_target = false;
                break;
            };

            if !transition.accepts(inner.context.value(), input) {
                debug!(
                    machine = %self.id,
                    from = from.name(),
                    to = to.name(),
                    event = transition.event().name(),
                    "guard rejected hop, stopping walk"
                );
                reached_target = false;
                break;
            }

            if let Some(listener) = inner.event_listeners.get(transition.event()) {
                listener(inner.context.value(), input);
            }

            inner.current = to.clone();
            let journal = inner.journal.record(TransitionRecord {
                from: from.clone(),
                to: to.clone(),
                event: Some(transition.event().clone()),
                timestamp: Utc::now(),
            });
            inner.journal = journal;

            if let Some(listener) = &inner.state_change_listener {
                listener(&inner.current, inner.context.value());
            }

            if let Some(next_definition) = self.states.get(to) {
                next_definition.run_entry(inner.context.value());
            }

            if let Some(replacement) = transition.apply_effect(inner.context.value(), input) {
                inner.context.replace(replacement);
            }

            debug!(
                machine = %self.id,
                from = from.name(),
                to = to.name(),
                event = transition.event().name(),
                "applied hop"
            );
        }

        Ok(TransitionReport {
            reached: inner.current.clone(),
            reached_target,
        })
    }

    fn divert_to_error_state(
        &self,
        inner: &mut MachineInner<S, E, C, I>,
    ) -> Result<TransitionReport<S>, MachineError> {
        let Some(error_state) = &self.error_state else {
            return Err(MachineError::NoRecoveryPath { id: self.id });
        };
        let Some(definition) = self.states.get(error_state) else {
            return Err(MachineError::UndefinedErrorState { id: self.id });
        };

        warn!(
            machine = %self.id,
            error_state = error_state.name(),
            "diverting to error state"
        );

        let from = std::mem::replace(&mut inner.current, error_state.clone());
        let journal = inner.journal.record(TransitionRecord {
            from,
            to: error_state.clone(),
            event: None,
            timestamp: Utc::now(),
        });
        inner.journal = journal;

        if let Some(listener) = &inner.state_change_listener {
            listener(&inner.current, inner.context.value());
        }
        definition.run_entry(inner.context.value());

        Ok(TransitionReport {
            reached: error_state.clone(),
            reached_target: false,
        })
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, MachineInner<S, E, C, I>>, MachineError> {
        self.inner.try_lock_for(self.lock_timeout).ok_or_else(|| {
            warn!(
                machine = %self.id,
                waited = ?self.lock_timeout,
                "timed out waiting for the transition lock"
            );
            MachineError::LockTimeout {
                id: self.id,
                waited: self.lock_timeout,
            }
        })
    }
}
