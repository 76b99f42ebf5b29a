//! Core traits for lifecycle states and transition events.
//!
//! Every machine is generic over a state type and an event type. Both are
//! opaque, comparable identifiers used as map keys; the engine never
//! inspects them beyond equality, hashing and `name()` for diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for lifecycle states.
///
/// States are immutable values describing a point in an entity's lifecycle
/// (e.g. `Created`, `Running`, `Deleted`). They are used as keys in the
/// machine's state table and in path search.
///
/// # Required Traits
///
/// - `Clone` + `Eq` + `Hash`: states are map keys and are copied into paths
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: lifecycle managers persist entity states
///   and reconstruct machines from them
///
/// # Example
///
/// ```rust
/// use waypoint::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum RunState {
///     Created,
///     Running,
///     Stopped,
///     Deleted,
/// }
///
/// impl State for RunState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Created => "Created",
///             Self::Running => "Running",
///             Self::Stopped => "Stopped",
///             Self::Deleted => "Deleted",
///         }
///     }
///
///     fn is_terminal(&self) -> bool {
///         matches!(self, Self::Deleted)
///     }
/// }
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// Machines are normally discarded after entering a terminal state
    /// (e.g. `Deleted`); the engine itself never blocks transitions out of
    /// one, it only reports the flag.
    ///
    /// Default implementation returns `false`.
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Trait for transition-triggering events.
///
/// Events name the cause of an edge in the transition graph (e.g. `Build`,
/// `Run`, `Stop`, `Delete`). They key the per-event listener table and the
/// event-indexed transition lookup.
///
/// # Example
///
/// ```rust
/// use waypoint::core::Event;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum RunEvent {
///     Build,
///     Run,
///     Stop,
/// }
///
/// impl Event for RunEvent {
///     fn name(&self) -> &str {
///         match self {
///             Self::Build => "Build",
///             Self::Run => "Run",
///             Self::Stop => "Stop",
///         }
///     }
/// }
/// ```
pub trait Event:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
