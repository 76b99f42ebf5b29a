//! Journal of applied transition hops.
//!
//! Each machine keeps a chronological record of the hops it has applied.
//! The journal is a value: `record` returns a new journal rather than
//! mutating in place, so snapshots handed out by the machine stay stable.

use super::state::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied hop.
///
/// `event` is the transition's triggering event, or `None` when the machine
/// was diverted to its error state (diversion follows no declared edge).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State, E: Event> {
    /// The state the machine left
    pub from: S,
    /// The state the machine entered
    pub to: S,
    /// The event that triggered the hop, if any
    pub event: Option<E>,
    /// When the hop was applied
    pub timestamp: DateTime<Utc>,
}

/// Ordered journal of applied hops.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{Event, State, TransitionJournal, TransitionRecord};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Phase { Created, Built }
///
/// impl State for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Created => "Created",
///             Self::Built => "Built",
///         }
///     }
/// }
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Trigger { Build }
///
/// impl Event for Trigger {
///     fn name(&self) -> &str { "Build" }
/// }
///
/// let journal = TransitionJournal::new();
/// let journal = journal.record(TransitionRecord {
///     from: Phase::Created,
///     to: Phase::Built,
///     event: Some(Trigger::Build),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(journal.records().len(), 1);
/// assert_eq!(journal.path(), vec![&Phase::Created, &Phase::Built]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionJournal<S: State, E: Event> {
    records: Vec<TransitionRecord<S, E>>,
}

impl<S: State, E: Event> Default for TransitionJournal<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> TransitionJournal<S, E> {
    /// Create a new empty journal.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a hop, returning a new journal with the record appended.
    pub fn record(&self, record: TransitionRecord<S, E>) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All records in application order.
    pub fn records(&self) -> &[TransitionRecord<S, E>] {
        &self.records
    }

    /// The sequence of states visited: the first record's `from`, then the
    /// `to` of every record.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Wall-clock span from the first to the last recorded hop.
    ///
    /// Returns `None` for an empty journal.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        (last.timestamp - first.timestamp).to_std().ok()
    }
}
