//! Core types shared by the whole engine.
//!
//! This module contains the vocabulary of the state machine:
//! - State and event identification via the `State` and `Event` traits
//! - Guard predicates for admission control on hops
//! - The context holder threaded through every transition
//! - The journal of applied hops

mod context;
mod guard;
mod journal;
mod state;

pub use context::MachineContext;
pub use guard::Guard;
pub use journal::{TransitionJournal, TransitionRecord};
pub use state::{Event, State};
