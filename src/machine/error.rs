//! Runtime errors raised by a sealed machine.

use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while executing a transition request.
///
/// Only structural problems surface here. "No path but an error state is
/// configured" and "a guard rejected a hop" are expected control-flow
/// outcomes, absorbed into the [`TransitionReport`] instead.
///
/// [`TransitionReport`]: crate::machine::TransitionReport
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("machine {id}: timed out after {waited:?} waiting for the transition lock")]
    LockTimeout { id: Uuid, waited: Duration },

    #[error("machine {id}: no path to the requested state and no error state is configured")]
    NoRecoveryPath { id: Uuid },

    #[error("machine {id}: configured error state is missing from the state table")]
    UndefinedErrorState { id: Uuid },
}
