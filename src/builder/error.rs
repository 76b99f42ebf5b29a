//! Build errors for machine, state-definition and transition builders.

use thiserror::Error;

/// Errors that can occur when assembling machines and their parts.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states declared. Add at least one state definition")]
    NoStates,

    #[error("Initial state '{0}' is not declared in the state table")]
    UnknownInitialState(String),

    #[error("Definition state not specified. Call .state(state)")]
    MissingState,

    #[error("Transition event not specified. Call .event(event)")]
    MissingEvent,

    #[error("Transition target not specified. Call .to(state)")]
    MissingTarget,
}
