//! Waypoint: a lifecycle state machine engine.
//!
//! Waypoint drives lifecycle-managed entities (runs, models, workflows,
//! tasks) through their states. A caller requests a transition to *any*
//! reachable state; the machine finds a path by depth-first search over the
//! declared transition graph and walks it hop by hop — exit hook, guard,
//! listeners, entry hook, side effect — under an exclusive, bounded-wait
//! lock, so concurrent requests against one machine are fully serialized.
//!
//! # Core Concepts
//!
//! - **State / Event**: opaque comparable identifiers via the [`State`] and
//!   [`Event`] traits (or the [`state_enum!`]/[`event_enum!`] macros)
//! - **Guards**: predicates over `(context, input)` that admit or halt a hop
//! - **Context**: the domain payload carried and possibly replaced across
//!   transitions
//! - **Factory**: union-merge of transition sets contributed by independent
//!   modules for shared states
//!
//! # Example
//!
//! ```rust
//! use waypoint::builder::{MachineBuilder, StateDefinitionBuilder, TransitionBuilder};
//! use waypoint::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum RunState {
//!         Created,
//!         Built,
//!         Running,
//!     }
//! }
//!
//! event_enum! {
//!     enum RunEvent {
//!         Build,
//!         Run,
//!     }
//! }
//!
//! let machine = MachineBuilder::<RunState, RunEvent, u32, u32>::new()
//!     .initial(RunState::Created)
//!     .context(0)
//!     .state(
//!         StateDefinitionBuilder::new()
//!             .state(RunState::Created)
//!             .transition(TransitionBuilder::new().event(RunEvent::Build).to(RunState::Built))
//!             .unwrap()
//!             .build()
//!             .unwrap(),
//!     )
//!     .state(
//!         StateDefinitionBuilder::new()
//!             .state(RunState::Built)
//!             .transition(TransitionBuilder::new().event(RunEvent::Run).to(RunState::Running))
//!             .unwrap()
//!             .build()
//!             .unwrap(),
//!     )
//!     .state(StateDefinitionBuilder::new().state(RunState::Running).build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! // Two hops away; the machine finds and walks the path.
//! let report = machine.go_to(&RunState::Running, &42).unwrap();
//! assert!(report.reached_target);
//! assert_eq!(machine.current_state().unwrap(), RunState::Running);
//! ```

pub mod builder;
pub mod core;
pub mod factory;
pub mod graph;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder, StateDefinitionBuilder, TransitionBuilder};
pub use crate::core::{Event, Guard, MachineContext, State, TransitionJournal, TransitionRecord};
pub use crate::factory::MachineFactory;
pub use crate::graph::{StateDefinition, Transition};
pub use crate::machine::{Machine, MachineError, TransitionReport};
