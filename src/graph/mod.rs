//! The declarative state graph: nodes and edges.

mod definition;
mod transition;

pub use definition::{StateAction, StateDefinition};
pub use transition::{SideEffect, Transition};
