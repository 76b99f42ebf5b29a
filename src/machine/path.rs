//! Depth-first path search over the transition graph.

use crate::core::{Event, State};
use crate::graph::StateDefinition;
use std::collections::{HashMap, HashSet};

/// Find a path of states from `from` to `to`, inclusive of both ends.
///
/// Depth-first search with a visited set and backtracking; returns the
/// first discovered path, which depends on transition registration order.
/// There is no shortest-path guarantee. Returns an empty vector when no
/// path exists, and the one-element path when `from == to`.
pub(crate) fn find_path<S: State, E: Event, C, I>(
    states: &HashMap<S, StateDefinition<S, E, C, I>>,
    from: &S,
    to: &S,
) -> Vec<S> {
    let mut visited = HashSet::new();
    let mut path = Vec::new();
    if walk(states, from, to, &mut visited, &mut path) {
        path
    } else {
        Vec::new()
    }
}

fn walk<S: State, E: Event, C, I>(
    states: &HashMap<S, StateDefinition<S, E, C, I>>,
    current: &S,
    target: &S,
    visited: &mut HashSet<S>,
    path: &mut Vec<S>,
) -> bool {
    visited.insert(current.clone());
    path.push(current.clone());

    if current == target {
        return true;
    }

    if let Some(definition) = states.get(current) {
        for transition in definition.transitions() {
            if visited.contains(transition.target()) {
                continue;
            }
            if walk(states, transition.target(), target, visited, path) {
                return true;
            }
        }
    }

    path.pop();
    false
}
