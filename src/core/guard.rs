//! Guard predicates for controlling transition hops.
//!
//! Guards are boolean functions over the machine's context and the caller's
//! input. A hop whose guard rejects is not taken; the walk halts at the
//! last successfully entered state without raising an error.

use std::sync::Arc;

/// Predicate that decides whether a single transition hop may be taken.
///
/// Guards are evaluated against `(context, input)` before the hop executes.
/// A transition with no guard always passes. Guards must be deterministic
/// for a given context/input pair; they run inside the machine's lock, so
/// they should also be quick.
///
/// # Example
///
/// ```rust
/// use waypoint::core::Guard;
///
/// // Only allow the hop once the build has been tagged.
/// let has_image = Guard::new(|ctx: Option<&String>, _input: &u32| ctx.is_some());
///
/// assert!(has_image.check(Some(&"registry/run:1".to_string()), &0));
/// assert!(!has_image.check(None, &0));
/// ```
pub struct Guard<C, I> {
    predicate: Arc<dyn Fn(Option<&C>, &I) -> bool + Send + Sync>,
}

impl<C, I> Guard<C, I> {
    /// Create a guard from a predicate function.
    ///
    /// The predicate must be thread-safe (`Send + Sync`); it is shared
    /// between clones of the owning transition.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(Option<&C>, &I) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against the current context and input.
    pub fn check(&self, context: Option<&C>, input: &I) -> bool {
        (self.predicate)(context, input)
    }
}

impl<C, I> Clone for Guard<C, I> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}
