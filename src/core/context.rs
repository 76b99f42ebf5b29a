//! Context holder for the domain payload carried across transitions.

/// Holder for the optional domain value owned by exactly one machine.
///
/// Transitions read the current value and may return a replacement; the
/// machine applies the replacement after the hop's entry action has run.
/// The holder itself is never shared between machines.
///
/// # Example
///
/// ```rust
/// use waypoint::core::MachineContext;
///
/// let mut context = MachineContext::new(Some(3u32));
/// assert_eq!(context.value(), Some(&3));
///
/// let previous = context.replace(4);
/// assert_eq!(previous, Some(3));
/// assert_eq!(context.value(), Some(&4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MachineContext<C> {
    value: Option<C>,
}

impl<C> MachineContext<C> {
    /// Create a holder around an optional initial value.
    pub fn new(value: Option<C>) -> Self {
        Self { value }
    }

    /// Create an empty holder.
    pub fn empty() -> Self {
        Self { value: None }
    }

    /// Borrow the held value, if any.
    pub fn value(&self) -> Option<&C> {
        self.value.as_ref()
    }

    /// Replace the held value, returning the previous one.
    pub fn replace(&mut self, value: C) -> Option<C> {
        self.value.replace(value)
    }

    /// Take the held value out, leaving the holder empty.
    pub fn take(&mut self) -> Option<C> {
        self.value.take()
    }

    /// Clone the held value out of the holder.
    pub fn cloned(&self) -> Option<C>
    where
        C: Clone,
    {
        self.value.clone()
    }
}
