//! Two-state lazy cache cell.

/// A value that is either not yet computed or computed exactly once.
///
/// Replaces the ambient nullable field pattern for lazily simulated
/// curves: the only transitions are `Unset → Computed` (first access or
/// explicit override) and `Computed → Computed` (override). There is no
/// automatic invalidation.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cached<T> {
    /// Not yet computed.
    #[default]
    Unset,
    /// Computed and reusable for the owner's lifetime.
    Computed(T),
}

impl<T> Cached<T> {
    /// Returns whether the value has been computed.
    #[inline]
    pub fn is_computed(&self) -> bool {
        matches!(self, Cached::Computed(_))
    }

    /// Stores `value`, replacing any previous state unconditionally.
    #[inline]
    pub fn set(&mut self, value: T) {
        *self = Cached::Computed(value);
    }

    /// Returns the computed value, if any.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self {
            Cached::Computed(value) => Some(value),
            Cached::Unset => None,
        }
    }

    /// Returns the computed value, computing and storing it on first access.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<&T, E> {
        if let Cached::Unset = self {
            *self = Cached::Computed(compute()?);
        }
        match self {
            Cached::Computed(value) => Ok(value),
            // Just written above.
            Cached::Unset => unreachable!(),
        }
    }
}
