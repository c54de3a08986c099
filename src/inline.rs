//! Inline flag storage: one dedicated field next to the payload.
//!
//! The simplest strategy. Costs one flag-sized field (plus padding) per
//! tracked value, needs no per-call context, and has no hazards.

use crate::state::FlagState;
use crate::storage::{FlagQuery, FlagStorage};
use crate::tracing_helpers::trace_log;

/// Flag storage backed by a private [`FlagState`] field.
///
/// This is the default strategy of [`DirtyFlag`](crate::DirtyFlag).
///
/// # Example
///
/// ```rust
/// use dirtyflag::{FlagQuery, FlagState, FlagStorage, InlineStorage};
///
/// let mut s = InlineStorage::new(FlagState::Clean);
/// assert!(!s.is_dirty(()));
///
/// s.mark(());
/// assert!(s.is_dirty(()));
///
/// s.clear(());
/// assert!(!s.is_dirty(()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InlineStorage {
    state: FlagState,
}

impl InlineStorage {
    /// Create an inline storage holding `init`.
    #[inline]
    #[must_use]
    pub const fn new(init: FlagState) -> Self {
        Self { state: init }
    }
}

impl FlagStorage for InlineStorage {
    type Ctx<'a> = ();

    #[inline]
    fn mark(&mut self, (): ()) {
        trace_log!("inline: mark");
        self.state = FlagState::Dirty;
    }

    #[inline]
    fn clear(&mut self, (): ()) {
        trace_log!("inline: clear");
        self.state = FlagState::Clean;
    }

    #[inline]
    fn debug_check_marked(&self, ctx: ()) {
        debug_assert!(self.is_dirty(ctx), "inline storage lost a mark");
    }
}

impl FlagQuery for InlineStorage {
    #[inline]
    fn is_dirty(&self, (): ()) -> bool {
        self.state.is_dirty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_reported() {
        assert!(!InlineStorage::new(FlagState::Clean).is_dirty(()));
        assert!(InlineStorage::new(FlagState::Dirty).is_dirty(()));
    }

    #[test]
    fn mark_then_clear() {
        let mut s = InlineStorage::new(FlagState::Clean);

        s.mark(());
        assert!(s.is_dirty(()));
        assert_eq!(s.state(()), FlagState::Dirty);

        s.clear(());
        assert!(!s.is_dirty(()));
        assert_eq!(s.state(()), FlagState::Clean);
    }

    #[test]
    fn transitions_are_idempotent() {
        let mut s = InlineStorage::new(FlagState::Dirty);

        s.mark(());
        s.mark(());
        assert!(s.is_dirty(()));

        s.clear(());
        s.clear(());
        assert!(!s.is_dirty(()));
    }

    #[test]
    fn default_is_clean() {
        assert!(!InlineStorage::default().is_dirty(()));
    }

    #[test]
    fn copies_are_independent() {
        let mut a = InlineStorage::new(FlagState::Clean);
        let b = a; // Copy

        a.mark(());
        assert!(a.is_dirty(()));
        assert!(!b.is_dirty(()));
    }
}
