//! The tracked-value wrapper.
//!
//! [`DirtyFlag<T, S>`] owns a payload and a flag storage strategy and
//! enforces the access discipline uniformly over any strategy:
//!
//! - [`get`](DirtyFlag::get) takes `&self` and never touches the flag.
//! - [`pin`](DirtyFlag::pin) takes `&mut self`, marks the flag, *then*
//!   hands out the mutable borrow. No `&mut T` escapes without a mark.
//!
//! The borrow checker makes the discipline structural rather than a
//! convention: read access cannot mark (no `&mut` available), and mutable
//! access cannot skip marking (there is no other way to get a `&mut T`
//! out).
//!
//! The wrapper never inspects a strategy's representation. All flag
//! traffic flows through the [`FlagStorage`]/[`FlagQuery`] capability
//! traits, and a strategy missing a capability removes the corresponding
//! wrapper method at compile time: `is_dirty` simply does not exist on a
//! callback-backed wrapper.

use crate::inline::InlineStorage;
use crate::state::FlagState;
use crate::storage::{FlagQuery, FlagStorage};

/// Distinguished empty payload for flag-only wrappers.
///
/// A `DirtyFlag<NoPayload, S>` is a pure change-notification primitive:
/// there is no data, only the flag (or, for the callback strategy, only
/// the side effect). Use [`DirtyFlag::touch`] instead of `pin` to make
/// the intent explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoPayload;

/// A value paired with a dirty flag whose physical representation is
/// chosen at compile time by the storage strategy `S`.
///
/// Reads never mark; mutable access always marks. See the
/// [crate docs](crate) for the strategy catalogue.
///
/// # Example
///
/// ```rust
/// use dirtyflag::{DirtyFlag, FlagState};
///
/// let mut tracked = DirtyFlag::new('b', FlagState::Clean);
/// assert!(!tracked.is_dirty(()));
///
/// *tracked.pin(()) = 'f';
/// assert!(tracked.is_dirty(()));
/// assert_eq!(*tracked.get(), 'f');
///
/// tracked.clear(());
/// assert!(!tracked.is_dirty(()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyFlag<T, S = InlineStorage> {
    payload: T,
    storage: S,
}

impl<T, S: FlagStorage> DirtyFlag<T, S> {
    /// Wire a payload to an already-constructed storage strategy.
    ///
    /// Strategy-specific construction parameters (initial state, slot
    /// index, arena, owned pointer, callback) go to the storage's own
    /// constructor; the wrapper takes the result as-is.
    #[inline]
    pub const fn from_parts(payload: T, storage: S) -> Self {
        Self { payload, storage }
    }

    /// Read-only access to the payload. Never changes the flag.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.payload
    }

    /// Mutable access to the payload. Marks the flag first,
    /// unconditionally.
    ///
    /// After `pin` returns, a queryable storage reports dirty regardless
    /// of the prior state. A debug-build check re-reads the flag and
    /// treats a miss as a broken storage implementation; release builds
    /// skip the check and never silently "fix" anything.
    #[inline]
    pub fn pin(&mut self, ctx: S::Ctx<'_>) -> &mut T {
        self.storage.mark(ctx);
        self.storage.debug_check_marked(ctx);

        &mut self.payload
    }

    /// Force the flag dirty without touching the payload.
    ///
    /// For mutations that happen through an external alias the wrapper
    /// cannot see.
    #[inline]
    pub fn mark(&mut self, ctx: S::Ctx<'_>) {
        self.storage.mark(ctx);
    }

    /// Reset the flag to clean. Idempotent.
    #[inline]
    pub fn clear(&mut self, ctx: S::Ctx<'_>) {
        self.storage.clear(ctx);
    }

    /// Consume the wrapper and take the payload out. The storage drops
    /// (releasing anything it owns); the flag state is discarded.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> T {
        self.payload
    }
}

impl<T, S: FlagQuery> DirtyFlag<T, S> {
    /// Current flag state. Only exists for queryable storages; a
    /// callback-backed wrapper has no such method and asking for it is a
    /// compile error.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self, ctx: S::Ctx<'_>) -> bool {
        self.storage.is_dirty(ctx)
    }
}

impl<T> DirtyFlag<T, InlineStorage> {
    /// Wrap `payload` with the default inline strategy.
    #[inline]
    pub const fn new(payload: T, init: FlagState) -> Self {
        Self::from_parts(payload, InlineStorage::new(init))
    }
}

impl<T: Default> Default for DirtyFlag<T, InlineStorage> {
    /// Default payload, clean flag.
    fn default() -> Self {
        Self::new(T::default(), FlagState::Clean)
    }
}

impl<S: FlagStorage> DirtyFlag<NoPayload, S> {
    /// Build a flag-only wrapper: no payload, just the strategy.
    #[inline]
    pub const fn flag_only(storage: S) -> Self {
        Self::from_parts(NoPayload, storage)
    }

    /// Flag-only `pin`: mark and discard the meaningless payload borrow.
    #[inline]
    pub fn touch(&mut self, ctx: S::Ctx<'_>) {
        let _: &mut NoPayload = self.pin(ctx);
    }
}
