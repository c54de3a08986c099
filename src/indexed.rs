//! Indexed flag storage: the flag lives in a shared arena slot.
//!
//! Both strategies here are zero-sized — the wrapper spends no bytes on
//! its flag. They differ only in how the arena is named:
//!
//! - [`StaticStorage<A>`] binds a process-wide arena into the type via
//!   [`ArenaRef`]; calls carry only a [`SlotIndex`].
//! - [`DynamicStorage`] takes `(&SharedArena, SlotIndex)` on every call;
//!   nothing about the arena appears in the type.
//!
//! The dynamic variant trades a fatter call signature for flexibility
//! (any number of arenas, non-`'static` lifetimes) and adds one hazard:
//! the caller must pass the *same* arena consistently. Passing a
//! different arena silently addresses a different slot — there is nothing
//! the strategy can check.

use std::marker::PhantomData;

use crate::arena::{ArenaRef, SharedArena, SlotIndex};
use crate::state::FlagState;
use crate::storage::{FlagQuery, FlagStorage};

/// Flag storage addressing a slot of a process-wide arena named by `A`.
///
/// Zero-sized: the arena binding lives in the type, the slot index in the
/// call context. Two wrappers over the same arena at different indices
/// are fully independent.
///
/// # Example
///
/// ```rust
/// use std::sync::LazyLock;
/// use dirtyflag::{ArenaRef, DirtyFlag, FlagState, SharedArena, StaticStorage};
///
/// static FLAGS: LazyLock<SharedArena> = LazyLock::new(|| SharedArena::new(8));
///
/// struct Flags;
/// impl ArenaRef for Flags {
///     fn arena() -> &'static SharedArena {
///         &FLAGS
///     }
/// }
///
/// let mut tracked = DirtyFlag::from_parts('a', StaticStorage::<Flags>::new(FlagState::Clean, 0));
/// assert!(!tracked.is_dirty(0));
///
/// *tracked.pin(0) = 'q';
/// assert!(tracked.is_dirty(0));
/// assert_eq!(*tracked.get(), 'q');
/// ```
#[derive(Debug)]
pub struct StaticStorage<A: ArenaRef> {
    // fn() -> A keeps the marker zero-sized, covariant, and Send/Sync
    // regardless of A.
    _arena: PhantomData<fn() -> A>,
}

impl<A: ArenaRef> StaticStorage<A> {
    /// Create the storage and write `init` into slot `index` of `A`'s
    /// arena.
    ///
    /// # Panics
    /// Panics if `index` is out of range for the arena.
    #[must_use]
    pub fn new(init: FlagState, index: SlotIndex) -> Self {
        A::arena().store(index, init);

        Self {
            _arena: PhantomData,
        }
    }
}

impl<A: ArenaRef> Clone for StaticStorage<A> {
    fn clone(&self) -> Self {
        Self {
            _arena: PhantomData,
        }
    }
}

impl<A: ArenaRef> Copy for StaticStorage<A> {}

impl<A: ArenaRef> FlagStorage for StaticStorage<A> {
    type Ctx<'a> = SlotIndex;

    #[inline]
    fn mark(&mut self, index: SlotIndex) {
        A::arena().store(index, FlagState::Dirty);
    }

    #[inline]
    fn clear(&mut self, index: SlotIndex) {
        A::arena().store(index, FlagState::Clean);
    }

    #[inline]
    fn debug_check_marked(&self, index: SlotIndex) {
        debug_assert!(self.is_dirty(index), "arena slot {index} lost a mark");
    }
}

impl<A: ArenaRef> FlagQuery for StaticStorage<A> {
    #[inline]
    fn is_dirty(&self, index: SlotIndex) -> bool {
        A::arena().load(index).is_dirty()
    }
}

/// Flag storage addressing a slot of an arena supplied on every call.
///
/// Zero-sized and arena-agnostic. The context is the arena-and-index
/// pair; the strategy never stores the reference, so there is no captured
/// borrow to dangle and one wrapper type works with any arena.
///
/// # Example
///
/// ```rust
/// use dirtyflag::{DirtyFlag, DynamicStorage, FlagState, SharedArena};
///
/// let arena = SharedArena::new(4);
/// let mut tracked = DirtyFlag::from_parts('g', DynamicStorage::new(FlagState::Clean, &arena, 3));
///
/// assert!(!tracked.is_dirty((&arena, 3)));
///
/// *tracked.pin((&arena, 3)) = 't';
/// assert!(tracked.is_dirty((&arena, 3)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicStorage;

impl DynamicStorage {
    /// Create the storage and write `init` into `arena` at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range for `arena`.
    #[must_use]
    pub fn new(init: FlagState, arena: &SharedArena, index: SlotIndex) -> Self {
        arena.store(index, init);
        Self
    }
}

impl FlagStorage for DynamicStorage {
    type Ctx<'a> = (&'a SharedArena, SlotIndex);

    #[inline]
    fn mark(&mut self, (arena, index): (&SharedArena, SlotIndex)) {
        arena.store(index, FlagState::Dirty);
    }

    #[inline]
    fn clear(&mut self, (arena, index): (&SharedArena, SlotIndex)) {
        arena.store(index, FlagState::Clean);
    }

    #[inline]
    fn debug_check_marked(&self, ctx: (&SharedArena, SlotIndex)) {
        debug_assert!(self.is_dirty(ctx), "arena slot {} lost a mark", ctx.1);
    }
}

impl FlagQuery for DynamicStorage {
    #[inline]
    fn is_dirty(&self, (arena, index): (&SharedArena, SlotIndex)) -> bool {
        arena.load(index).is_dirty()
    }
}
