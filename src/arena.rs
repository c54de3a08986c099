//! Shared flag arenas for the indexed storage strategies.
//!
//! A [`SharedArena`] is a fixed-capacity slab of flag slots addressed by
//! [`SlotIndex`]. Many tracked values share one arena, each owning a slot,
//! so a wrapper spends zero bytes on its flag. The arena is always owned
//! by the caller — a strategy never stores a reference to it, which is
//! what keeps the strategies zero-sized and dangling-proof.
//!
//! # Slot representation
//!
//! Slots are `AtomicU8` accessed with `Relaxed` ordering. The atomics
//! exist so an arena can live in a `static` (the process-wide variant
//! used by [`StaticStorage`](crate::StaticStorage)); they do **not**
//! provide coordination. Concurrent use of one arena is the caller's
//! problem to synchronize, by design.
//!
//! # Index discipline
//!
//! Index validity is the caller's duty: the arena must outlive every
//! wrapper addressing it, and indices in use must stay in range. An
//! out-of-range index panics — it is a logic bug, not an environmental
//! condition.
//!
//! # Example
//!
//! ```rust
//! use dirtyflag::{FlagState, SharedArena};
//!
//! let arena = SharedArena::new(4);
//! arena.store(2, FlagState::Dirty);
//!
//! assert!(arena.load(2).is_dirty());
//! assert!(!arena.load(0).is_dirty());
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

use crate::state::FlagState;
use crate::tracing_helpers::trace_log;

/// Index of a flag slot within a [`SharedArena`].
pub type SlotIndex = usize;

/// A caller-owned slab of flag slots.
///
/// Construction fixes the capacity; the slab never grows or shrinks, so
/// an index handed out once stays valid for the arena's whole lifetime.
#[derive(Debug)]
pub struct SharedArena {
    slots: Box<[AtomicU8]>,
}

impl SharedArena {
    /// Create an arena with `capacity` slots, all `Clean`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || AtomicU8::new(FlagState::Clean.as_u8()));

        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    /// Number of slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena has no slots at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Write `state` into the slot at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn store(&self, index: SlotIndex, state: FlagState) {
        trace_log!(index, ?state, "arena: store");
        self.slots[index].store(state.as_u8(), Ordering::Relaxed);
    }

    /// Read the slot at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline]
    #[must_use]
    pub fn load(&self, index: SlotIndex) -> FlagState {
        FlagState::from_u8(self.slots[index].load(Ordering::Relaxed))
    }
}

/// Type-level name for a process-wide [`SharedArena`].
///
/// [`StaticStorage`](crate::StaticStorage) is generic over an `ArenaRef`
/// so the arena binding is part of the wrapper's type and only the slot
/// index travels per call. The usual backing is a `static` `LazyLock`:
///
/// ```rust
/// use std::sync::LazyLock;
/// use dirtyflag::{ArenaRef, SharedArena};
///
/// static FLAGS: LazyLock<SharedArena> = LazyLock::new(|| SharedArena::new(16));
///
/// struct Flags;
///
/// impl ArenaRef for Flags {
///     fn arena() -> &'static SharedArena {
///         &FLAGS
///     }
/// }
///
/// assert_eq!(Flags::arena().len(), 16);
/// ```
pub trait ArenaRef: 'static {
    /// The arena this name resolves to. Must return the same arena on
    /// every call.
    fn arena() -> &'static SharedArena;
}
