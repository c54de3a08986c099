//! Tagged-pointer flag storage: the flag is bit 0 of an owned pointer.
//!
//! [`TaggedPtrStorage`] owns a heap-allocated payload and steals the
//! pointer's lowest bit for the dirty flag. The theft is legal because
//! any valid address of a `T` with `align_of::<T>() >= 2` has a zero low
//! bit; storages over 1-byte-aligned payloads are rejected at compile
//! time. Net overhead of the flag: zero bytes.
//!
//! All tagging goes through the strict-provenance APIs (`map_addr`,
//! `addr`), so the untagged pointer keeps valid provenance for
//! dereferencing and for the final deallocation.
//!
//! This strategy is the one place the crate touches `unsafe`. Callers who
//! do not need the zero-byte property should prefer the safe substitute:
//! a [`DirtyFlag<Box<T>, InlineStorage>`](crate::DirtyFlag) spends one
//! flag byte (plus padding) and contains no unsafe code at all.
//!
//! Unlike the arena strategies, this storage owns its payload, so it
//! exposes [`get`](TaggedPtrStorage::get) and [`pin`](TaggedPtrStorage::pin)
//! itself — the same access discipline the wrapper enforces, collapsed
//! into one word-sized value.

use std::fmt;

use crate::state::FlagState;
use crate::storage::{FlagQuery, FlagStorage};
use crate::tracing_helpers::trace_log;

/// Flag bit stolen from the pointer. Bit 0 is free for any payload with
/// alignment >= 2.
const FLAG_BIT: usize = 1;

/// An owned heap payload whose pointer doubles as the dirty flag.
///
/// `size_of::<TaggedPtrStorage<T>>() == size_of::<*mut T>()`: the flag
/// costs nothing. The payload is freed on drop through the untagged
/// address, so the flag's value never corrupts deallocation.
///
/// Not `Clone`: the pointee is uniquely owned.
///
/// # Example
///
/// ```rust
/// use dirtyflag::{FlagQuery, FlagState, TaggedPtrStorage};
///
/// let mut p = TaggedPtrStorage::new(FlagState::Clean, Box::new(5_i32));
/// assert!(!p.is_dirty(()));
/// assert_eq!(*p.get(), 5);
///
/// *p.pin() = 3;
/// assert!(p.is_dirty(()));
/// assert_eq!(*p.get(), 3);
/// ```
///
/// A payload with alignment 1 has no free bit and is rejected when the
/// constructor is instantiated:
///
/// ```rust,compile_fail
/// use dirtyflag::{FlagState, TaggedPtrStorage};
///
/// let p = TaggedPtrStorage::new(FlagState::Clean, Box::new(7_u8));
/// ```
pub struct TaggedPtrStorage<T> {
    /// Tagged pointer. INVARIANT: clearing bit 0 always yields the
    /// address `Box::into_raw` produced, with provenance intact.
    ptr: *mut T,
}

impl<T> TaggedPtrStorage<T> {
    /// Take ownership of `value` and establish the initial flag state.
    #[must_use]
    pub fn new(init: FlagState, value: Box<T>) -> Self {
        const {
            assert!(
                std::mem::align_of::<T>() >= 2,
                "TaggedPtrStorage requires align_of::<T>() >= 2; bit 0 is not free otherwise"
            );
        }

        let raw: *mut T = Box::into_raw(value);
        let ptr: *mut T = if init.is_dirty() {
            raw.map_addr(|a| a | FLAG_BIT)
        } else {
            raw
        };

        Self { ptr }
    }

    /// The stored pointer with the flag bit masked out.
    #[inline]
    fn untagged(&self) -> *mut T {
        self.ptr.map_addr(|a| a & !FLAG_BIT)
    }

    /// Read-only access to the payload. Never touches the flag.
    #[inline]
    #[must_use]
    pub fn get(&self) -> &T {
        // SAFETY: untagged() recovers the live Box allocation; &self
        // guarantees no mutable borrow is outstanding.
        unsafe { &*self.untagged() }
    }

    /// Mutable access to the payload; marks the flag first.
    #[inline]
    pub fn pin(&mut self) -> &mut T {
        self.mark(());

        // SAFETY: untagged() recovers the live Box allocation; &mut self
        // guarantees exclusive access.
        unsafe { &mut *self.untagged() }
    }

    /// The payload's address with the flag masked out.
    ///
    /// Stable across `mark`/`clear`: the flag bit is fully orthogonal to
    /// the recoverable address.
    #[inline]
    #[must_use]
    pub fn payload_addr(&self) -> usize {
        self.untagged().addr()
    }

    /// The raw flag bits currently set in the stored address.
    #[inline]
    #[must_use]
    pub fn flag_bits(&self) -> usize {
        self.ptr.addr() & FLAG_BIT
    }
}

impl<T> FlagStorage for TaggedPtrStorage<T> {
    type Ctx<'a> = ();

    #[inline]
    fn mark(&mut self, (): ()) {
        trace_log!("tagged: mark");
        self.ptr = self.ptr.map_addr(|a| a | FLAG_BIT);
    }

    #[inline]
    fn clear(&mut self, (): ()) {
        trace_log!("tagged: clear");
        self.ptr = self.ptr.map_addr(|a| a & !FLAG_BIT);
    }

    #[inline]
    fn debug_check_marked(&self, ctx: ()) {
        debug_assert!(self.is_dirty(ctx), "tagged pointer lost its flag bit");
    }
}

impl<T> FlagQuery for TaggedPtrStorage<T> {
    #[inline]
    fn is_dirty(&self, (): ()) -> bool {
        self.ptr.addr() & FLAG_BIT != 0
    }
}

impl<T> Drop for TaggedPtrStorage<T> {
    fn drop(&mut self) {
        // SAFETY: ptr came from Box::into_raw in new(); the untagged
        // address is the original allocation and is freed exactly once.
        unsafe {
            drop(Box::from_raw(self.untagged()));
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TaggedPtrStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedPtrStorage")
            .field("payload", self.get())
            .field("dirty", &self.is_dirty(()))
            .finish()
    }
}
