//! Capability contract for flag storage strategies.
//!
//! This module defines the traits a type must satisfy to serve as the flag
//! storage of a [`DirtyFlag`](crate::DirtyFlag). Dispatch is fully static:
//! the wrapper is generic over the storage type, there is no trait object
//! anywhere, and a storage missing a capability is a compile error at the
//! call site rather than a runtime failure.
//!
//! # Capability split
//!
//! - [`FlagStorage`] is the required set: `mark` and `clear`, plus the
//!   per-call context type. Every strategy implements it.
//! - [`FlagQuery`] is the optional query extension: `is_dirty`. The
//!   callback strategy deliberately does not implement it — it stores no
//!   state, so any answer it gave would be a lie. Code that asks a
//!   callback-backed wrapper whether it is dirty does not compile.
//!
//! # Context
//!
//! A strategy's operations are parameterized by zero or more context
//! arguments carried in `Ctx`: nothing (`()`), a slot index, or an arena
//! reference plus index. The context is supplied by the caller on every
//! call and never stored by the strategy, so an indexed strategy stays
//! zero-sized and holds no reference that could dangle.

use crate::state::FlagState;

/// Required capability set for a flag storage strategy.
///
/// Implementors represent a two-valued flag somewhere (or nowhere) and
/// transition it on demand. Both transitions are idempotent: marking a
/// dirty flag or clearing a clean one is observable as a no-op.
///
/// # Contract
///
/// - `mark` leaves the flag `Dirty`; `clear` leaves it `Clean`.
/// - Neither touches any payload; payload ownership is the wrapper's
///   business (or the storage's own, for pointer-owning strategies).
/// - Construction is strategy-specific and must establish the initial
///   representation so that a queryable storage reports the initial state
///   faithfully.
pub trait FlagStorage {
    /// Per-call context: `()`, a [`SlotIndex`](crate::arena::SlotIndex),
    /// or an arena reference plus index.
    ///
    /// `Copy` so the wrapper can thread one context value through a mark
    /// and the debug re-check that follows it.
    type Ctx<'a>: Copy;

    /// Transition the flag to `Dirty`.
    fn mark(&mut self, ctx: Self::Ctx<'_>);

    /// Transition the flag to `Clean`.
    fn clear(&mut self, ctx: Self::Ctx<'_>);

    /// Debug-build consistency hook, run by the wrapper right after `mark`.
    ///
    /// Queryable storages override this with a `debug_assert!` that the
    /// mark took effect; a failure signals a broken storage implementation,
    /// not a wrapper bug. The default is a no-op so that unqueryable
    /// storages (callback) stay checkable-free. Release builds compile the
    /// whole hook out.
    #[inline]
    fn debug_check_marked(&self, _ctx: Self::Ctx<'_>) {}
}

/// Optional query extension: storages whose flag state can be read back.
///
/// Every strategy except the callback one implements this. The split is
/// the point: `is_dirty` on a storage that holds no state cannot be
/// honestly implemented, so it must not exist.
pub trait FlagQuery: FlagStorage {
    /// Report the current flag state.
    fn is_dirty(&self, ctx: Self::Ctx<'_>) -> bool;

    /// The current state as a [`FlagState`].
    #[inline]
    fn state(&self, ctx: Self::Ctx<'_>) -> FlagState {
        FlagState::from(self.is_dirty(ctx))
    }
}
