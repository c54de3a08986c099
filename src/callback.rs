//! Callback flag storage: no stored state, marking fires a side effect.
//!
//! [`CallbackStorage`] holds only the callback. There is no flag field
//! anywhere, which is exactly why it does **not** implement
//! [`FlagQuery`](crate::FlagQuery): no honest answer to `is_dirty` exists.
//! Any design that tries to reconstruct the flag from call history is
//! incorrect — pick this strategy only when liveness of the query is not
//! needed (change notification, logging, cache invalidation triggers).
//!
//! Asking a callback-backed wrapper whether it is dirty is a compile
//! error, which is the intended failure mode:
//!
//! ```rust,compile_fail
//! use dirtyflag::{CallbackStorage, DirtyFlag, FlagState};
//!
//! let flag = DirtyFlag::flag_only(CallbackStorage::new(FlagState::Clean, || {}));
//! // CallbackStorage does not implement FlagQuery:
//! let _ = flag.is_dirty(());
//! ```

use crate::state::FlagState;
use crate::storage::FlagStorage;
use crate::tracing_helpers::trace_log;

/// Flag storage that invokes a callback on every mark.
///
/// The callback is `FnMut`, so it may carry state of its own (a counter,
/// a channel sender, a redraw queue handle). With a non-capturing closure
/// or fn item the storage is zero-sized.
///
/// # Construction semantics
///
/// Constructing with [`FlagState::Dirty`] fires the callback exactly once:
/// the construction itself is the first observable "this is dirty" event.
/// Constructing with [`FlagState::Clean`] fires nothing.
///
/// # Example
///
/// ```rust
/// use dirtyflag::{CallbackStorage, FlagState, FlagStorage};
///
/// let mut fired = 0u32;
/// {
///     let mut s = CallbackStorage::new(FlagState::Clean, || fired += 1);
///     s.mark(());
///     s.mark(());
///     s.clear(()); // no effect, and no callback
/// }
/// assert_eq!(fired, 2);
/// ```
#[derive(Debug, Clone)]
pub struct CallbackStorage<F: FnMut()> {
    on_mark: F,
}

impl<F: FnMut()> CallbackStorage<F> {
    /// Create a callback storage.
    ///
    /// Fires `on_mark` once if `init` is [`FlagState::Dirty`].
    pub fn new(init: FlagState, mut on_mark: F) -> Self {
        if init.is_dirty() {
            on_mark();
        }

        Self { on_mark }
    }
}

impl<F: FnMut()> FlagStorage for CallbackStorage<F> {
    type Ctx<'a> = ();

    #[inline]
    fn mark(&mut self, (): ()) {
        trace_log!("callback: mark");
        (self.on_mark)();
    }

    /// No flag exists, so there is nothing to transition. Kept as the
    /// required no-op so the storage satisfies the full `{mark, clear}`
    /// capability set.
    #[inline]
    fn clear(&mut self, (): ()) {
        trace_log!("callback: clear (no-op)");
    }

    // debug_check_marked stays the default no-op: there is no state to
    // re-read after a mark.
}
