//! # `dirtyflag`
//!
//! A change-tracking value wrapper with compile-time pluggable flag
//! storage.
//!
//! [`DirtyFlag<T, S>`] pairs a payload with a two-valued flag recording
//! whether the payload has been mutated since the flag was last cleared.
//! Read access ([`get`](DirtyFlag::get)) never marks; mutable access
//! ([`pin`](DirtyFlag::pin)) always marks. The physical representation of
//! the flag is a storage strategy chosen per wrapper type at compile
//! time — dispatch is fully static, with no trait objects and no runtime
//! strategy selection.
//!
//! ## Storage strategies
//!
//! | Strategy | Flag lives in | Per-call context | Queryable |
//! |----------|---------------|------------------|-----------|
//! | [`InlineStorage`] | a field beside the payload | none | yes |
//! | [`CallbackStorage`] | nowhere; marking fires a callback | none | **no** (compile error) |
//! | [`StaticStorage<A>`] | a slot of a process-wide [`SharedArena`] | slot index | yes |
//! | [`DynamicStorage`] | a slot of a caller-supplied [`SharedArena`] | arena + slot index | yes |
//! | [`TaggedPtrStorage`] | bit 0 of an owned pointer | none | yes |
//!
//! The indexed strategies and the tagged pointer spend zero bytes per
//! wrapper on the flag. The callback strategy spends zero bytes and
//! stores nothing at all, which is why querying it does not compile.
//!
//! ## Example
//!
//! ```rust
//! use dirtyflag::{DirtyFlag, FlagState};
//!
//! let mut tracked = DirtyFlag::new('b', FlagState::Clean);
//! assert!(!tracked.is_dirty(()));
//!
//! *tracked.pin(()) = 'f';
//!
//! assert!(tracked.is_dirty(()));
//! assert_eq!(*tracked.get(), 'f');
//! ```
//!
//! ## Thread safety
//!
//! Each wrapper is a single-owner, single-threaded value; the crate
//! provides no internal synchronization. [`SharedArena`] uses relaxed
//! atomics only so it can live in a `static` — coordinating concurrent
//! access to a shared arena is entirely the caller's responsibility.
//!
//! ## Errors
//!
//! Every operation is infallible once it compiles. Contract violations
//! surface as compile errors (a storage missing a capability, a payload
//! whose alignment cannot spare a pointer bit) or as debug assertions
//! (a storage that fails to observe its own mark).

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod arena;
pub mod callback;
pub mod flag;
pub mod indexed;
pub mod inline;
pub mod state;
pub mod storage;
pub mod tagged;

mod tracing_helpers;

// Re-export main types for convenience
pub use arena::{ArenaRef, SharedArena, SlotIndex};
pub use callback::CallbackStorage;
pub use flag::{DirtyFlag, NoPayload};
pub use indexed::{DynamicStorage, StaticStorage};
pub use inline::InlineStorage;
pub use state::FlagState;
pub use storage::{FlagQuery, FlagStorage};
pub use tagged::TaggedPtrStorage;
