//! The two-valued flag state.
//!
//! [`FlagState`] is the logical state every storage strategy represents,
//! however it chooses to encode it physically: a field, an arena slot, a
//! stolen pointer bit, or (for the callback strategy) nothing at all.
//!
//! There is no third state. A flag is either `Clean` or `Dirty`.

/// Logical state of a dirty flag.
///
/// `#[repr(u8)]` with `Clean = 0` / `Dirty = 1` so the state round-trips
/// through the byte-sized arena slots and the tagged-pointer bit without
/// translation tables.
///
/// # Example
///
/// ```rust
/// use dirtyflag::FlagState;
///
/// assert!(!FlagState::Clean.is_dirty());
/// assert!(FlagState::Dirty.is_dirty());
/// assert_eq!(FlagState::default(), FlagState::Clean);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FlagState {
    /// The value has not been mutated since the flag was last cleared.
    Clean = 0,
    /// The value has been mutated (or force-marked) since the last clear.
    Dirty = 1,
}

impl FlagState {
    /// Check whether this state is [`FlagState::Dirty`].
    #[inline]
    #[must_use]
    pub const fn is_dirty(self) -> bool {
        matches!(self, Self::Dirty)
    }

    /// Raw byte encoding, as stored in arena slots.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a raw byte. Any nonzero byte is `Dirty`.
    #[inline]
    #[must_use]
    pub const fn from_u8(raw: u8) -> Self {
        if raw == 0 { Self::Clean } else { Self::Dirty }
    }
}

impl Default for FlagState {
    /// The uniform default is `Clean`.
    fn default() -> Self {
        Self::Clean
    }
}

impl From<bool> for FlagState {
    #[inline]
    fn from(dirty: bool) -> Self {
        if dirty { Self::Dirty } else { Self::Clean }
    }
}

impl From<FlagState> for bool {
    #[inline]
    fn from(state: FlagState) -> Self {
        state.is_dirty()
    }
}
