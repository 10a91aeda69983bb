// libndeftag/src/session/state.rs

/// Lifecycle of one tag presence event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Waiting for a tag, driver freshly (re)initialized
    #[default]
    Idle,
    /// Presence detected, handshake not yet done
    Requested,
    /// Anticollision and select succeeded
    Selected,
    /// Sector unlocked by the last authentication
    Authenticated(u8),
    /// Crypto halted after a read or write
    Closed,
}

/// Why the driver handle was torn down and rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecreateReason {
    /// Tag ran out of blocks before the declared length
    Truncated,
    /// A sector refused the key
    AuthFailure,
    /// Any other failure after the tag was selected
    OperationFailure,
    /// Worker loop started another cycle
    LoopReentry,
    /// Requested by the application
    Manual,
}

/// Side-channel notifications emitted by the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The driver was released and brought up again
    Recreated {
        /// What triggered the rebuild
        reason: RecreateReason,
    },
}
