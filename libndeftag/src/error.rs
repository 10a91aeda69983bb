// libndeftag/src/error.rs

//! Error types.

use thiserror::Error;

/// Frame-level protocol errors raised while wrapping or unwrapping the
/// on-tag NDEF envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// First data block does not start with `00 00 03`
    #[error("bad frame magic: expected 00 00 03, got {found:02x?}")]
    BadMagic {
        /// Leading bytes actually read
        found: [u8; 3],
    },

    /// A zero length byte means the payload needs the 3-byte length form.
    #[error("ndef payload of 256 bytes or more is not supported")]
    Unsupported,

    /// Block bound reached before the declared length was collected
    #[error("could not read all ndef bytes (declared: {declared}, got: {got})")]
    Truncated {
        /// Length byte from the header
        declared: usize,
        /// Payload bytes assembled
        got: usize,
    },

    /// Payload longer than 255 bytes
    #[error("payload of {len} bytes does not fit a one-byte length")]
    TooLarge {
        /// Rejected payload length
        len: usize,
    },

    /// Block source was empty
    #[error("no data block available for the frame header")]
    MissingHeader,
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// Presence probe timed out
    #[error("no tag presence within timeout")]
    PresenceTimeout,

    /// Request, anticollision or select failed
    #[error("no tag selected")]
    NoTagSelected,

    /// Keep-running flag cleared
    #[error("operation cancelled")]
    Cancelled,

    /// Sector authentication rejected
    #[error("authentication failed for sector {sector}")]
    Auth {
        /// Sector the authentication was meant to unlock
        sector: u8,
    },

    /// NDEF envelope error
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Driver failed a data block read
    #[error("failed to read block {address}")]
    BlockRead {
        /// Block index
        address: u8,
    },

    /// Driver failed a data block write
    #[error("failed to write block {address}")]
    BlockWrite {
        /// Block index
        address: u8,
    },

    /// Frame does not fit the configured block range
    #[error("tag capacity exceeded: need {needed} bytes, {available} available")]
    TagCapacity {
        /// Frame length
        needed: usize,
        /// Bytes in the data blocks of the range
        available: usize,
    },

    /// First record is not an accepted URI
    #[error("unsupported record: {0}")]
    UnsupportedRecord(String),

    /// Record codec could not decode or encode the message
    #[error("record codec error: {0}")]
    Record(String),

    /// Driver call failed
    #[error("driver error: {0}")]
    Driver(String),

    /// Byte slice of the wrong size
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// Rejected reader configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Routine outcomes of the presence/select handshake. The worker loop
    /// retries these without reporting a failure.
    pub fn is_routine(&self) -> bool {
        matches!(self, Error::PresenceTimeout | Error::NoTagSelected)
    }

    /// Errors that by themselves mark the reader state as corrupt.
    ///
    /// The reader rebuilds the driver after every failure past the
    /// handshake; these are reported with their own recreate reason.
    pub fn requires_recreate(&self) -> bool {
        matches!(
            self,
            Error::Auth { .. } | Error::Frame(FrameError::Truncated { .. })
        )
    }
}

/// Crate-wide result
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by tag reads.
pub type ReadError = Error;

/// Error returned by tag writes.
pub type WriteError = Error;
