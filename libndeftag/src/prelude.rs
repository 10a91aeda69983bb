// libndeftag/src/prelude.rs

//! Commonly used items in one import.

pub use crate::config::ReaderConfig;
pub use crate::driver::{Driver, MockDriver};
pub use crate::protocol::{NdefFrame, build_frame, extract_payload};
pub use crate::record::{NdefCodec, Record, RecordCodec, TagMessage, parse_records};
pub use crate::session::{
    Reader, ReaderBuilder, RecreateReason, SessionEvent, SessionState, TagSession,
};
pub use crate::tag::{read_ndef, write_ndef};
pub use crate::worker::{TagHandler, Worker};
pub use crate::{
    BlockAddress, BlockData, BlockKind, Error, FrameError, KeyType, Result, SectorKey, TagType,
    Uid,
};

pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms, parse_hex};
