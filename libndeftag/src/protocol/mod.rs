// libndeftag/src/protocol/mod.rs

//! On-tag layout: block addressing and the NDEF frame envelope.

pub mod addressing;
pub mod frame;

pub use addressing::{BlockWalk, Step, classify, data_capacity, sectors_between};
pub use frame::{NdefFrame, build_frame, extract_payload};
