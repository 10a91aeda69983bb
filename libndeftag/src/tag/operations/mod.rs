//! Block-level read and write walks over an open session.

pub mod read;
pub mod write;

pub use read::{SectorBlocks, read_payload};
pub use write::write_frame;
