// libndeftag/src/constants.rs
//! Common tag layout and frame constants used across the crate

/// NDEF frame magic: two NULL TLVs followed by the NDEF message TLV tag
pub const NDEF_MAGIC: [u8; 3] = [0x00, 0x00, 0x03];

/// TLV terminator written after the payload
pub const NDEF_TERMINATOR: u8 = 0xFE;

/// Bytes in front of the payload: magic(3) + length(1)
pub const NDEF_HEADER_LEN: usize = 4;

/// Largest payload expressible with a single length byte
pub const NDEF_MAX_PAYLOAD_LEN: usize = 255;

/// Bytes per MIFARE Classic block
pub const BLOCK_SIZE: usize = 16;

/// Blocks per sector (the last one is the trailer)
pub const BLOCKS_PER_SECTOR: u8 = 4;

/// Total blocks on a 1K tag
pub const CLASSIC_1K_BLOCKS: u8 = 64;

/// First block after the manufacturer/MAD sector
pub const DEFAULT_FIRST_DATA_BLOCK: u8 = 4;

/// Exclusive upper bound of the scan. Block 63 is the last trailer.
pub const DEFAULT_BLOCK_LIMIT: u8 = 63;

/// Factory transport key shared by every sector
pub const DEFAULT_KEY: [u8; 6] = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];

/// Default allow-listed URI prefix for record 0
pub const DEFAULT_URI_PREFIX: &str = "https://open.spotify.com";
// libndeftag/src/constants.rs
