// libndeftag/src/types.rs

//! Newtypes for tag identifiers, keys and blocks.

use crate::constants::{BLOCK_SIZE, BLOCKS_PER_SECTOR};
use crate::Error;
use derive_more::{Display, From};
use std::convert::TryFrom;

/// Tag UID returned by anticollision. Only valid for the session it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uid(Vec<u8>);

impl Uid {
    /// Copy a UID from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Raw UID bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex, no separators
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

/// ATQA reported by the request command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{:#06x}", _0)]
pub struct TagType(u16);

impl TagType {
    /// ATQA of a MIFARE Classic 1K
    pub const MIFARE_CLASSIC_1K: Self = Self(0x0004);

    /// Wrap a raw ATQA
    pub const fn new(atqa: u16) -> Self {
        Self(atqa)
    }

    /// Raw ATQA value
    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

/// Six byte sector key. One key is shared by all sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectorKey([u8; 6]);

impl SectorKey {
    /// Factory key `FF FF FF FF FF FF`
    pub const DEFAULT: Self = Self(crate::constants::DEFAULT_KEY);

    /// Wrap six key bytes
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Parse a key written as hex text, e.g. `"FF FF FF FF FF FF"`.
    pub fn from_hex(text: &str) -> Result<Self, Error> {
        let bytes = crate::utils::parse_hex(text).map_err(Error::InvalidConfig)?;
        Self::try_from(&bytes[..])
    }
}

impl Default for SectorKey {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<&[u8]> for SectorKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 6 {
            return Err(Error::InvalidLength {
                expected: 6,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 6];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// Which of the two trailer keys is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyType {
    /// Key A, stored in the first six trailer bytes
    A,
    /// Key B, stored in the last six trailer bytes
    #[default]
    B,
}

impl KeyType {
    /// MIFARE authentication command code for this key
    pub fn command_code(&self) -> u8 {
        match self {
            KeyType::A => 0x60,
            KeyType::B => 0x61,
        }
    }
}

/// Linear block index on the tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[display(fmt = "{}", _0)]
pub struct BlockAddress(u8);

/// Data blocks carry payload, trailers carry keys and access bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Carries payload bytes
    Data,
    /// Holds the sector keys and access bits
    Trailer,
}

impl BlockAddress {
    /// Address of block `index`
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Linear block index
    pub fn index(&self) -> u8 {
        self.0
    }

    /// Sector holding this block
    pub fn sector(&self) -> u8 {
        self.0 / BLOCKS_PER_SECTOR
    }

    /// Data or trailer, by position in the sector
    pub fn kind(&self) -> BlockKind {
        if self.0 % BLOCKS_PER_SECTOR == BLOCKS_PER_SECTOR - 1 {
            BlockKind::Trailer
        } else {
            BlockKind::Data
        }
    }

    /// True for the last block of a sector
    pub fn is_trailer(&self) -> bool {
        self.kind() == BlockKind::Trailer
    }

    /// Sector unlocked when this index is handed to authenticate.
    ///
    /// Data blocks unlock their own sector; a trailer unlocks the sector
    /// that follows it, which is where the walk continues.
    pub fn auth_sector(&self) -> u8 {
        (self.0 / BLOCKS_PER_SECTOR) + u8::from(self.is_trailer())
    }
}

/// BlockData (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockData([u8; BLOCK_SIZE]);

impl BlockData {
    /// Wrap a full block
    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy up to 16 bytes from `chunk`, zero-padding the rest.
    pub fn zero_padded(chunk: &[u8]) -> Self {
        let mut arr = [0u8; BLOCK_SIZE];
        let n = chunk.len().min(BLOCK_SIZE);
        arr[..n].copy_from_slice(&chunk[..n]);
        Self(arr)
    }

    /// Raw block bytes
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// Space separated hex, for logs
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }

    /// Printable ASCII with `.` for anything else
    pub fn to_ascii_safe(&self) -> String {
        self.0
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != BLOCK_SIZE {
            return Err(Error::InvalidLength {
                expected: BLOCK_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; BLOCK_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}
