// libndeftag/src/config.rs

//! Reader configuration.
//!
//! Everything here has a sensible default for a factory-keyed 1K tag; the
//! embedding application only overrides what its deployment changed.

use std::time::Duration;

use crate::constants::{
    BLOCKS_PER_SECTOR, CLASSIC_1K_BLOCKS, DEFAULT_BLOCK_LIMIT, DEFAULT_FIRST_DATA_BLOCK,
    DEFAULT_URI_PREFIX,
};
use crate::types::{KeyType, SectorKey};
use crate::utils::{default_presence_timeout, default_removal_cooldown};
use crate::{Error, Result};

/// Settings shared by every read, write and presence probe.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderConfig {
    /// Shared key presented for every sector
    pub key: SectorKey,
    /// Which trailer key `key` is
    pub key_type: KeyType,
    /// Block holding the frame header
    pub first_data_block: u8,
    /// Exclusive upper bound of the block scan
    pub block_limit: u8,
    /// Single presence IRQ wait
    pub presence_timeout: Duration,
    /// Pause after the tag leaves the field
    pub removal_cooldown: Duration,
    /// Allowed prefixes for the primary URI. Empty accepts any URI.
    pub uri_prefixes: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            key: SectorKey::DEFAULT,
            key_type: KeyType::B,
            first_data_block: DEFAULT_FIRST_DATA_BLOCK,
            block_limit: DEFAULT_BLOCK_LIMIT,
            presence_timeout: default_presence_timeout(),
            removal_cooldown: default_removal_cooldown(),
            uri_prefixes: vec![DEFAULT_URI_PREFIX.to_string()],
        }
    }
}

impl ReaderConfig {
    /// Check the block range against the 1K layout.
    pub fn validate(&self) -> Result<()> {
        if self.first_data_block < BLOCKS_PER_SECTOR {
            return Err(Error::InvalidConfig(format!(
                "block {} lies in the manufacturer sector",
                self.first_data_block
            )));
        }
        if self.first_data_block % BLOCKS_PER_SECTOR == BLOCKS_PER_SECTOR - 1 {
            return Err(Error::InvalidConfig(format!(
                "first data block {} is a sector trailer",
                self.first_data_block
            )));
        }
        if self.first_data_block >= self.block_limit {
            return Err(Error::InvalidConfig(format!(
                "first data block {} not below block limit {}",
                self.first_data_block, self.block_limit
            )));
        }
        if self.block_limit > CLASSIC_1K_BLOCKS {
            return Err(Error::InvalidConfig(format!(
                "block limit {} exceeds a 1K tag",
                self.block_limit
            )));
        }
        Ok(())
    }
}
