// libndeftag/src/driver/traits.rs

//! Blocking reader interface.

use std::time::Duration;

use crate::Result;
use crate::types::{BlockAddress, BlockData, KeyType, SectorKey, TagType, Uid};

/// Capability surface of the RF front-end (an MFRC522-class reader).
///
/// Every call blocks until the reader answers. Implementations own the
/// radio exclusively; nothing here is expected to be shared across
/// threads.
pub trait Driver {
    /// REQA: ask for a tag in the field
    fn request(&mut self) -> Result<TagType>;

    /// Resolve collisions and return the UID of one tag
    fn anticollision(&mut self) -> Result<Uid>;

    /// Select the tag with `uid`
    fn select(&mut self, uid: &Uid) -> Result<()>;

    /// Three-pass authentication using `block` to address the sector
    fn authenticate(
        &mut self,
        key_type: KeyType,
        block: BlockAddress,
        key: &SectorKey,
        uid: &Uid,
    ) -> Result<()>;

    /// Read one 16-byte block
    fn read_block(&mut self, address: BlockAddress) -> Result<BlockData>;

    /// Write one 16-byte block
    fn write_block(&mut self, address: BlockAddress, data: &BlockData) -> Result<()>;

    /// Drop the Crypto1 state. Must be safe to call in any state.
    fn halt_crypto(&mut self);

    /// Wait for the card-presence interrupt. Returns false on timeout.
    fn presence_irq_wait(&mut self, timeout: Duration) -> bool;

    /// Acknowledge a pending presence interrupt
    fn presence_irq_clear(&mut self);

    /// Soft-reset the reader and restore its register defaults
    fn reinitialize(&mut self) -> Result<()>;

    /// Forget any cached authentication on the reader side
    fn deauthenticate(&mut self) -> Result<()>;

    /// Release the underlying bus and interrupt line
    fn cleanup(&mut self) -> Result<()>;
}
