// libndeftag/src/driver/mock.rs

//! Simulated 1K tag behind the [`Driver`](crate::driver::Driver) trait.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::constants::{BLOCK_SIZE, CLASSIC_1K_BLOCKS, DEFAULT_FIRST_DATA_BLOCK};
use crate::driver::traits::Driver;
use crate::protocol::addressing::data_blocks;
use crate::types::{BlockAddress, BlockData, KeyType, SectorKey, TagType, Uid};
use crate::{Error, Result};

/// Factory trailer: key A, access bits FF 07 80 69, key B
const DEFAULT_TRAILER: [u8; BLOCK_SIZE] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x07, 0x80, 0x69, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF,
];

/// One recorded driver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// `request`
    Request,
    /// `anticollision`
    Anticollision,
    /// `select` with the given UID
    Select(Uid),
    /// `authenticate` addressed through `block`
    Authenticate {
        /// Key presented
        key_type: KeyType,
        /// Block index handed to the driver
        block: u8,
    },
    /// `read_block`
    ReadBlock(u8),
    /// `write_block` with the bytes sent
    WriteBlock(u8, [u8; BLOCK_SIZE]),
    /// `halt_crypto`
    HaltCrypto,
    /// `presence_irq_wait`
    PresenceWait,
    /// `presence_irq_clear`
    PresenceClear,
    /// `reinitialize`
    Reinitialize,
    /// `deauthenticate`
    Deauthenticate,
    /// `cleanup`
    Cleanup,
}

/// Simulated 1K tag plus reader state shared by all clones of a MockDriver.
#[derive(Debug)]
struct SimulatedTag {
    blocks: Vec<[u8; BLOCK_SIZE]>,
    uid: Uid,
    key: SectorKey,
    in_field: bool,
    fail_select: bool,
    fail_auth_at: Option<u8>,
    fail_read_at: Option<u8>,
    fail_write_at: Option<u8>,
    presence: VecDeque<bool>,
    stop_when_drained: Option<Arc<AtomicBool>>,
    calls: Vec<DriverCall>,
    selected: bool,
    authenticated: Option<u8>,
}

impl SimulatedTag {
    fn new() -> Self {
        let blocks = (0..CLASSIC_1K_BLOCKS)
            .map(|i| {
                if BlockAddress::new(i).is_trailer() {
                    DEFAULT_TRAILER
                } else {
                    [0u8; BLOCK_SIZE]
                }
            })
            .collect();
        Self {
            blocks,
            uid: Uid::from_bytes(&[0x04, 0xA2, 0x2B, 0x91]),
            key: SectorKey::DEFAULT,
            in_field: true,
            fail_select: false,
            fail_auth_at: None,
            fail_read_at: None,
            fail_write_at: None,
            presence: VecDeque::new(),
            stop_when_drained: None,
            calls: Vec::new(),
            selected: false,
            authenticated: None,
        }
    }

    fn check_data_access(&self, address: BlockAddress) -> Result<()> {
        if !self.selected {
            return Err(Error::Driver("tag not selected".into()));
        }
        if address.index() == 0 || address.is_trailer() {
            return Err(Error::Driver(format!("block {} is not a data block", address)));
        }
        if self.authenticated != Some(address.sector()) {
            return Err(Error::Driver(format!(
                "sector {} not authenticated",
                address.sector()
            )));
        }
        Ok(())
    }
}

/// Mock driver for tests and demos. It keeps a 64-block tag image in memory,
/// records every call, and rejects data access to sectors that were not
/// authenticated or to trailer blocks.
///
/// Clones share the same tag and call log, so a test can keep one handle
/// while the reader owns another.
#[derive(Debug, Clone)]
pub struct MockDriver {
    inner: Rc<RefCell<SimulatedTag>>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Blank tag in the field, factory keys, default UID
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SimulatedTag::new())),
        }
    }

    /// Answer anticollision with `uid`
    pub fn with_uid(self, uid: &[u8]) -> Self {
        self.inner.borrow_mut().uid = Uid::from_bytes(uid);
        self
    }

    /// Key the tag expects
    pub fn with_key(self, key: SectorKey) -> Self {
        self.inner.borrow_mut().key = key;
        self
    }

    /// Lay `stream` out over the data blocks from block 4 upward, skipping
    /// trailers, exactly as a writer would.
    pub fn seed_stream(&self, stream: &[u8]) {
        let mut tag = self.inner.borrow_mut();
        for (addr, chunk) in data_blocks(DEFAULT_FIRST_DATA_BLOCK, CLASSIC_1K_BLOCKS)
            .zip(stream.chunks(BLOCK_SIZE))
        {
            tag.blocks[addr.index() as usize] = *BlockData::zero_padded(chunk).as_bytes();
        }
    }

    /// Overwrite one block, trailers included
    pub fn set_block(&self, index: u8, data: [u8; BLOCK_SIZE]) {
        self.inner.borrow_mut().blocks[index as usize] = data;
    }

    /// Current content of one block
    pub fn block(&self, index: u8) -> [u8; BLOCK_SIZE] {
        self.inner.borrow().blocks[index as usize]
    }

    /// Whether a tag answers request
    pub fn set_in_field(&self, in_field: bool) {
        self.inner.borrow_mut().in_field = in_field;
    }

    /// Make every select fail
    pub fn set_fail_select(&self, fail: bool) {
        self.inner.borrow_mut().fail_select = fail;
    }

    /// Fail authenticate calls addressed with this block index
    pub fn set_fail_auth_at(&self, block: Option<u8>) {
        self.inner.borrow_mut().fail_auth_at = block;
    }

    /// Fail reads of this block
    pub fn set_fail_read_at(&self, block: Option<u8>) {
        self.inner.borrow_mut().fail_read_at = block;
    }

    /// Fail writes to this block
    pub fn set_fail_write_at(&self, block: Option<u8>) {
        self.inner.borrow_mut().fail_write_at = block;
    }

    /// Queue results for successive presence waits. Once drained every
    /// wait times out.
    pub fn push_presence(&self, results: &[bool]) {
        self.inner.borrow_mut().presence.extend(results.iter().copied());
    }

    /// Clear `flag` on the first presence wait after the script ran dry,
    /// which ends a worker loop driven by this mock.
    pub fn stop_when_drained(&self, flag: Arc<AtomicBool>) {
        self.inner.borrow_mut().stop_when_drained = Some(flag);
    }

    /// Every driver call so far, oldest first
    pub fn calls(&self) -> Vec<DriverCall> {
        self.inner.borrow().calls.clone()
    }

    /// Forget the recorded calls
    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    /// Sector currently unlocked on the simulated tag
    pub fn authenticated_sector(&self) -> Option<u8> {
        self.inner.borrow().authenticated
    }

    fn record(&self, call: DriverCall) {
        self.inner.borrow_mut().calls.push(call);
    }
}

impl Driver for MockDriver {
    fn request(&mut self) -> Result<TagType> {
        self.record(DriverCall::Request);
        let mut tag = self.inner.borrow_mut();
        tag.selected = false;
        tag.authenticated = None;
        if tag.in_field {
            Ok(TagType::MIFARE_CLASSIC_1K)
        } else {
            Err(Error::Driver("no tag answered request".into()))
        }
    }

    fn anticollision(&mut self) -> Result<Uid> {
        self.record(DriverCall::Anticollision);
        let tag = self.inner.borrow();
        if tag.in_field {
            Ok(tag.uid.clone())
        } else {
            Err(Error::Driver("anticollision failed".into()))
        }
    }

    fn select(&mut self, uid: &Uid) -> Result<()> {
        self.record(DriverCall::Select(uid.clone()));
        let mut tag = self.inner.borrow_mut();
        if tag.fail_select || &tag.uid != uid {
            return Err(Error::Driver("select failed".into()));
        }
        tag.selected = true;
        Ok(())
    }

    fn authenticate(
        &mut self,
        key_type: KeyType,
        block: BlockAddress,
        key: &SectorKey,
        uid: &Uid,
    ) -> Result<()> {
        self.record(DriverCall::Authenticate {
            key_type,
            block: block.index(),
        });
        let mut tag = self.inner.borrow_mut();
        let rejected = !tag.selected
            || tag.fail_auth_at == Some(block.index())
            || &tag.key != key
            || &tag.uid != uid;
        if rejected {
            tag.authenticated = None;
            return Err(Error::Driver(format!("auth rejected at block {}", block)));
        }
        tag.authenticated = Some(block.auth_sector());
        Ok(())
    }

    fn read_block(&mut self, address: BlockAddress) -> Result<BlockData> {
        self.record(DriverCall::ReadBlock(address.index()));
        let tag = self.inner.borrow();
        tag.check_data_access(address)?;
        if address.index() >= CLASSIC_1K_BLOCKS || tag.fail_read_at == Some(address.index()) {
            return Err(Error::Driver(format!("read error at block {}", address)));
        }
        Ok(BlockData::from_bytes(tag.blocks[address.index() as usize]))
    }

    fn write_block(&mut self, address: BlockAddress, data: &BlockData) -> Result<()> {
        self.record(DriverCall::WriteBlock(address.index(), *data.as_bytes()));
        let mut tag = self.inner.borrow_mut();
        tag.check_data_access(address)?;
        if address.index() >= CLASSIC_1K_BLOCKS || tag.fail_write_at == Some(address.index()) {
            return Err(Error::Driver(format!("write error at block {}", address)));
        }
        tag.blocks[address.index() as usize] = *data.as_bytes();
        Ok(())
    }

    fn halt_crypto(&mut self) {
        self.record(DriverCall::HaltCrypto);
        self.inner.borrow_mut().authenticated = None;
    }

    fn presence_irq_wait(&mut self, _timeout: Duration) -> bool {
        self.record(DriverCall::PresenceWait);
        let mut tag = self.inner.borrow_mut();
        match tag.presence.pop_front() {
            Some(present) => present,
            None => {
                if let Some(flag) = &tag.stop_when_drained {
                    flag.store(false, Ordering::SeqCst);
                }
                false
            }
        }
    }

    fn presence_irq_clear(&mut self) {
        self.record(DriverCall::PresenceClear);
    }

    fn reinitialize(&mut self) -> Result<()> {
        self.record(DriverCall::Reinitialize);
        let mut tag = self.inner.borrow_mut();
        tag.selected = false;
        tag.authenticated = None;
        Ok(())
    }

    fn deauthenticate(&mut self) -> Result<()> {
        self.record(DriverCall::Deauthenticate);
        self.inner.borrow_mut().authenticated = None;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.record(DriverCall::Cleanup);
        self.inner.borrow_mut().selected = false;
        Ok(())
    }
}
