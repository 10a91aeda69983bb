// libndeftag/src/session/guard.rs

use log::{debug, info, trace, warn};

use crate::driver::Driver;
use crate::session::SessionState;
use crate::types::{BlockAddress, BlockData, KeyType, SectorKey, Uid};
use crate::{Error, Result};

/// A selected tag. Crypto is halted when the session is dropped, so every
/// exit path of a read or write releases the tag, including early returns
/// through `?`.
pub struct TagSession<'d> {
    driver: &'d mut dyn Driver,
    uid: Uid,
    key: SectorKey,
    key_type: KeyType,
    state: SessionState,
}

impl<'d> TagSession<'d> {
    /// Run request, anticollision and select. Any failure is routine (tag
    /// moved away, collision) and yields `None` after halting crypto.
    pub fn open(driver: &'d mut dyn Driver, key: SectorKey, key_type: KeyType) -> Option<Self> {
        let handshake = driver.request().and_then(|tag_type| {
            trace!("request answered, atqa={}", tag_type);
            let uid = driver.anticollision()?;
            driver.select(&uid)?;
            Ok(uid)
        });

        match handshake {
            Ok(uid) => {
                info!("found tag uid={}", uid.to_hex());
                Some(Self {
                    driver,
                    uid,
                    key,
                    key_type,
                    state: SessionState::Selected,
                })
            }
            Err(e) => {
                debug!("tag handshake failed: {}", e);
                driver.halt_crypto();
                None
            }
        }
    }

    /// UID of the selected tag
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// `Selected` or `Authenticated(sector)`
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Sector unlocked right now, if any
    pub fn authenticated_sector(&self) -> Option<u8> {
        match self.state {
            SessionState::Authenticated(sector) => Some(sector),
            _ => None,
        }
    }

    /// Authenticate the sector addressed by `block`. A trailer index
    /// unlocks the sector that follows it.
    pub fn authenticate(&mut self, block: BlockAddress) -> Result<()> {
        let sector = block.auth_sector();
        debug!("authenticating sector {} via block {}", sector, block);
        if let Err(e) = self
            .driver
            .authenticate(self.key_type, block, &self.key, &self.uid)
        {
            warn!("authentication of sector {} failed: {}", sector, e);
            self.state = SessionState::Selected;
            return Err(Error::Auth { sector });
        }
        self.state = SessionState::Authenticated(sector);
        Ok(())
    }

    fn ensure_unlocked(&self, address: BlockAddress) -> Result<()> {
        if self.authenticated_sector() == Some(address.sector()) {
            Ok(())
        } else {
            Err(Error::Auth {
                sector: address.sector(),
            })
        }
    }

    /// Read a data block of the unlocked sector.
    pub fn read_block(&mut self, address: BlockAddress) -> Result<BlockData> {
        self.ensure_unlocked(address)?;
        let block = self.driver.read_block(address).map_err(|e| {
            warn!("read of block {} failed: {}", address, e);
            Error::BlockRead {
                address: address.index(),
            }
        })?;
        trace!("read block {}: {}", address, block.to_hex());
        Ok(block)
    }

    /// Write a data block of the unlocked sector.
    pub fn write_block(&mut self, address: BlockAddress, data: &BlockData) -> Result<()> {
        self.ensure_unlocked(address)?;
        trace!("writing block {}: {}", address, data.to_hex());
        self.driver.write_block(address, data).map_err(|e| {
            warn!("write of block {} failed: {}", address, e);
            Error::BlockWrite {
                address: address.index(),
            }
        })
    }
}

impl Drop for TagSession<'_> {
    fn drop(&mut self) {
        self.driver.halt_crypto();
        trace!("crypto halted for uid={}", self.uid.to_hex());
    }
}
