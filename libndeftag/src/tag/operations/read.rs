//! Reading the frame block by block.

use log::debug;

use crate::config::ReaderConfig;
use crate::protocol::addressing::{BlockWalk, Step};
use crate::protocol::extract_payload;
use crate::session::TagSession;
use crate::types::{BlockAddress, BlockData};
use crate::Result;

/// Iterator over the data blocks of an authenticated session.
///
/// Trailers are never read; reaching one authenticates the sector behind
/// it before the next data block is fetched. The first error ends the
/// iteration.
pub struct SectorBlocks<'s, 'd> {
    session: &'s mut TagSession<'d>,
    walk: BlockWalk,
    finished: bool,
}

impl<'s, 'd> SectorBlocks<'s, 'd> {
    /// Walk `first..limit` on an already authenticated session
    pub fn new(session: &'s mut TagSession<'d>, first: u8, limit: u8) -> Self {
        Self {
            session,
            walk: BlockWalk::new(first, limit),
            finished: false,
        }
    }
}

impl Iterator for SectorBlocks<'_, '_> {
    type Item = Result<BlockData>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        for step in self.walk.by_ref() {
            let result = match step {
                Step::Trailer(trailer) => match self.session.authenticate(trailer) {
                    Ok(()) => continue,
                    Err(e) => Err(e),
                },
                Step::Data(addr) => self.session.read_block(addr),
            };
            if result.is_err() {
                self.finished = true;
            }
            return Some(result);
        }

        self.finished = true;
        None
    }
}

/// Authenticate the first sector and assemble the frame payload.
pub fn read_payload(session: &mut TagSession<'_>, config: &ReaderConfig) -> Result<Vec<u8>> {
    session.authenticate(BlockAddress::new(config.first_data_block))?;
    let payload = extract_payload(SectorBlocks::new(
        session,
        config.first_data_block,
        config.block_limit,
    ))?;
    debug!("found ndef payload of {} bytes", payload.len());
    Ok(payload)
}
