//! Writing the frame block by block.

use log::debug;

use crate::config::ReaderConfig;
use crate::constants::BLOCK_SIZE;
use crate::protocol::addressing::{BlockWalk, Step, data_capacity};
use crate::session::TagSession;
use crate::types::{BlockAddress, BlockData};
use crate::{Error, Result};

/// Splay an encoded frame over consecutive data blocks.
///
/// The final chunk is zero-padded to a full block. Trailers are skipped
/// after authenticating the sector that follows them. The first failed
/// write aborts the operation.
pub fn write_frame(session: &mut TagSession<'_>, config: &ReaderConfig, frame: &[u8]) -> Result<()> {
    let first = config.first_data_block;
    session.authenticate(BlockAddress::new(first))?;

    let mut chunks = frame.chunks(BLOCK_SIZE);
    let mut pending = chunks.next();
    let mut written = 0usize;

    for step in BlockWalk::new(first, config.block_limit) {
        let Some(chunk) = pending else {
            break;
        };
        match step {
            Step::Trailer(trailer) => session.authenticate(trailer)?,
            Step::Data(addr) => {
                session.write_block(addr, &BlockData::zero_padded(chunk))?;
                written += 1;
                pending = chunks.next();
            }
        }
    }

    if pending.is_some() {
        return Err(Error::TagCapacity {
            needed: frame.len(),
            available: data_capacity(first, config.block_limit),
        });
    }
    debug!("wrote {} byte frame over {} blocks", frame.len(), written);
    Ok(())
}
