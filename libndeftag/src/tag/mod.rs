// libndeftag/src/tag/mod.rs

//! Reading and writing the NDEF frame of a single tag.
//!
//! Both entry points acquire a [`TagSession`] for the duration of the
//! operation; dropping it halts crypto no matter how the operation ended.

use log::debug;

use crate::config::ReaderConfig;
use crate::driver::Driver;
use crate::protocol::addressing::data_capacity;
use crate::protocol::build_frame;
use crate::session::TagSession;
use crate::{Error, Result};

pub mod operations;

fn with_session<T>(
    driver: &mut dyn Driver,
    config: &ReaderConfig,
    op: impl FnOnce(&mut TagSession<'_>) -> Result<T>,
) -> Result<T> {
    let mut session =
        TagSession::open(driver, config.key, config.key_type).ok_or(Error::NoTagSelected)?;
    op(&mut session)
}

/// Select the tag in the field and return its NDEF payload.
pub fn read_ndef(driver: &mut dyn Driver, config: &ReaderConfig) -> Result<Vec<u8>> {
    with_session(driver, config, |session| {
        operations::read_payload(session, config)
    })
}

/// Frame `payload` and check it fits the configured block range.
///
/// Nothing here touches the tag.
pub fn prepare_frame(config: &ReaderConfig, payload: &[u8]) -> Result<Vec<u8>> {
    let frame = build_frame(payload)?;
    let available = data_capacity(config.first_data_block, config.block_limit);
    if frame.len() > available {
        return Err(Error::TagCapacity {
            needed: frame.len(),
            available,
        });
    }
    Ok(frame)
}

/// Write a frame from [`prepare_frame`] to the tag in the field.
pub fn write_prepared(driver: &mut dyn Driver, config: &ReaderConfig, frame: &[u8]) -> Result<()> {
    with_session(driver, config, |session| {
        operations::write_frame(session, config, frame)
    })
}

/// Frame `payload` and write it to the tag in the field.
///
/// Size problems are reported before the tag is touched.
pub fn write_ndef(driver: &mut dyn Driver, config: &ReaderConfig, payload: &[u8]) -> Result<()> {
    let frame = prepare_frame(config, payload)?;
    debug!("writing {} byte payload", payload.len());
    write_prepared(driver, config, &frame)
}
