//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize MockDriver setup so tests across the crate and
//! the tests/ directory build readers the same way.
#![allow(dead_code)]

use std::time::Duration;

use crate::config::ReaderConfig;
use crate::driver::MockDriver;
use crate::protocol::build_frame;
use crate::session::Reader;
use crate::Result;

/// Config with no cooldown and a 1 ms presence wait.
#[doc(hidden)]
pub fn fast_config() -> ReaderConfig {
    ReaderConfig {
        presence_timeout: Duration::from_millis(1),
        removal_cooldown: Duration::ZERO,
        ..Default::default()
    }
}

/// A reader over a clone of `mock` so the caller keeps inspecting it.
#[doc(hidden)]
pub fn reader_over(mock: &MockDriver, config: ReaderConfig) -> Result<Reader> {
    Reader::new(Box::new(mock.clone()), config)
}

/// A reader whose recreate step builds another clone of `mock`.
#[doc(hidden)]
pub fn recreating_reader_over(mock: &MockDriver, config: ReaderConfig) -> Result<Reader> {
    let shared = mock.clone();
    Reader::with_factory(
        Box::new(move || Ok(Box::new(shared.clone()) as Box<dyn crate::driver::Driver>)),
        config,
    )
}

/// MockDriver pre-seeded with the frame for `payload`. Fails when the
/// payload cannot be framed.
#[doc(hidden)]
pub fn mock_with_payload(payload: &[u8]) -> Result<MockDriver> {
    let frame = build_frame(payload)?;
    let mock = MockDriver::new();
    mock.seed_stream(&frame);
    Ok(mock)
}
