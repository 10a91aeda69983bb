#[path = "../common/mod.rs"]
mod common;

use libndeftag::constants::BLOCK_SIZE;
use libndeftag::driver::MockDriver;
use libndeftag::protocol::addressing::data_blocks;
use libndeftag::{ReaderConfig, SessionState};
use proptest::prelude::*;

#[test]
fn spotify_track_roundtrip() -> anyhow::Result<()> {
    let mock = MockDriver::new();
    let mut reader = common::reader_over(&mock, ReaderConfig::default())?;

    reader.write_ndef(common::fixtures::SPOTIFY_TRACK)?;
    assert_eq!(common::fixtures::written_blocks(&mock.calls()), vec![4, 5, 6]);
    // payload bytes 0..12 follow the 4-byte header in block 4
    assert_eq!(&mock.block(4)[4..], &common::fixtures::SPOTIFY_TRACK[..12]);

    let back = reader.read_ndef()?;
    assert_eq!(back, common::fixtures::SPOTIFY_TRACK.to_vec());
    assert_eq!(reader.state(), SessionState::Closed);
    Ok(())
}

#[test]
fn read_stops_at_declared_length() -> anyhow::Result<()> {
    let mock = common::mock_with_payload(&common::fixtures::payload_of(12))?;
    let mut reader = common::reader_over(&mock, ReaderConfig::default())?;
    assert_eq!(reader.read_ndef()?, common::fixtures::payload_of(12));
    // 12 payload bytes fit behind the header of block 4
    assert_eq!(common::fixtures::read_blocks(&mock.calls()), vec![4]);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn write_then_read_roundtrip(payload in prop::collection::vec(any::<u8>(), 1..=255)) {
        let mock = MockDriver::new();
        let mut reader = common::reader_over(&mock, ReaderConfig::default()).unwrap();
        reader.write_ndef(&payload).unwrap();
        prop_assert_eq!(reader.read_ndef().unwrap(), payload);
    }

    #[test]
    fn only_final_block_is_padded(payload in prop::collection::vec(1u8..=255, 1..=255)) {
        let mock = MockDriver::new();
        for addr in data_blocks(4, 63) {
            mock.set_block(addr.index(), [0x5C; 16]);
        }
        let mut reader = common::reader_over(&mock, ReaderConfig::default()).unwrap();
        reader.write_ndef(&payload).unwrap();

        let frame_len = payload.len() + 5;
        let written = common::fixtures::written_blocks(&mock.calls());
        prop_assert_eq!(written.len(), frame_len.div_ceil(BLOCK_SIZE));

        let last = *written.last().unwrap();
        let used = frame_len - (written.len() - 1) * BLOCK_SIZE;
        let block = mock.block(last);
        prop_assert!(block[used..].iter().all(|&b| b == 0x00));
        prop_assert_eq!(block[used - 1], 0xFE);

        // the next data block keeps its old content
        let untouched = data_blocks(4, 63).find(|a| a.index() > last).unwrap();
        prop_assert_eq!(mock.block(untouched.index()), [0x5C; 16]);
    }
}
