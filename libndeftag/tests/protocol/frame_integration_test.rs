#[path = "../common/mod.rs"]
mod common;

use libndeftag::constants::BLOCK_SIZE;
use libndeftag::protocol::addressing::block_for_offset;
use libndeftag::protocol::{NdefFrame, build_frame, extract_payload};
use libndeftag::{BlockAddress, BlockData, FrameError};

#[test]
fn spotify_track_frame_spans_three_blocks() {
    let frame = build_frame(common::fixtures::SPOTIFY_TRACK).unwrap();
    assert_eq!(frame.len(), 39);
    assert_eq!(&frame[..4], &[0x00, 0x00, 0x03, 34]);
    assert_eq!(frame[38], 0xFE);

    // last frame byte lands in block 6, no trailer crossed
    assert_eq!(block_for_offset(4, 38), Some((BlockAddress::new(6), 6)));
    assert_eq!(frame.chunks(BLOCK_SIZE).count(), 3);
}

#[test]
fn magic_mismatch_before_length() {
    let mut block = common::fixtures::header_block(0);
    block[2] = 0x04;
    let r = extract_payload(vec![Ok::<_, FrameError>(BlockData::from_bytes(block))]);
    assert_eq!(
        r,
        Err(FrameError::BadMagic {
            found: [0x00, 0x00, 0x04]
        })
    );
}

#[test]
fn zero_length_never_yields_empty_payload() {
    let block = common::fixtures::header_block(0);
    let mut stream = block.to_vec();
    stream.extend_from_slice(&[0u8; 32]);
    assert_eq!(NdefFrame::decode(&stream), Err(FrameError::Unsupported));
}

#[test]
fn message_fixture_fits_one_frame() {
    let msg = common::fixtures::album_message();
    let frame = build_frame(&msg).unwrap();
    assert_eq!(NdefFrame::decode(&frame).unwrap(), msg);
}
