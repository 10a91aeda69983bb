// fixtures.rs — commonly used payloads, frames and call-log helpers

use libndeftag::driver::DriverCall;

/// 34-byte link used by the block layout scenario
pub const SPOTIFY_TRACK: &[u8] = b"https://open.spotify.com/track/abc";

/// Encoded NDEF message: one short URI record for
/// `https://open.spotify.com/album/1`
pub fn album_message() -> Vec<u8> {
    hex::decode("d1011955046f70656e2e73706f746966792e636f6d2f616c62756d2f31").unwrap()
}

/// Deterministic payload of `len` bytes
pub fn payload_of(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 1) as u8).collect()
}

/// First block carrying a valid magic and the given length byte
pub fn header_block(len: u8) -> [u8; 16] {
    let mut block = [0xAA; 16];
    block[..4].copy_from_slice(&[0x00, 0x00, 0x03, len]);
    block
}

/// Block indices of data writes, in order
pub fn written_blocks(calls: &[DriverCall]) -> Vec<u8> {
    calls
        .iter()
        .filter_map(|c| match c {
            DriverCall::WriteBlock(addr, _) => Some(*addr),
            _ => None,
        })
        .collect()
}

/// Block indices of data reads, in order
pub fn read_blocks(calls: &[DriverCall]) -> Vec<u8> {
    calls
        .iter()
        .filter_map(|c| match c {
            DriverCall::ReadBlock(addr) => Some(*addr),
            _ => None,
        })
        .collect()
}

/// Block indices handed to authenticate, in order
pub fn auth_blocks(calls: &[DriverCall]) -> Vec<u8> {
    calls
        .iter()
        .filter_map(|c| match c {
            DriverCall::Authenticate { block, .. } => Some(*block),
            _ => None,
        })
        .collect()
}

pub fn count(calls: &[DriverCall], wanted: &DriverCall) -> usize {
    calls.iter().filter(|c| *c == wanted).count()
}
