// libndeftag/src/protocol/frame.rs

//! NDEF frame envelope: `00 00 03 <len> <payload> FE`.

use crate::constants::{
    BLOCK_SIZE, NDEF_HEADER_LEN, NDEF_MAGIC, NDEF_MAX_PAYLOAD_LEN, NDEF_TERMINATOR,
};
use crate::error::FrameError;
use crate::types::BlockData;

/// On-tag NDEF envelope.
/// Format: [Magic(3)] [Len(1)] [Payload(n)] [Terminator(1)]
/// Magic: 0x00 0x00 0x03
/// Terminator: 0xFE
pub struct NdefFrame;

impl NdefFrame {
    /// Wrap a payload into the on-tag byte stream.
    pub fn encode(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
        if payload.len() > NDEF_MAX_PAYLOAD_LEN {
            return Err(FrameError::TooLarge { len: payload.len() });
        }
        // a zero length byte reads back as the unsupported long form
        if payload.is_empty() {
            return Err(FrameError::Unsupported);
        }

        let mut out = Vec::with_capacity(NDEF_HEADER_LEN + payload.len() + 1);
        out.extend_from_slice(&NDEF_MAGIC);
        out.push(payload.len() as u8);
        out.extend_from_slice(payload);
        out.push(NDEF_TERMINATOR);
        Ok(out)
    }

    /// Validate the first data block and return the declared payload length.
    /// The magic is checked before the length byte is looked at.
    pub fn parse_header(block: &BlockData) -> Result<usize, FrameError> {
        let bytes = block.as_bytes();
        if bytes[..3] != NDEF_MAGIC {
            return Err(FrameError::BadMagic {
                found: [bytes[0], bytes[1], bytes[2]],
            });
        }
        match bytes[3] {
            0 => Err(FrameError::Unsupported),
            len => Ok(len as usize),
        }
    }

    /// Decode a flat byte stream (e.g. a dump of consecutive data blocks).
    pub fn decode(stream: &[u8]) -> Result<Vec<u8>, FrameError> {
        extract_payload::<_, FrameError>(
            stream
                .chunks(BLOCK_SIZE)
                .map(|chunk| Ok(BlockData::zero_padded(chunk))),
        )
    }
}

/// Build the frame for `payload`.
pub fn build_frame(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    NdefFrame::encode(payload)
}

/// Assemble the payload from consecutive data blocks.
///
/// `blocks` is pulled lazily: once the declared length is satisfied no
/// further block is requested, so a caller backed by a tag never reads
/// past the payload. Errors produced by the iterator are passed through.
pub fn extract_payload<I, E>(blocks: I) -> Result<Vec<u8>, E>
where
    I: IntoIterator<Item = Result<BlockData, E>>,
    E: From<FrameError>,
{
    let mut blocks = blocks.into_iter();
    let first = blocks.next().ok_or(FrameError::MissingHeader)??;
    let declared = NdefFrame::parse_header(&first)?;

    let mut payload = Vec::with_capacity(declared);
    let head = &first.as_bytes()[NDEF_HEADER_LEN..];
    payload.extend_from_slice(&head[..head.len().min(declared)]);

    while payload.len() < declared {
        let Some(block) = blocks.next() else {
            break;
        };
        let block = block?;
        let want = (declared - payload.len()).min(BLOCK_SIZE);
        payload.extend_from_slice(&block.as_bytes()[..want]);
    }

    if payload.len() < declared {
        return Err(FrameError::Truncated {
            declared,
            got: payload.len(),
        }
        .into());
    }
    Ok(payload)
}
