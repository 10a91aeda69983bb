// libndeftag/src/record/codec.rs

use crate::record::{Record, RecordCodec, Tnf};
use crate::{Error, Result};

const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

/// NFC Forum NDEF message codec. Chunked records are not supported.
#[derive(Debug, Default, Clone, Copy)]
pub struct NdefCodec;

impl NdefCodec {
    /// Stateless codec
    pub fn new() -> Self {
        Self
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).filter(|&e| e <= self.bytes.len());
        match end {
            Some(end) => {
                let out = &self.bytes[self.pos..end];
                self.pos = end;
                Ok(out)
            }
            None => Err(Error::Record(format!(
                "record truncated at offset {}: need {} more bytes",
                self.pos, n
            ))),
        }
    }

    fn byte(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}

impl RecordCodec for NdefCodec {
    fn decode_message(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        if bytes.is_empty() {
            return Err(Error::Record("empty ndef message".into()));
        }

        let mut cur = Cursor { bytes, pos: 0 };
        let mut records = Vec::new();
        loop {
            let header = cur.byte()?;
            if records.is_empty() && header & FLAG_MB == 0 {
                return Err(Error::Record("first record lacks message-begin flag".into()));
            }
            if header & FLAG_CF != 0 {
                return Err(Error::Record("chunked records are not supported".into()));
            }

            let type_len = cur.byte()? as usize;
            let payload_len = if header & FLAG_SR != 0 {
                cur.byte()? as usize
            } else {
                let b = cur.take(4)?;
                u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize
            };
            let id_len = if header & FLAG_IL != 0 {
                cur.byte()? as usize
            } else {
                0
            };

            let record_type = cur.take(type_len)?.to_vec();
            let id = cur.take(id_len)?.to_vec();
            let payload = cur.take(payload_len)?.to_vec();
            records.push(Record::new(
                Tnf::from_bits(header & TNF_MASK),
                record_type,
                id,
                payload,
            ));

            if header & FLAG_ME != 0 {
                break;
            }
            if cur.at_end() {
                return Err(Error::Record("message ended without message-end flag".into()));
            }
        }

        if !cur.at_end() {
            return Err(Error::Record(format!(
                "{} trailing bytes after message end",
                bytes.len() - cur.pos
            )));
        }
        Ok(records)
    }

    fn encode_message(&self, records: &[Record]) -> Result<Vec<u8>> {
        if records.is_empty() {
            return Err(Error::Record("cannot encode an empty message".into()));
        }

        let mut out = Vec::new();
        let last = records.len() - 1;
        for (i, rec) in records.iter().enumerate() {
            let type_len = u8::try_from(rec.type_bytes().len())
                .map_err(|_| Error::Record("record type longer than 255 bytes".into()))?;
            let id_len = u8::try_from(rec.id().len())
                .map_err(|_| Error::Record("record id longer than 255 bytes".into()))?;
            let short = rec.payload().len() <= u8::MAX as usize;

            let mut header = rec.tnf().bits();
            if i == 0 {
                header |= FLAG_MB;
            }
            if i == last {
                header |= FLAG_ME;
            }
            if short {
                header |= FLAG_SR;
            }
            if id_len > 0 {
                header |= FLAG_IL;
            }

            out.push(header);
            out.push(type_len);
            if short {
                out.push(rec.payload().len() as u8);
            } else {
                let len = u32::try_from(rec.payload().len())
                    .map_err(|_| Error::Record("record payload too long".into()))?;
                out.extend_from_slice(&len.to_be_bytes());
            }
            if id_len > 0 {
                out.push(id_len);
            }
            out.extend_from_slice(rec.type_bytes());
            out.extend_from_slice(rec.id());
            out.extend_from_slice(rec.payload());
        }
        Ok(out)
    }
}
