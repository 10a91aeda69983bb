// libndeftag/src/record/mod.rs

//! NDEF records carried inside the tag frame.
//!
//! The frame layer only moves opaque payload bytes; turning them into
//! records goes through a [`RecordCodec`]. [`NdefCodec`] is the built-in
//! implementation, and anything else that speaks NDEF can be plugged in
//! instead.

mod codec;
pub mod uri;

pub use codec::NdefCodec;

use crate::{Error, Result};

/// Well-known type name of URI records
pub const URI_RECORD_TYPE: &str = "urn:nfc:wkt:U";

/// Type Name Format (3 bits of the record header)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tnf {
    /// 0x00
    Empty,
    /// 0x01, NFC Forum RTD such as `U`
    WellKnown,
    /// 0x02, MIME type
    Media,
    /// 0x03
    AbsoluteUri,
    /// 0x04
    External,
    /// 0x05
    Unknown,
    /// 0x06, chunk continuation
    Unchanged,
    /// 0x07
    Reserved,
}

impl Tnf {
    /// Decode the low three header bits
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Tnf::Empty,
            1 => Tnf::WellKnown,
            2 => Tnf::Media,
            3 => Tnf::AbsoluteUri,
            4 => Tnf::External,
            5 => Tnf::Unknown,
            6 => Tnf::Unchanged,
            _ => Tnf::Reserved,
        }
    }

    /// Header bits for this format
    pub fn bits(&self) -> u8 {
        *self as u8
    }
}

/// A single NDEF record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    tnf: Tnf,
    record_type: Vec<u8>,
    id: Vec<u8>,
    payload: Vec<u8>,
}

impl Record {
    /// Record from its raw parts
    pub fn new(tnf: Tnf, record_type: Vec<u8>, id: Vec<u8>, payload: Vec<u8>) -> Self {
        Self {
            tnf,
            record_type,
            id,
            payload,
        }
    }

    /// Well-known URI record with the identifier code abbreviated.
    pub fn uri(uri: &str) -> Self {
        Self::new(Tnf::WellKnown, b"U".to_vec(), Vec::new(), uri::abbreviate(uri))
    }

    /// Type name format
    pub fn tnf(&self) -> Tnf {
        self.tnf
    }

    /// Raw type field
    pub fn type_bytes(&self) -> &[u8] {
        &self.record_type
    }

    /// Record id, usually empty
    pub fn id(&self) -> &[u8] {
        &self.id
    }

    /// Raw payload
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Type discriminator in `urn:nfc:wkt:U` form
    pub fn record_type(&self) -> String {
        let name = String::from_utf8_lossy(&self.record_type);
        match self.tnf {
            Tnf::Empty => String::new(),
            Tnf::WellKnown => format!("urn:nfc:wkt:{}", name),
            Tnf::External => format!("urn:nfc:ext:{}", name),
            Tnf::Media | Tnf::AbsoluteUri => name.into_owned(),
            Tnf::Unknown => "unknown".to_string(),
            Tnf::Unchanged => "unchanged".to_string(),
            Tnf::Reserved => "reserved".to_string(),
        }
    }

    /// Well-known `U` record
    pub fn is_uri(&self) -> bool {
        self.tnf == Tnf::WellKnown && self.record_type == b"U"
    }

    /// Expanded URI, if this is a URI record with a UTF-8 body
    pub fn uri_value(&self) -> Option<String> {
        if self.is_uri() {
            uri::expand(&self.payload)
        } else {
            None
        }
    }
}

/// Encode/decode seam for NDEF messages.
pub trait RecordCodec {
    /// Fails if `bytes` is not a valid NDEF message.
    fn decode_message(&self, bytes: &[u8]) -> Result<Vec<Record>>;

    /// Encode `records`, setting MB and ME by position.
    fn encode_message(&self, records: &[Record]) -> Result<Vec<u8>>;
}

/// Decoded tag content: record 0 is the primary link, record 1 (optional)
/// the last-played pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMessage {
    records: Vec<Record>,
    primary: String,
}

impl TagMessage {
    /// All decoded records
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// URI of record 0
    pub fn primary_uri(&self) -> &str {
        &self.primary
    }

    /// URI of record 1, if present
    pub fn last_played(&self) -> Option<String> {
        self.records.get(1).and_then(Record::uri_value)
    }

    /// Replace record 1 with `uri`, or append it if there is none.
    pub fn with_last_played(mut self, uri: &str) -> Self {
        let rec = Record::uri(uri);
        if self.records.len() > 1 {
            self.records[1] = rec;
        } else {
            self.records.push(rec);
        }
        self
    }

    /// Encode all records with `codec`
    pub fn encode(&self, codec: &dyn RecordCodec) -> Result<Vec<u8>> {
        codec.encode_message(&self.records)
    }
}

/// Decode `bytes` and check that record 0 is a URI starting with one of
/// `prefixes`. An empty allow-list accepts any URI.
pub fn parse_records(
    codec: &dyn RecordCodec,
    bytes: &[u8],
    prefixes: &[String],
) -> Result<TagMessage> {
    let records = codec.decode_message(bytes)?;
    let first = records
        .first()
        .ok_or_else(|| Error::UnsupportedRecord("message holds no records".into()))?;

    if !first.is_uri() {
        return Err(Error::UnsupportedRecord(format!(
            "only URI records are supported, got {}",
            first.record_type()
        )));
    }
    let primary = first
        .uri_value()
        .ok_or_else(|| Error::UnsupportedRecord("URI record is not valid UTF-8".into()))?;

    if !prefixes.is_empty() && !prefixes.iter().any(|p| primary.starts_with(p.as_str())) {
        return Err(Error::UnsupportedRecord(format!(
            "link scheme not recognized: {}",
            primary
        )));
    }

    Ok(TagMessage { records, primary })
}
