// libndeftag/src/lib.rs

//! libndeftag
//!
//! Stores a single NDEF message on a MIFARE Classic 1K compatible tag:
//! frames the payload, spreads it across 16-byte data blocks, skips sector
//! trailers and authenticates every sector it enters.
#![warn(missing_docs)]

/// Reader configuration
pub mod config;
/// Tag layout and frame constants
pub mod constants;
/// Reader hardware seam
pub mod driver;
/// Error types
pub mod error;
/// Common imports
pub mod prelude;
/// Block addressing and frame codec
pub mod protocol;
/// NDEF records
pub mod record;
/// Reader handle and session lifecycle
pub mod session;
/// Tag read and write
pub mod tag;
/// Helpers for tests
pub mod test_support;
/// Core newtypes
pub mod types;
/// Hex and timing helpers
pub mod utils;
/// Tag loop
pub mod worker;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the newtypes in `types` are reachable without the module path.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
