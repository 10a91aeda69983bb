// libndeftag/src/session/mod.rs

//! Reader ownership and the per-tag session lifecycle.
//!
//! A [`Reader`] owns the driver for the lifetime of the program. Each read
//! or write opens a short [`TagSession`] that halts crypto when dropped, and
//! the reader rebuilds the driver whenever an operation failed after the
//! tag was selected.

pub mod builder;
mod guard;
pub mod handle;
mod state;

pub use builder::ReaderBuilder;
pub use guard::TagSession;
pub use handle::{DriverFactory, Reader};
pub use state::{RecreateReason, SessionEvent, SessionState};
