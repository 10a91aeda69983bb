//! Small helpers shared by the driver, session and worker layers: hex
//! formatting for log output and the default timing values.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
