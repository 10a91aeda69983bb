// libndeftag/src/driver/mod.rs

//! Hardware seam: the [`Driver`] trait and an in-memory [`MockDriver`].

pub mod mock;
pub mod traits;

pub use mock::{DriverCall, MockDriver};
pub use traits::Driver;
