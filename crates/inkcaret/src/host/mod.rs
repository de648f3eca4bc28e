//! Host adapter
//!
//! Everything between an editing surface and [`CaretSimulator`](crate::CaretSimulator):
//! input timing, baseline tracking and the tick driver.

pub mod baseline;
pub mod driver;
pub mod input;

pub use baseline::{BaselineTracker, BaselineUpdate};
pub use driver::CaretDriver;
pub use input::{InputTracker, KeyKind};
