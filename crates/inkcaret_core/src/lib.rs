//! Inkcaret Core
//!
//! Foundational types shared by the caret simulator and its host:
//!
//! - **Geometry**: `Point`, `Size`, `Rect` and an RGBA `Color`
//! - **Draw Commands**: the per-tick `CaretDraw` and the `CaretSink` trait
//! - **Capabilities**: `CaretLayout` and `ImeCapability`, the seams through
//!   which the editing surface supplies layout and composition state

pub mod capability;
pub mod draw;
pub mod geometry;

pub use capability::{CaretLayout, ImeCapability, NoIme};
pub use draw::{CaretDraw, CaretSink, RecordingSink};
pub use geometry::{Color, Point, Rect, Size};
