//! Inkcaret Animation
//!
//! Motion primitives for the caret simulator.
//!
//! # Features
//!
//! - **Discrete Springs**: per-tick tension/friction springs with snap-to-rest
//! - **Easing**: non-overshooting curves, quartic ease-out by default
//! - **Transitions**: time-bounded eased jumps that land exactly on target
//! - **Frame Timing**: wall-clock deltas in tick units with stall clamping

pub mod clock;
pub mod easing;
pub mod spring;
pub mod transition;
pub mod values;

pub use clock::{sanitize_delta, FrameClock, TickTiming, NOMINAL_DELTA};
pub use easing::Easing;
pub use spring::{SettleThreshold, Spring, SpringConfig};
pub use transition::Transition;
pub use values::Interpolate;
