//! Inkcaret
//!
//! A physically animated text caret. Each tick the host describes where the
//! caret should be; the simulator decides how it gets there and returns a
//! single draw command.
//!
//! # Features
//!
//! - **Organic Motion**: ratcheted springs on X so the caret never trails
//!   fast typing, exponential approach on Y
//! - **Jumps**: clicks and line changes animate with an eased or spring jump
//! - **Liquid Trail**: the caret stretches and fades while moving
//! - **Activity Blink**: solid while typing, steady blink when idle
//! - **Host Driver**: input timing, baseline tracking and frame clamping
//!
//! # Example
//!
//! ```
//! use inkcaret::{CaretConfig, CaretSimulator, TargetSignal};
//! use inkcaret_core::Point;
//!
//! let mut sim = CaretSimulator::new(CaretConfig::default()).unwrap();
//! sim.advance(&TargetSignal::new(Point::new(0.0, 20.0), 16.0), 1.0);
//! let draw = sim.advance(&TargetSignal::new(Point::new(8.0, 20.0), 16.0).typing(true), 1.0);
//! assert!(draw.rect.x() > 0.0);
//! ```

pub mod arbiter;
pub mod blink;
pub mod config;
pub mod error;
pub mod host;
pub mod motion;
pub mod regime;
pub mod signal;
pub mod simulator;
pub mod trail;

pub use arbiter::{Arbitration, ModeArbiter};
pub use blink::BlinkScheduler;
pub use config::{
    BlinkConfig, CaretConfig, JumpConfig, JumpStrategy, MotionConfig, TimingConfig, TrailConfig,
};
pub use error::{ConfigError, Result};
pub use host::{BaselineTracker, BaselineUpdate, CaretDriver, InputTracker, KeyKind};
pub use motion::{KinematicState, MotionIntegrator};
pub use regime::{EaseJump, JumpTrigger, Regime, RegimeKind, SpringJump};
pub use signal::{PointerClick, TargetSignal};
pub use simulator::CaretSimulator;
pub use trail::{TrailRenderer, TrailSample};
