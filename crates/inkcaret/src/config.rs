//! Caret tuning configuration
//!
//! Every physical constant the simulator uses lives here. All sections
//! default independently, so a TOML file only needs the values it changes:
//!
//! ```toml
//! [jump]
//! strategy = "spring"
//!
//! [blink]
//! interval_ticks = 60
//! ```

use crate::error::{ConfigError, Result};
use inkcaret_animation::{Easing, SettleThreshold, SpringConfig, TickTiming};
use inkcaret_core::Color;
use serde::{Deserialize, Serialize};

/// Complete simulator configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaretConfig {
    pub motion: MotionConfig,
    pub jump: JumpConfig,
    pub trail: TrailConfig,
    pub blink: BlinkConfig,
    pub timing: TimingConfig,
}

/// Organic (typing and idle) motion constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Per-tick fraction of the vertical gap closed
    pub y_smooth: f32,
    /// Spring tension when not catching up with typing
    pub x_tension: f32,
    /// Spring tension while typing forward
    pub rapid_tension: f32,
    /// Spring friction while typing forward
    pub rapid_friction: f32,
    /// Spring friction for rightward correction
    pub friction_forward: f32,
    /// Spring friction for leftward correction
    pub friction_backward: f32,
    /// Snap distance in pixels
    pub snap_threshold: f32,
    /// Snap speed in pixels per tick
    pub stop_velocity: f32,
    /// Vertical gap above which horizontal motion is held back
    pub vertical_lock_px: f32,
    /// Per-tick fraction of the horizontal gap closed while held back
    pub vertical_nudge: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            y_smooth: 0.3,
            x_tension: 0.15,
            rapid_tension: 0.02,
            rapid_friction: 0.85,
            friction_forward: 0.65,
            friction_backward: 0.45,
            snap_threshold: 0.5,
            stop_velocity: 0.5,
            vertical_lock_px: 5.0,
            vertical_nudge: 0.3,
        }
    }
}

impl MotionConfig {
    pub fn forward_spring(&self) -> SpringConfig {
        SpringConfig::new(self.x_tension, self.friction_forward)
    }

    pub fn backward_spring(&self) -> SpringConfig {
        SpringConfig::new(self.x_tension, self.friction_backward)
    }

    pub fn rapid_spring(&self) -> SpringConfig {
        SpringConfig::new(self.rapid_tension, self.rapid_friction)
    }

    pub fn settle(&self) -> SettleThreshold {
        SettleThreshold::new(self.snap_threshold, self.stop_velocity)
    }
}

/// How the caret travels after a pointer click or a row change
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpStrategy {
    /// Time-bounded eased transition that lands exactly on target
    #[default]
    Ease,
    /// Symmetric X/Y spring that settles onto target
    Spring,
}

/// Discrete jump constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    pub strategy: JumpStrategy,
    /// Eased jump duration in milliseconds
    pub duration_ms: f32,
    /// Eased jump curve
    pub easing: Easing,
    /// Jump spring tension
    pub spring_tension: f32,
    /// Jump spring friction
    pub spring_friction: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        let spring = SpringConfig::click();
        Self {
            strategy: JumpStrategy::Ease,
            duration_ms: 250.0,
            easing: Easing::EaseOutQuart,
            spring_tension: spring.tension,
            spring_friction: spring.friction,
        }
    }
}

impl JumpConfig {
    pub fn spring(&self) -> SpringConfig {
        SpringConfig::new(self.spring_tension, self.spring_friction)
    }
}

/// Liquid trail constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Caret width at rest, in pixels
    pub base_width: f32,
    /// Per-tick fraction of the lag closed by the trailing position
    pub follow_factor: f32,
    /// Extra width per pixel of lag
    pub width_gain: f32,
    /// Lag below which the trail snaps onto the caret
    pub rest_epsilon: f32,
    /// How quickly color fades toward the background as width grows
    pub color_decay: f32,
    /// Surface background the caret fades into
    pub background: Color,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            base_width: 2.0,
            follow_factor: 0.2,
            width_gain: 0.3,
            rest_epsilon: 0.1,
            color_decay: 0.3,
            background: Color::WHITE,
        }
    }
}

/// Blink duty cycle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Ticks per half period
    pub interval_ticks: u32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self { interval_ticks: 88 }
    }
}

/// Tick timing and input gating
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Nominal tick interval; one tick unit
    pub tick_interval_ms: f32,
    /// Longest gap between ticks accepted as a real delta
    pub max_elapsed_ms: f32,
    /// How long after the last keystroke the caret counts as typing
    pub typing_timeout_ms: u64,
    /// How long after the last keystroke blinking stays suppressed
    pub blink_timeout_ms: u64,
    /// Ratchet threshold as a multiple of the font size
    pub ratchet_multiplier: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10.0,
            max_elapsed_ms: 100.0,
            typing_timeout_ms: 200,
            blink_timeout_ms: 400,
            ratchet_multiplier: 3.0,
        }
    }
}

impl TimingConfig {
    pub fn tick_timing(&self) -> TickTiming {
        TickTiming::new(self.tick_interval_ms, self.max_elapsed_ms)
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be zero or positive, got {value}"),
        ))
    }
}

fn friction(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be in (0, 1], got {value}"),
        ))
    }
}

impl CaretConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CaretConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that every value is usable by the simulator
    pub fn validate(&self) -> Result<()> {
        let m = &self.motion;
        positive("motion.y_smooth", m.y_smooth)?;
        positive("motion.x_tension", m.x_tension)?;
        positive("motion.rapid_tension", m.rapid_tension)?;
        friction("motion.rapid_friction", m.rapid_friction)?;
        friction("motion.friction_forward", m.friction_forward)?;
        friction("motion.friction_backward", m.friction_backward)?;
        non_negative("motion.snap_threshold", m.snap_threshold)?;
        non_negative("motion.stop_velocity", m.stop_velocity)?;
        non_negative("motion.vertical_lock_px", m.vertical_lock_px)?;
        positive("motion.vertical_nudge", m.vertical_nudge)?;

        let j = &self.jump;
        positive("jump.duration_ms", j.duration_ms)?;
        positive("jump.spring_tension", j.spring_tension)?;
        friction("jump.spring_friction", j.spring_friction)?;

        let t = &self.trail;
        positive("trail.base_width", t.base_width)?;
        positive("trail.follow_factor", t.follow_factor)?;
        non_negative("trail.width_gain", t.width_gain)?;
        non_negative("trail.rest_epsilon", t.rest_epsilon)?;
        non_negative("trail.color_decay", t.color_decay)?;

        if self.blink.interval_ticks == 0 {
            return Err(ConfigError::invalid(
                "blink.interval_ticks",
                "must be at least one tick",
            ));
        }

        let timing = &self.timing;
        positive("timing.tick_interval_ms", timing.tick_interval_ms)?;
        positive("timing.max_elapsed_ms", timing.max_elapsed_ms)?;
        if timing.max_elapsed_ms < timing.tick_interval_ms {
            return Err(ConfigError::invalid(
                "timing.max_elapsed_ms",
                "must not be shorter than one tick",
            ));
        }
        positive("timing.ratchet_multiplier", timing.ratchet_multiplier)?;

        Ok(())
    }
}
