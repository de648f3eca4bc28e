//! Discrete damped spring
//!
//! A per-tick spring integrator tuned for caret motion. Each step pulls the
//! velocity toward the target by `diff * tension * dt` and then decays it by
//! `friction^dt`. Raising friction to the power of the delta keeps the decay
//! rate independent of tick duration.
//!
//! Units are logical pixels and tick units (one nominal tick = 1.0).

use serde::{Deserialize, Serialize};

/// Configuration for a discrete spring
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Fraction of the remaining distance added to velocity per tick
    pub tension: f32,
    /// Fraction of velocity retained per tick, in `(0, 1]`
    pub friction: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub const fn new(tension: f32, friction: f32) -> Self {
        Self { tension, friction }
    }

    /// Rightward correction while idle or navigating
    pub const fn forward() -> Self {
        Self::new(0.15, 0.65)
    }

    /// Leftward correction, damped harder than forward motion
    pub const fn backward() -> Self {
        Self::new(0.15, 0.45)
    }

    /// Catch-up while typing forward: soft pull, little damping
    pub const fn rapid() -> Self {
        Self::new(0.02, 0.85)
    }

    /// Stiffer spring for discrete pointer jumps
    pub const fn click() -> Self {
        Self::new(0.3, 0.5)
    }

    /// Check that both parameters are usable
    pub fn is_valid(&self) -> bool {
        self.tension.is_finite()
            && self.tension > 0.0
            && self.friction.is_finite()
            && self.friction > 0.0
            && self.friction <= 1.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::forward()
    }
}

/// When a spring is close enough to rest to snap onto its target
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettleThreshold {
    /// Maximum remaining distance, exclusive
    pub distance: f32,
    /// Maximum remaining speed, exclusive
    pub velocity: f32,
}

impl SettleThreshold {
    pub const fn new(distance: f32, velocity: f32) -> Self {
        Self { distance, velocity }
    }
}

impl Default for SettleThreshold {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

/// One axis of spring state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
}

impl Spring {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Place the spring at `value` and stop it
    pub fn reset(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
    }

    /// Stop the spring where it is
    pub fn stop(&mut self) {
        self.velocity = 0.0;
    }

    /// Move the value without touching velocity
    pub fn nudge(&mut self, delta: f32) {
        self.value += delta;
    }

    /// Check if the spring is within the threshold of `target` and nearly still
    pub fn is_settled(&self, target: f32, threshold: SettleThreshold) -> bool {
        (target - self.value).abs() < threshold.distance
            && self.velocity.abs() < threshold.velocity
    }

    /// Advance one step toward `target`
    pub fn step(&mut self, target: f32, config: SpringConfig, dt: f32) {
        let force = (target - self.value) * config.tension;
        self.velocity += force * dt;
        self.velocity *= config.friction.powf(dt);
        self.value += self.velocity * dt;
    }

    /// Snap onto `target` if settled, otherwise step. Returns true on snap.
    pub fn step_or_settle(
        &mut self,
        target: f32,
        config: SpringConfig,
        threshold: SettleThreshold,
        dt: f32,
    ) -> bool {
        if self.is_settled(target, threshold) {
            self.reset(target);
            return true;
        }
        self.step(target, config, dt);
        false
    }
}
