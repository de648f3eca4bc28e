//! Caret kinematics
//!
//! [`MotionIntegrator`] owns the caret position and velocity and advances
//! them one step per tick under the active regime.
//!
//! Organic motion treats the axes differently. Y approaches its target
//! exponentially so line changes look like smooth snapping. X is a damped
//! spring toward a *ratcheted* target: while typing forward the target never
//! moves left by less than the ratchet threshold, which absorbs reflow jitter.
//!
//! Position only changes discontinuously on animation completion, on a snap
//! within the settle threshold, or when a regime entry resets the state.

use crate::config::MotionConfig;
use crate::regime::SpringJump;
use inkcaret_animation::{Spring, SpringConfig};
use inkcaret_core::Point;

/// Snapshot of the caret's kinematic state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KinematicState {
    /// Rendered caret position (x of the cell, y of the baseline)
    pub position: Point,
    /// Velocity in pixels per tick; `y` is only non-zero during spring jumps
    pub velocity: Point,
    /// Slow-following position used for the liquid bloom
    pub trail_x: f32,
    /// Rendered width, never below the base width
    pub width: f32,
    /// Ratchet high-water mark
    pub max_target_x: f32,
}

/// Per-tick kinematic integrator
#[derive(Clone, Debug)]
pub struct MotionIntegrator {
    config: MotionConfig,
    x: Spring,
    y: Spring,
    max_target_x: f32,
}

impl MotionIntegrator {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            x: Spring::default(),
            y: Spring::default(),
            max_target_x: 0.0,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x.value(), self.y.value())
    }

    pub fn velocity(&self) -> Point {
        Point::new(self.x.velocity(), self.y.velocity())
    }

    pub fn max_target_x(&self) -> f32 {
        self.max_target_x
    }

    /// Place the caret at `target` with no motion and a fresh ratchet
    pub fn seed(&mut self, target: Point) {
        self.x.reset(target.x);
        self.y.reset(target.y);
        self.max_target_x = target.x;
    }

    /// Prepare for a discrete jump toward `target`
    ///
    /// Velocity is discarded; the ratchet restarts at the jump target.
    pub fn enter_jump(&mut self, target: Point) {
        self.x.stop();
        self.y.stop();
        self.max_target_x = target.x;
    }

    /// Hand a cancelled jump back to the organic regime
    ///
    /// Organic Y has no velocity; X keeps its momentum.
    pub fn exit_jump(&mut self) {
        self.y.stop();
    }

    /// Move to a position computed elsewhere (eased jump frames)
    pub fn set_position(&mut self, position: Point) {
        self.x.reset(position.x);
        self.y.reset(position.y);
    }

    /// Resolve the X target after the ratchet
    ///
    /// Only forward typing engages the ratchet. A backward move smaller than
    /// `threshold` keeps the caret pinned at the high-water mark; anything
    /// larger is a real relocation and resets the mark.
    pub fn ratchet(&mut self, target_x: f32, typing_forward: bool, deleting: bool, threshold: f32) -> f32 {
        if !typing_forward || deleting {
            self.max_target_x = target_x;
            return target_x;
        }

        if target_x >= self.max_target_x {
            self.max_target_x = target_x;
            return target_x;
        }

        let jump = self.max_target_x - target_x;
        if jump < threshold {
            self.max_target_x
        } else {
            self.max_target_x = target_x;
            target_x
        }
    }

    /// Spring parameters for organic X motion toward a gap of `diff_x`
    fn organic_spring(&self, diff_x: f32, typing_forward: bool) -> SpringConfig {
        let moving_left = diff_x < 0.0;
        if typing_forward && !moving_left {
            self.config.rapid_spring()
        } else if moving_left {
            self.config.backward_spring()
        } else {
            self.config.forward_spring()
        }
    }

    /// Advance one organic step
    pub fn advance_organic(
        &mut self,
        target: Point,
        typing_forward: bool,
        deleting: bool,
        ratchet_threshold: f32,
        dt: f32,
    ) -> Point {
        let target_x = self.ratchet(target.x, typing_forward, deleting, ratchet_threshold);

        let approach = (self.config.y_smooth * dt).min(1.0);
        self.y.nudge((target.y - self.y.value()) * approach);
        if (target.y - self.y.value()).abs() < self.config.snap_threshold {
            self.y.reset(target.y);
        }

        let diff_x = target_x - self.x.value();
        let diff_y = (target.y - self.y.value()).abs();

        if diff_y > self.config.vertical_lock_px {
            // Let Y catch up before X travels, or the caret cuts diagonally
            let nudge = (self.config.vertical_nudge * dt).min(1.0);
            self.x.nudge(diff_x * nudge);
            self.x.stop();
        } else if self.x.is_settled(target_x, self.config.settle()) {
            self.x.reset(target_x);
        } else {
            let spring = self.organic_spring(diff_x, typing_forward);
            self.x.step(target_x, spring, dt);
        }

        tracing::trace!(
            x = self.x.value(),
            y = self.y.value(),
            vx = self.x.velocity(),
            target_x,
            "MotionIntegrator: organic step"
        );

        self.position()
    }

    /// Advance one spring-jump step; returns true once both axes have settled
    pub fn advance_spring_jump(&mut self, jump: &mut SpringJump, spring: SpringConfig, dt: f32) -> bool {
        let settle = self.config.settle();
        if !jump.x_settled {
            jump.x_settled = self.x.step_or_settle(jump.target.x, spring, settle, dt);
        }
        if !jump.y_settled {
            jump.y_settled = self.y.step_or_settle(jump.target.y, spring, settle, dt);
        }
        jump.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 36.0;

    fn seeded(at: Point) -> MotionIntegrator {
        let mut m = MotionIntegrator::new(MotionConfig::default());
        m.seed(at);
        m
    }

    #[test]
    fn test_idle_converges_and_stops() {
        let mut m = seeded(Point::new(0.0, 20.0));
        let target = Point::new(150.0, 20.0);
        let mut snapped_at = None;
        for i in 0..200 {
            let p = m.advance_organic(target, false, false, THRESHOLD, 1.0);
            if p.x == target.x && m.velocity().x == 0.0 {
                snapped_at = Some(i);
                break;
            }
        }
        assert!(snapped_at.is_some(), "never snapped");
        assert_eq!(m.position(), target);
    }

    #[test]
    fn test_backward_converges() {
        let mut m = seeded(Point::new(300.0, 20.0));
        let target = Point::new(12.0, 20.0);
        for _ in 0..200 {
            m.advance_organic(target, false, true, THRESHOLD, 1.0);
        }
        assert_eq!(m.position(), target);
        assert_eq!(m.velocity().x, 0.0);
    }

    #[test]
    fn test_ratchet_tracks_increasing_target() {
        let mut m = seeded(Point::new(0.0, 20.0));
        for x in [10.0, 20.0, 35.0, 50.0] {
            assert_eq!(m.ratchet(x, true, false, THRESHOLD), x);
            assert_eq!(m.max_target_x(), x);
        }
    }

    #[test]
    fn test_ratchet_absorbs_small_regression() {
        let mut m = seeded(Point::new(0.0, 20.0));
        m.ratchet(100.0, true, false, THRESHOLD);
        assert_eq!(m.ratchet(90.0, true, false, THRESHOLD), 100.0);
        assert_eq!(m.max_target_x(), 100.0);
    }

    #[test]
    fn test_ratchet_releases_large_regression() {
        let mut m = seeded(Point::new(0.0, 20.0));
        m.ratchet(100.0, true, false, THRESHOLD);
        assert_eq!(m.ratchet(64.0, true, false, THRESHOLD), 64.0);
        assert_eq!(m.max_target_x(), 64.0);
    }

    #[test]
    fn test_ratchet_bypassed_when_not_typing_or_deleting() {
        let mut m = seeded(Point::new(0.0, 20.0));
        m.ratchet(100.0, true, false, THRESHOLD);
        assert_eq!(m.ratchet(95.0, false, false, THRESHOLD), 95.0);
        assert_eq!(m.max_target_x(), 95.0);

        m.ratchet(100.0, true, false, THRESHOLD);
        assert_eq!(m.ratchet(95.0, true, true, THRESHOLD), 95.0);
    }

    #[test]
    fn test_vertical_lock_holds_x_back() {
        let mut m = seeded(Point::new(0.0, 20.0));
        // Large vertical gap: x only creeps, velocity stays zero
        let p = m.advance_organic(Point::new(100.0, 200.0), false, false, THRESHOLD, 1.0);
        assert!(p.x > 0.0 && p.x < 100.0);
        assert_eq!(m.velocity().x, 0.0);
        // y moved 30% of the way
        assert!((p.y - 74.0).abs() < 1e-3);
    }

    #[test]
    fn test_y_approach_never_overshoots_with_large_dt() {
        let mut m = seeded(Point::new(0.0, 0.0));
        let p = m.advance_organic(Point::new(0.0, 100.0), false, false, THRESHOLD, 10.0);
        assert!(p.y <= 100.0);
    }

    #[test]
    fn test_typing_forward_uses_soft_spring() {
        let mut typing = seeded(Point::new(0.0, 20.0));
        let mut idle = seeded(Point::new(0.0, 20.0));
        let target = Point::new(50.0, 20.0);
        let a = typing.advance_organic(target, true, false, THRESHOLD, 1.0);
        let b = idle.advance_organic(target, false, false, THRESHOLD, 1.0);
        assert!(a.x < b.x);
    }

    #[test]
    fn test_step_is_bounded() {
        let mut m = seeded(Point::new(0.0, 20.0));
        let target = Point::new(100.0, 20.0);
        let mut prev = m.position().x;
        for _ in 0..100 {
            let x = m.advance_organic(target, false, false, THRESHOLD, 1.0).x;
            assert!((x - prev).abs() <= 100.0);
            prev = x;
        }
    }

    #[test]
    fn test_enter_jump_resets_velocity() {
        let mut m = seeded(Point::new(0.0, 20.0));
        m.advance_organic(Point::new(100.0, 20.0), false, false, THRESHOLD, 1.0);
        assert!(m.velocity().x != 0.0);
        m.enter_jump(Point::new(400.0, 60.0));
        assert_eq!(m.velocity(), Point::ZERO);
        assert_eq!(m.max_target_x(), 400.0);
    }

    #[test]
    fn test_spring_jump_settles_both_axes() {
        let mut m = seeded(Point::new(0.0, 20.0));
        let mut jump = SpringJump::new(Point::new(240.0, 120.0), false);
        m.enter_jump(jump.target);
        let mut done = false;
        for _ in 0..200 {
            if m.advance_spring_jump(&mut jump, SpringConfig::click(), 1.0) {
                done = true;
                break;
            }
        }
        assert!(done);
        assert_eq!(m.position(), Point::new(240.0, 120.0));
        assert_eq!(m.velocity(), Point::ZERO);
    }

    #[test]
    fn test_exit_jump_drops_vertical_velocity() {
        let mut m = seeded(Point::new(0.0, 20.0));
        let mut jump = SpringJump::new(Point::new(200.0, 120.0), false);
        m.enter_jump(jump.target);
        m.advance_spring_jump(&mut jump, SpringConfig::click(), 1.0);
        let before = m.velocity();
        assert!(before.y != 0.0);

        m.exit_jump();
        assert_eq!(m.velocity(), Point::new(before.x, 0.0));
    }
}
