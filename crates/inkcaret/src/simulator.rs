//! The caret simulator
//!
//! [`CaretSimulator`] composes the regime arbiter, the kinematic integrator,
//! the liquid trail and the blink scheduler into a single step:
//!
//! ```text
//! signal -> arbitrate -> integrate -> trail -> blink -> CaretDraw
//! ```
//!
//! It owns no timer. Whatever drives it (a fixed-rate loop, a frame
//! callback) calls [`CaretSimulator::advance`] once per tick with the
//! elapsed time in tick units.
//!
//! # Example
//!
//! ```
//! use inkcaret::{CaretSimulator, TargetSignal};
//! use inkcaret_core::Point;
//!
//! let mut sim = CaretSimulator::default();
//! let draw = sim.advance(&TargetSignal::new(Point::new(40.0, 32.0), 16.0), 1.0);
//! assert_eq!(draw.rect.x(), 40.0);
//! assert_eq!(draw.rect.y(), 16.0);
//! assert!(draw.visible);
//! ```

use crate::arbiter::ModeArbiter;
use crate::blink::BlinkScheduler;
use crate::config::CaretConfig;
use crate::error::Result;
use crate::motion::{KinematicState, MotionIntegrator};
use crate::regime::{Regime, RegimeKind};
use crate::signal::TargetSignal;
use crate::trail::TrailRenderer;
use inkcaret_animation::{sanitize_delta, TickTiming};
use inkcaret_core::{CaretDraw, Color, Rect};

pub struct CaretSimulator {
    config: CaretConfig,
    timing: TickTiming,
    arbiter: ModeArbiter,
    motion: MotionIntegrator,
    trail: TrailRenderer,
    blink: BlinkScheduler,
    regime: Regime,
    seeded: bool,
    line_height: f32,
    nominal_color: Color,
    ticks: u64,
}

impl CaretSimulator {
    /// Create a simulator from a validated configuration
    pub fn new(config: CaretConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: CaretConfig) -> Self {
        Self {
            timing: config.timing.tick_timing(),
            arbiter: ModeArbiter::new(config.jump.clone()),
            motion: MotionIntegrator::new(config.motion.clone()),
            trail: TrailRenderer::new(config.trail.clone()),
            blink: BlinkScheduler::new(&config.blink),
            regime: Regime::Organic,
            seeded: false,
            line_height: 0.0,
            nominal_color: Color::BLACK,
            ticks: 0,
            config,
        }
    }

    pub fn config(&self) -> &CaretConfig {
        &self.config
    }

    pub fn regime(&self) -> &Regime {
        &self.regime
    }

    pub fn regime_kind(&self) -> RegimeKind {
        self.regime.kind()
    }

    /// Number of ticks advanced so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether the first valid signal has been seen
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Snapshot of position, velocity, trail and ratchet
    pub fn state(&self) -> KinematicState {
        KinematicState {
            position: self.motion.position(),
            velocity: self.motion.velocity(),
            trail_x: self.trail.trail_x(),
            width: self.trail.width(),
            max_target_x: self.motion.max_target_x(),
        }
    }

    /// Show the caret now and restart the blink cycle
    pub fn reset_blink(&mut self) {
        self.blink.reset();
    }

    /// Advance one tick
    ///
    /// `dt` is the elapsed time in tick units. Non-finite, non-positive or
    /// stall-sized deltas are replaced with one nominal tick. A signal
    /// without a usable position leaves the kinematics untouched.
    pub fn advance(&mut self, signal: &TargetSignal, dt: f32) -> CaretDraw {
        self.ticks += 1;

        let (dt, replaced) = sanitize_delta(dt, self.timing.max_delta());
        if replaced {
            tracing::warn!(tick = self.ticks, "CaretSimulator: discarded unusable delta");
        }

        if signal.is_valid() {
            self.line_height = signal.line_height;
            self.nominal_color = signal.color;
            self.integrate(signal, dt);
        } else {
            tracing::warn!(
                tick = self.ticks,
                target = ?signal.target,
                line_height = signal.line_height,
                "CaretSimulator: invalid target, holding position"
            );
        }

        let visible = self.blink.tick(signal.composing, signal.recently_typed);
        self.draw(visible)
    }

    fn integrate(&mut self, signal: &TargetSignal, dt: f32) {
        if !self.seeded {
            // No baseline yet: appear at the target rather than flying in from the origin
            self.motion.seed(signal.target);
            self.trail.seed(signal.target.x);
            self.regime = Regime::Organic;
            self.seeded = true;
            tracing::debug!(target = ?signal.target, "CaretSimulator: seeded");
            return;
        }

        let current = std::mem::take(&mut self.regime);
        let was_jump = current.is_jump();
        let arbitration = self
            .arbiter
            .arbitrate(current, signal, self.motion.position());
        if let Some(trigger) = arbitration.entered {
            self.motion.enter_jump(trigger.target());
        } else if was_jump && !arbitration.regime.is_jump() {
            self.motion.exit_jump();
            tracing::debug!("CaretSimulator: jump cancelled by typing");
        }

        self.regime = match arbitration.regime {
            Regime::Organic => {
                self.motion.advance_organic(
                    signal.target,
                    signal.typing_forward,
                    signal.deleting,
                    signal.ratchet_threshold,
                    dt,
                );
                Regime::Organic
            }
            Regime::Animated(mut jump) => {
                let (position, done) = jump.transition.advance(self.timing.delta_to_ms(dt));
                self.motion.set_position(position);
                if done {
                    tracing::debug!(?position, "CaretSimulator: animation landed");
                    Regime::Organic
                } else {
                    Regime::Animated(jump)
                }
            }
            Regime::ClickSpring(mut jump) => {
                let spring = self.config.jump.spring();
                if self.motion.advance_spring_jump(&mut jump, spring, dt) {
                    tracing::debug!(target = ?jump.target, "CaretSimulator: spring jump settled");
                    Regime::Organic
                } else {
                    Regime::ClickSpring(jump)
                }
            }
        };

        self.trail.update(self.motion.position().x, dt);
    }

    fn draw(&self, visible: bool) -> CaretDraw {
        let position = self.motion.position();
        let rect = Rect::new(
            position.x,
            position.y - self.line_height,
            self.trail.width(),
            self.line_height,
        );
        CaretDraw::new(rect, self.trail.blend(self.nominal_color), visible)
    }
}

impl Default for CaretSimulator {
    fn default() -> Self {
        Self::from_valid(CaretConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JumpStrategy;
    use inkcaret_core::Point;

    fn signal(x: f32, y: f32) -> TargetSignal {
        TargetSignal::new(Point::new(x, y), 16.0)
    }

    fn seeded_at(x: f32, y: f32) -> CaretSimulator {
        let mut sim = CaretSimulator::default();
        sim.advance(&signal(x, y), 1.0);
        sim
    }

    #[test]
    fn test_first_tick_seeds_without_animation() {
        let mut sim = CaretSimulator::default();
        let draw = sim.advance(&signal(320.0, 200.0).row_changed(true), 1.0);
        assert!(sim.is_seeded());
        assert_eq!(sim.regime_kind(), RegimeKind::Organic);
        assert_eq!(sim.state().position, Point::new(320.0, 200.0));
        assert_eq!(draw.rect, Rect::new(320.0, 184.0, 2.0, 16.0));
    }

    #[test]
    fn test_invalid_signal_before_seed_is_ignored() {
        let mut sim = CaretSimulator::default();
        sim.advance(&signal(f32::NAN, 10.0), 1.0);
        assert!(!sim.is_seeded());
        sim.advance(&signal(50.0, 10.0), 1.0);
        assert_eq!(sim.state().position, Point::new(50.0, 10.0));
    }

    #[test]
    fn test_invalid_signal_holds_state() {
        let mut sim = seeded_at(10.0, 20.0);
        sim.advance(&signal(200.0, 20.0), 1.0);
        let before = sim.state();
        sim.advance(&signal(f32::NAN, f32::NAN), 1.0);
        sim.advance(&TargetSignal::new(Point::new(5.0, 5.0), -1.0), 1.0);
        assert_eq!(sim.state(), before);
    }

    #[test]
    fn test_click_animates_and_lands() {
        let mut sim = seeded_at(10.0, 20.0);
        let draw = sim.advance(&signal(10.0, 20.0).click(Point::new(400.0, 100.0)), 1.0);
        assert_eq!(sim.regime_kind(), RegimeKind::Animated);
        assert!(draw.rect.x() > 10.0 && draw.rect.x() < 400.0);

        for _ in 0..24 {
            sim.advance(&signal(400.0, 100.0), 1.0);
        }
        assert_eq!(sim.state().position, Point::new(400.0, 100.0));
        assert_eq!(sim.regime_kind(), RegimeKind::Organic);
    }

    #[test]
    fn test_spring_strategy_settles() {
        let mut config = CaretConfig::default();
        config.jump.strategy = JumpStrategy::Spring;
        let mut sim = CaretSimulator::new(config).unwrap();
        sim.advance(&signal(0.0, 20.0), 1.0);
        sim.advance(&signal(0.0, 20.0).click(Point::new(150.0, 60.0)), 1.0);
        assert_eq!(sim.regime_kind(), RegimeKind::ClickSpring);

        for _ in 0..200 {
            sim.advance(&signal(150.0, 60.0), 1.0);
            if sim.regime_kind() == RegimeKind::Organic {
                break;
            }
        }
        assert_eq!(sim.regime_kind(), RegimeKind::Organic);
        assert_eq!(sim.state().position, Point::new(150.0, 60.0));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = CaretConfig::default();
        config.jump.duration_ms = -1.0;
        assert!(CaretSimulator::new(config).is_err());
    }

    #[test]
    fn test_width_never_below_base() {
        let mut sim = seeded_at(0.0, 20.0);
        for i in 0..100 {
            let x = if i < 50 { 300.0 } else { 0.0 };
            let draw = sim.advance(&signal(x, 20.0), 1.0);
            assert!(draw.rect.width() >= 2.0);
        }
    }

    #[test]
    fn test_color_attenuates_while_moving() {
        let mut sim = seeded_at(0.0, 20.0);
        let mut faded = false;
        for _ in 0..10 {
            let draw = sim.advance(&signal(300.0, 20.0).color(Color::BLACK), 1.0);
            if draw.color.r > 0.0 {
                faded = true;
            }
        }
        assert!(faded);
        for _ in 0..300 {
            sim.advance(&signal(300.0, 20.0).color(Color::BLACK), 1.0);
        }
        let draw = sim.advance(&signal(300.0, 20.0).color(Color::BLACK), 1.0);
        assert_eq!(draw.color, Color::BLACK);
    }

    #[test]
    fn test_reset_blink() {
        let mut sim = seeded_at(0.0, 20.0);
        let mut hidden = false;
        for _ in 0..120 {
            if !sim.advance(&signal(0.0, 20.0), 1.0).visible {
                hidden = true;
                break;
            }
        }
        assert!(hidden);
        sim.reset_blink();
        assert!(sim.advance(&signal(0.0, 20.0), 1.0).visible);
    }
}
