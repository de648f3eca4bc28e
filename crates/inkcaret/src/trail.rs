//! Liquid trail
//!
//! A second X position follows the caret through a single-pole lag. The gap
//! between them widens the rendered caret and fades its color toward the
//! background, so a fast-moving caret thins out like a viscous ink stroke
//! and recombines at rest. Rendering only: the kinematics never see this.

use crate::config::TrailConfig;
use inkcaret_core::Color;

/// Result of one trail update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSample {
    pub trail_x: f32,
    pub width: f32,
    /// `1.0` at rest, falling toward `0.0` as the caret blooms
    pub intensity: f32,
}

#[derive(Clone, Debug)]
pub struct TrailRenderer {
    config: TrailConfig,
    trail_x: f32,
    width: f32,
}

impl TrailRenderer {
    pub fn new(config: TrailConfig) -> Self {
        let width = config.base_width;
        Self {
            config,
            trail_x: 0.0,
            width,
        }
    }

    pub fn trail_x(&self) -> f32 {
        self.trail_x
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn base_width(&self) -> f32 {
        self.config.base_width
    }

    /// Put the trail at rest on `x`
    pub fn seed(&mut self, x: f32) {
        self.trail_x = x;
        self.width = self.config.base_width;
    }

    /// Follow the caret at `pos_x` for one step
    pub fn update(&mut self, pos_x: f32, dt: f32) -> TrailSample {
        let follow = (self.config.follow_factor * dt).min(1.0);
        self.trail_x += (pos_x - self.trail_x) * follow;

        let lag = (pos_x - self.trail_x).abs();
        if lag < self.config.rest_epsilon {
            self.trail_x = pos_x;
            self.width = self.config.base_width;
        } else {
            self.width = self.config.base_width + lag * self.config.width_gain;
        }

        self.sample()
    }

    /// Current state without advancing
    pub fn sample(&self) -> TrailSample {
        TrailSample {
            trail_x: self.trail_x,
            width: self.width,
            intensity: self.intensity(),
        }
    }

    /// Color strength for the current width
    pub fn intensity(&self) -> f32 {
        let expansion = (self.width - self.config.base_width).max(0.0);
        1.0 / (1.0 + expansion * self.config.color_decay)
    }

    /// Blend `nominal` toward the background by the current intensity
    pub fn blend(&self, nominal: Color) -> Color {
        Color::lerp(&self.config.background, &nominal, self.intensity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail() -> TrailRenderer {
        let mut t = TrailRenderer::new(TrailConfig::default());
        t.seed(0.0);
        t
    }

    #[test]
    fn test_rest_is_base_width_and_full_color() {
        let t = trail();
        assert_eq!(t.width(), 2.0);
        assert_eq!(t.intensity(), 1.0);
        assert_eq!(t.blend(Color::BLACK), Color::BLACK);
    }

    #[test]
    fn test_motion_blooms_and_fades() {
        let mut t = trail();
        let sample = t.update(100.0, 1.0);
        // trail moved 20% of the way, lag 80 px
        assert!((sample.trail_x - 20.0).abs() < 1e-4);
        assert!((sample.width - (2.0 + 80.0 * 0.3)).abs() < 1e-3);
        assert!(sample.intensity < 1.0);

        let color = t.blend(Color::BLACK);
        assert!(color.r > 0.0 && color.r < 1.0);
        assert_eq!(color.r, color.g);
    }

    #[test]
    fn test_bloom_decays_exactly_to_base() {
        let mut t = trail();
        t.update(100.0, 1.0);
        let mut rested = false;
        for _ in 0..200 {
            let s = t.update(100.0, 1.0);
            if s.trail_x == 100.0 {
                rested = true;
                assert_eq!(s.width, 2.0);
                assert_eq!(s.intensity, 1.0);
                break;
            }
            assert!(s.width > 2.0);
        }
        assert!(rested);
    }

    #[test]
    fn test_follow_factor_capped() {
        let mut t = trail();
        // 0.2 * 10 = 2.0 would overshoot without the cap
        let s = t.update(50.0, 10.0);
        assert_eq!(s.trail_x, 50.0);
        assert_eq!(s.width, 2.0);
    }

    #[test]
    fn test_custom_background() {
        let mut t = TrailRenderer::new(TrailConfig {
            background: Color::BLACK,
            ..TrailConfig::default()
        });
        t.seed(0.0);
        t.update(200.0, 1.0);
        let c = t.blend(Color::WHITE);
        assert!(c.r < 1.0);
    }
}
