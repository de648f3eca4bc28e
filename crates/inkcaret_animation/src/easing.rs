//! Easing curves
//!
//! Map linear progress `0.0..=1.0` to eased progress. Every curve maps
//! `0.0` to `0.0` and `1.0` to `1.0`; none of them overshoot.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseOutCubic,
    /// `1 - (1 - t)^4`: fast start, long settle
    #[default]
    EaseOutQuart,
}

impl Easing {
    /// Apply the curve to progress `t` (clamped to `0.0..=1.0`)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn | Easing::EaseInQuad => t * t,
            Easing::EaseOut | Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseOutQuart => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv * inv
            }
        }
    }
}
