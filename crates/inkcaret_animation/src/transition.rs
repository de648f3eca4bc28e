//! Time-bounded eased transitions
//!
//! A [`Transition`] moves a value from a snapshot start to a fixed target
//! over a fixed duration. Progress is `elapsed / duration`; once it reaches
//! one the value is exactly the target and the transition reports done.
//! Intermediate values are the eased interpolation between start and target.

use crate::easing::Easing;
use crate::values::Interpolate;

/// An eased jump from one value to another
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<T: Interpolate> {
    from: T,
    to: T,
    /// Accumulated time in milliseconds
    elapsed_ms: f32,
    /// Duration in milliseconds
    duration_ms: f32,
    easing: Easing,
    finished: bool,
}

impl<T: Interpolate> Transition<T> {
    /// Start a transition from `from` to `to`
    ///
    /// A non-positive or non-finite duration completes on the first advance.
    pub fn new(from: T, to: T, duration_ms: f32, easing: Easing) -> Self {
        debug_assert!(duration_ms > 0.0, "transition duration must be positive");
        Self {
            from,
            to,
            elapsed_ms: 0.0,
            duration_ms,
            easing,
            finished: false,
        }
    }

    pub fn start(&self) -> &T {
        &self.from
    }

    pub fn target(&self) -> &T {
        &self.to
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Linear progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 || !self.duration_ms.is_finite() {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).min(1.0)
    }

    /// Current value without advancing
    pub fn value(&self) -> T {
        let progress = self.progress();
        if progress >= 1.0 {
            return self.to.clone();
        }
        self.from.lerp(&self.to, self.easing.apply(progress))
    }

    /// Advance by `dt_ms` milliseconds
    ///
    /// Returns the new value and whether the transition has finished.
    /// A zero, negative or non-finite delta leaves progress unchanged.
    pub fn advance(&mut self, dt_ms: f32) -> (T, bool) {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms += dt_ms;
        }
        if self.progress() >= 1.0 {
            self.finished = true;
            return (self.to.clone(), true);
        }
        (self.value(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkcaret_core::Point;

    #[test]
    fn test_transition_reaches_target_exactly() {
        let mut t = Transition::new(
            Point::new(3.3, 7.7),
            Point::new(120.1, 48.9),
            250.0,
            Easing::EaseOutQuart,
        );
        let mut last = (Point::ZERO, false);
        for _ in 0..25 {
            last = t.advance(10.0);
        }
        let (value, done) = last;
        assert!(done);
        assert_eq!(value, Point::new(120.1, 48.9));
        assert!(t.is_finished());
    }

    #[test]
    fn test_transition_not_done_before_duration() {
        let mut t = Transition::new(0.0_f32, 100.0, 250.0, Easing::EaseOutQuart);
        let (v, done) = t.advance(240.0);
        assert!(!done);
        assert!(v > 99.0 && v < 100.0);
    }

    #[test]
    fn test_quartic_midpoint() {
        let mut t = Transition::new(0.0_f32, 100.0, 250.0, Easing::EaseOutQuart);
        let (v, _) = t.advance(125.0);
        assert!((v - 93.75).abs() < 1e-3);
    }

    #[test]
    fn test_zero_delta_does_not_advance() {
        let mut t = Transition::new(0.0_f32, 100.0, 250.0, Easing::EaseOutQuart);
        t.advance(50.0);
        let before = t.elapsed_ms();
        let (_, done) = t.advance(0.0);
        assert!(!done);
        assert_eq!(t.elapsed_ms(), before);
        t.advance(f32::NAN);
        t.advance(-10.0);
        assert_eq!(t.elapsed_ms(), before);
    }

    #[test]
    fn test_overshooting_delta_snaps() {
        let mut t = Transition::new(0.0_f32, 10.0, 250.0, Easing::Linear);
        let (v, done) = t.advance(10_000.0);
        assert!(done);
        assert_eq!(v, 10.0);
    }

    #[test]
    fn test_axes_interpolate_independently() {
        let mut t = Transition::new(
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
            100.0,
            Easing::Linear,
        );
        let (v, _) = t.advance(50.0);
        assert!((v.x - 50.0).abs() < 1e-4);
        assert_eq!(v.y, 100.0);
    }
}
