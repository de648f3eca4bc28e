//! Frame timing
//!
//! Converts wall-clock time between ticks into a delta in *tick units*,
//! where one nominal tick is `1.0`. A stalled or suspended host must not be
//! able to feed a huge delta into the integrators, so elapsed times outside
//! `(0, max_elapsed_ms]` collapse to a single nominal tick.

use std::time::Instant;

/// Delta used whenever the measured one is unusable
pub const NOMINAL_DELTA: f32 = 1.0;

/// Tick interval and stall limit, both in milliseconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickTiming {
    pub tick_interval_ms: f32,
    pub max_elapsed_ms: f32,
}

impl TickTiming {
    pub const fn new(tick_interval_ms: f32, max_elapsed_ms: f32) -> Self {
        Self {
            tick_interval_ms,
            max_elapsed_ms,
        }
    }

    /// Largest delta, in tick units, that is accepted as-is
    pub fn max_delta(&self) -> f32 {
        self.max_elapsed_ms / self.tick_interval_ms
    }

    /// Convert a delta in tick units to milliseconds
    pub fn delta_to_ms(&self, delta: f32) -> f32 {
        delta * self.tick_interval_ms
    }

    /// Convert elapsed milliseconds to a clamped delta in tick units
    pub fn delta_from_ms(&self, elapsed_ms: f32) -> f32 {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 || elapsed_ms > self.max_elapsed_ms {
            return NOMINAL_DELTA;
        }
        elapsed_ms / self.tick_interval_ms
    }
}

impl Default for TickTiming {
    fn default() -> Self {
        Self::new(10.0, 100.0)
    }
}

/// Replace an unusable delta with [`NOMINAL_DELTA`]
///
/// Returns the delta to use and whether it was replaced.
pub fn sanitize_delta(delta: f32, max_delta: f32) -> (f32, bool) {
    if delta.is_finite() && delta > 0.0 && delta <= max_delta {
        (delta, false)
    } else {
        (NOMINAL_DELTA, true)
    }
}

/// Measures the time between consecutive ticks
#[derive(Clone, Debug)]
pub struct FrameClock {
    timing: TickTiming,
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new(timing: TickTiming) -> Self {
        Self {
            timing,
            last_tick: None,
        }
    }

    pub fn timing(&self) -> TickTiming {
        self.timing
    }

    /// Record a tick at `now` and return the delta since the previous one
    ///
    /// The first tick has no baseline and yields a nominal delta.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let delta = match self.last_tick {
            Some(last) => {
                let elapsed_ms = (now.saturating_duration_since(last).as_secs_f64() * 1000.0) as f32;
                let delta = self.timing.delta_from_ms(elapsed_ms);
                if delta == NOMINAL_DELTA && elapsed_ms > self.timing.max_elapsed_ms {
                    tracing::debug!(elapsed_ms, "FrameClock: stalled tick clamped");
                }
                delta
            }
            None => NOMINAL_DELTA,
        };
        self.last_tick = Some(now);
        delta
    }

    /// Forget the previous tick, e.g. after the host was suspended
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}
