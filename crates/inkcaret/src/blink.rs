//! Activity-gated blink
//!
//! The caret stays solid while the user is typing or composing. Once input
//! goes quiet it toggles every `interval` ticks.

use crate::config::BlinkConfig;

#[derive(Clone, Debug)]
pub struct BlinkScheduler {
    interval: u64,
    counter: u64,
    visible: bool,
}

impl BlinkScheduler {
    pub fn new(config: &BlinkConfig) -> Self {
        Self {
            interval: u64::from(config.interval_ticks.max(1)),
            counter: 0,
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Restart the cycle with the caret shown
    pub fn reset(&mut self) {
        self.counter = 0;
        self.visible = true;
    }

    /// Advance one tick and return visibility
    pub fn tick(&mut self, composing: bool, recently_typed: bool) -> bool {
        if composing || recently_typed {
            self.reset();
            return true;
        }

        self.counter += 1;
        self.visible = self.counter % (2 * self.interval) < self.interval;
        self.visible
    }
}
