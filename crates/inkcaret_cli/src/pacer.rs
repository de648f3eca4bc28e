//! Fixed-rate tick pacing for real-time replay
//!
//! Ticks are serialized: the next one is only scheduled once the previous
//! one has returned. When a tick overruns by more than one interval the
//! backlog is dropped and pacing resumes at the next future deadline.

use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TickPacer {
    interval: Duration,
    deadline: Instant,
    skipped: u64,
}

impl TickPacer {
    /// Start pacing with the first deadline one interval after `start`
    pub fn new(interval: Duration, start: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            deadline: start + interval,
            skipped: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Deadlines dropped so far because a tick overran
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Consume the current deadline and schedule the next one after `now`
    ///
    /// Returns the number of deadlines skipped to get there.
    pub fn advance(&mut self, now: Instant) -> u64 {
        self.deadline += self.interval;
        if self.deadline > now {
            return 0;
        }

        let behind = now.saturating_duration_since(self.deadline);
        let missed = (behind.as_nanos() / self.interval.as_nanos()) as u32 + 1;
        self.deadline += self.interval * missed;
        self.skipped += u64::from(missed);
        tracing::debug!(missed, "TickPacer: coalesced overdue ticks");
        u64::from(missed)
    }

    /// Sleep until the current deadline, then schedule the next
    pub fn wait(&mut self) {
        let now = Instant::now();
        let deadline = self.deadline();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        self.advance(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_on_time_ticks_keep_cadence() {
        let start = Instant::now();
        let mut pacer = TickPacer::new(ms(10), start);
        assert_eq!(pacer.deadline(), start + ms(10));

        assert_eq!(pacer.advance(start + ms(11)), 0);
        assert_eq!(pacer.deadline(), start + ms(20));
        assert_eq!(pacer.advance(start + ms(20) + Duration::from_micros(500)), 0);
        assert_eq!(pacer.deadline(), start + ms(30));
    }

    #[test]
    fn test_overrun_coalesces_backlog() {
        let start = Instant::now();
        let mut pacer = TickPacer::new(ms(10), start);

        // A 45 ms stall after the first deadline
        let skipped = pacer.advance(start + ms(55));
        // Deadlines at 20, 30, 40 and 50 ms are dropped
        assert_eq!(skipped, 4);
        assert_eq!(pacer.deadline(), start + ms(60));
        assert_eq!(pacer.skipped(), 4);

        // Back to one tick per interval
        assert_eq!(pacer.advance(start + ms(61)), 0);
        assert_eq!(pacer.deadline(), start + ms(70));
    }

    #[test]
    fn test_deadline_exactly_now_is_skipped() {
        let start = Instant::now();
        let mut pacer = TickPacer::new(ms(10), start);
        assert_eq!(pacer.advance(start + ms(20)), 1);
        assert_eq!(pacer.deadline(), start + ms(30));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let pacer = TickPacer::new(Duration::ZERO, Instant::now());
        assert_eq!(pacer.interval(), ms(1));
    }
}
