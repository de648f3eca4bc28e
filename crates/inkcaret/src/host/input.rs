//! Keystroke and click timing
//!
//! Turns discrete input events into the typing gates the simulator reads.
//! All time arrives as [`Instant`] so callers (and tests) own the clock.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Key classes the caret cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    Char,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Enter,
    Tab,
    Other,
}

impl KeyKind {
    /// Keys that move the caret backward through text
    pub fn is_deleting(self) -> bool {
        matches!(self, KeyKind::Backspace | KeyKind::Left)
    }

    /// Keys after which the line may have shrunk
    pub fn resets_baseline(self) -> bool {
        matches!(self, KeyKind::Backspace | KeyKind::Left | KeyKind::Delete)
    }
}

#[derive(Clone, Debug)]
pub struct InputTracker {
    typing_timeout: Duration,
    blink_timeout: Duration,
    last_key: Option<KeyKind>,
    last_input: Option<Instant>,
}

impl InputTracker {
    pub fn new(typing_timeout: Duration, blink_timeout: Duration) -> Self {
        Self {
            typing_timeout,
            blink_timeout,
            last_key: None,
            last_input: None,
        }
    }

    pub fn last_key(&self) -> Option<KeyKind> {
        self.last_key
    }

    pub fn register_key(&mut self, key: KeyKind) {
        self.last_key = Some(key);
    }

    /// Text content changed
    pub fn register_input(&mut self, now: Instant) {
        self.last_input = Some(now);
    }

    pub fn since_last_input(&self, now: Instant) -> Option<Duration> {
        self.last_input.map(|at| now.saturating_duration_since(at))
    }

    /// Typing gate for motion: recent text input, or an open composition
    pub fn is_typing(&self, now: Instant, composing: bool) -> bool {
        composing
            || self
                .since_last_input(now)
                .is_some_and(|elapsed| elapsed < self.typing_timeout)
    }

    /// Typing gate for blinking, held open longer than the motion gate
    pub fn recently_typed(&self, now: Instant) -> bool {
        self.since_last_input(now)
            .is_some_and(|elapsed| elapsed < self.blink_timeout)
    }

    pub fn is_deleting(&self) -> bool {
        self.last_key.is_some_and(KeyKind::is_deleting)
    }

    pub fn resets_baseline(&self) -> bool {
        self.last_key.is_some_and(KeyKind::resets_baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> InputTracker {
        InputTracker::new(Duration::from_millis(200), Duration::from_millis(400))
    }

    #[test]
    fn test_no_input_is_not_typing() {
        let t = tracker();
        let now = Instant::now();
        assert!(!t.is_typing(now, false));
        assert!(!t.recently_typed(now));
        assert!(t.is_typing(now, true));
    }

    #[test]
    fn test_typing_windows() {
        let mut t = tracker();
        let start = Instant::now();
        t.register_input(start);

        let at = |ms| start + Duration::from_millis(ms);
        assert!(t.is_typing(at(150), false));
        assert!(t.recently_typed(at(150)));

        assert!(!t.is_typing(at(250), false));
        assert!(t.recently_typed(at(250)));

        assert!(!t.recently_typed(at(450)));
    }

    #[test]
    fn test_deleting_keys() {
        let mut t = tracker();
        assert!(!t.is_deleting());
        t.register_key(KeyKind::Backspace);
        assert!(t.is_deleting());
        t.register_key(KeyKind::Left);
        assert!(t.is_deleting());
        t.register_key(KeyKind::Delete);
        assert!(!t.is_deleting());
        assert!(t.resets_baseline());
        t.register_key(KeyKind::Char);
        assert!(!t.resets_baseline());
    }
}
