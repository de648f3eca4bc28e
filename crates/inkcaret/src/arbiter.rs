//! Regime selection
//!
//! Transitions are edge-triggered: a click or a row change starts a jump on
//! the tick it is reported, and typing cancels a jump that was not marked to
//! survive it. Otherwise the previous regime carries over.

use crate::config::{JumpConfig, JumpStrategy};
use crate::regime::{EaseJump, JumpTrigger, Regime, SpringJump};
use crate::signal::TargetSignal;
use inkcaret_animation::Transition;
use inkcaret_core::Point;

/// Result of arbitrating one tick
#[derive(Clone, Debug, PartialEq)]
pub struct Arbitration {
    /// Regime to integrate under this tick
    pub regime: Regime,
    /// Set when a new jump started this tick; kinematics must reset velocity
    pub entered: Option<JumpTrigger>,
}

/// Picks the regime for each tick
#[derive(Clone, Debug)]
pub struct ModeArbiter {
    jump: JumpConfig,
}

impl ModeArbiter {
    pub fn new(jump: JumpConfig) -> Self {
        Self { jump }
    }

    /// The discrete-jump trigger carried by `signal`, if any
    ///
    /// A click wins over a row change reported on the same tick.
    pub fn trigger(signal: &TargetSignal) -> Option<JumpTrigger> {
        if let Some(click) = signal.click {
            if click.target.is_finite() {
                return Some(JumpTrigger::Click(click.target));
            }
        }
        if signal.row_changed {
            return Some(JumpTrigger::RowChange(signal.target));
        }
        None
    }

    /// Decide the regime for this tick
    ///
    /// `current` is the regime left by the previous tick and `position` the
    /// caret position it left behind, which becomes the start of any jump.
    pub fn arbitrate(&self, current: Regime, signal: &TargetSignal, position: Point) -> Arbitration {
        if let Some(trigger) = Self::trigger(signal) {
            tracing::debug!(
                ?trigger,
                from = %current.kind(),
                strategy = ?self.jump.strategy,
                "ModeArbiter: starting jump"
            );
            return Arbitration {
                regime: self.start_jump(trigger, position),
                entered: Some(trigger),
            };
        }

        if signal.typing_forward && current.cancellable_by_typing() {
            tracing::debug!(from = %current.kind(), "ModeArbiter: typing cancelled jump");
            return Arbitration {
                regime: Regime::Organic,
                entered: None,
            };
        }

        Arbitration {
            regime: current,
            entered: None,
        }
    }

    fn start_jump(&self, trigger: JumpTrigger, position: Point) -> Regime {
        let preserve_on_typing = trigger.preserve_on_typing();
        match self.jump.strategy {
            JumpStrategy::Ease => Regime::Animated(EaseJump {
                transition: Transition::new(
                    position,
                    trigger.target(),
                    self.jump.duration_ms,
                    self.jump.easing,
                ),
                preserve_on_typing,
            }),
            JumpStrategy::Spring => {
                Regime::ClickSpring(SpringJump::new(trigger.target(), preserve_on_typing))
            }
        }
    }
}
