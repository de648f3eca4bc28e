//! Motion regimes
//!
//! Exactly one regime drives the caret on any tick. Jump regimes own the
//! data they need, so an eased jump cannot carry stale spring state and
//! vice versa.

use inkcaret_animation::Transition;
use inkcaret_core::Point;

/// What caused a discrete jump
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JumpTrigger {
    /// Pointer click; cancelled by typing
    Click(Point),
    /// Caret moved to another line; finishes even if typing continues
    RowChange(Point),
}

impl JumpTrigger {
    pub fn target(&self) -> Point {
        match self {
            JumpTrigger::Click(target) | JumpTrigger::RowChange(target) => *target,
        }
    }

    pub fn preserve_on_typing(&self) -> bool {
        matches!(self, JumpTrigger::RowChange(_))
    }
}

/// An eased jump in flight
#[derive(Clone, Debug, PartialEq)]
pub struct EaseJump {
    pub transition: Transition<Point>,
    pub preserve_on_typing: bool,
}

/// A spring jump in flight
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringJump {
    pub target: Point,
    pub preserve_on_typing: bool,
    pub x_settled: bool,
    pub y_settled: bool,
}

impl SpringJump {
    pub fn new(target: Point, preserve_on_typing: bool) -> Self {
        Self {
            target,
            preserve_on_typing,
            x_settled: false,
            y_settled: false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.x_settled && self.y_settled
    }
}

/// The active motion model
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Regime {
    /// Typing and idle flow: ratcheted spring on X, exponential approach on Y
    #[default]
    Organic,
    /// Time-bounded eased jump
    Animated(EaseJump),
    /// Symmetric X/Y spring jump
    ClickSpring(SpringJump),
}

/// Data-free regime tag for logging and reporting
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegimeKind {
    Organic,
    Animated,
    ClickSpring,
}

impl Regime {
    pub fn kind(&self) -> RegimeKind {
        match self {
            Regime::Organic => RegimeKind::Organic,
            Regime::Animated(_) => RegimeKind::Animated,
            Regime::ClickSpring(_) => RegimeKind::ClickSpring,
        }
    }

    /// Whether a discrete jump is in flight
    pub fn is_jump(&self) -> bool {
        !matches!(self, Regime::Organic)
    }

    /// Whether typing may cancel the active regime
    pub fn cancellable_by_typing(&self) -> bool {
        match self {
            Regime::Organic => false,
            Regime::Animated(jump) => !jump.preserve_on_typing,
            Regime::ClickSpring(jump) => !jump.preserve_on_typing,
        }
    }

    /// Target of the jump in flight, if any
    pub fn jump_target(&self) -> Option<Point> {
        match self {
            Regime::Organic => None,
            Regime::Animated(jump) => Some(*jump.transition.target()),
            Regime::ClickSpring(jump) => Some(jump.target),
        }
    }
}

impl std::fmt::Display for RegimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RegimeKind::Organic => "organic",
            RegimeKind::Animated => "animated",
            RegimeKind::ClickSpring => "click-spring",
        };
        f.write_str(name)
    }
}
