//! Per-tick input signals
//!
//! Collaborators resolve keystrokes, clicks, IME state and layout into a
//! [`TargetSignal`] before each tick. The simulator treats it as read-only
//! data; nothing in it is a callback.

use inkcaret_core::{Color, Point};

/// A pointer click that happened since the previous tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerClick {
    /// Caret baseline position under the pointer
    pub target: Point,
}

impl PointerClick {
    pub fn new(target: Point) -> Self {
        Self { target }
    }
}

/// Everything the simulator needs to know about one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSignal {
    /// Where the caret should end up: x of the caret cell, y of its baseline
    pub target: Point,
    /// Height of the line box at the caret
    pub line_height: f32,
    /// Estimated character advance at the caret
    pub char_width: f32,
    /// Backward jump below which forward typing keeps the caret pinned
    pub ratchet_threshold: f32,
    /// Nominal caret color at the target
    pub color: Color,
    /// The user is typing (recent keystroke or active composition)
    pub typing_forward: bool,
    /// The last key removed text or moved backward
    pub deleting: bool,
    /// An IME composition is in progress
    pub composing: bool,
    /// A keystroke happened recently enough to suppress blinking
    pub recently_typed: bool,
    /// The caret moved to another line since the previous tick
    pub row_changed: bool,
    /// A pointer click to jump to, if one happened since the previous tick
    pub click: Option<PointerClick>,
}

impl TargetSignal {
    /// A quiet signal: caret at `target`, nobody typing
    pub fn new(target: Point, line_height: f32) -> Self {
        Self {
            target,
            line_height,
            char_width: line_height,
            ratchet_threshold: line_height * 3.0,
            color: Color::BLACK,
            typing_forward: false,
            deleting: false,
            composing: false,
            recently_typed: false,
            row_changed: false,
            click: None,
        }
    }

    /// Whether the layout collaborator produced a usable position
    ///
    /// Non-finite coordinates and non-positive line heights are sentinels
    /// for "no caret position this tick".
    pub fn is_valid(&self) -> bool {
        self.target.is_finite() && self.line_height.is_finite() && self.line_height > 0.0
    }

    pub fn ratchet_threshold(mut self, threshold: f32) -> Self {
        self.ratchet_threshold = threshold;
        self
    }

    pub fn char_width(mut self, width: f32) -> Self {
        self.char_width = width;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Mark as typing; typing also counts as recent input for blinking
    pub fn typing(mut self, typing: bool) -> Self {
        self.typing_forward = typing;
        self.recently_typed |= typing;
        self
    }

    pub fn deleting(mut self, deleting: bool) -> Self {
        self.deleting = deleting;
        self
    }

    pub fn composing(mut self, composing: bool) -> Self {
        self.composing = composing;
        self
    }

    pub fn recently_typed(mut self, recently_typed: bool) -> Self {
        self.recently_typed = recently_typed;
        self
    }

    pub fn row_changed(mut self, row_changed: bool) -> Self {
        self.row_changed = row_changed;
        self
    }

    pub fn click(mut self, target: Point) -> Self {
        self.click = Some(PointerClick::new(target));
        self
    }
}
