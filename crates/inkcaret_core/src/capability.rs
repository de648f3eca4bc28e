//! Collaborator capability traits
//!
//! The caret simulator consumes only scalar and boolean signals from the
//! surrounding editor. These traits are the seams through which a host
//! application supplies them:
//!
//! - [`CaretLayout`] - text layout and styling at the logical caret position
//! - [`ImeCapability`] - input method composition state

use crate::geometry::{Color, Point};

/// Layout metrics at the logical caret position
///
/// Implemented by the text surface that owns layout. All values describe
/// the current selection start and are re-queried every tick.
pub trait CaretLayout {
    /// Top-left of the caret cell in surface coordinates
    fn caret_position(&self) -> Point;

    /// Height of the line box at the caret
    fn line_height(&self) -> f32;

    /// Estimated advance of a full-width character at the caret
    fn char_width(&self) -> f32;

    /// Nominal font size at the caret, used to scale the ratchet threshold
    fn font_size(&self) -> f32;

    /// Zero-based index of the line holding the caret
    fn line_index(&self) -> usize;

    /// Text color at the caret
    fn caret_color(&self) -> Color;
}

/// Input method composition capability
///
/// Composition queries are host API calls with no portable equivalent, so
/// they are injected rather than performed here.
pub trait ImeCapability {
    /// Whether this host can report composition state at all
    fn supports_composition(&self) -> bool;

    /// Whether a composition string is currently being edited
    fn is_composing(&self) -> bool;
}

/// Capability for hosts without an input method
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIme;

impl ImeCapability for NoIme {
    fn supports_composition(&self) -> bool {
        false
    }

    fn is_composing(&self) -> bool {
        false
    }
}
