//! Draw commands and rendering sinks
//!
//! The simulator never touches a drawing surface. Once per tick it produces a
//! [`CaretDraw`] and hands it to a [`CaretSink`], which is responsible for
//! actually painting the pixel region.

use crate::geometry::{Color, Rect};
use serde::{Deserialize, Serialize};

/// A single caret draw command
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaretDraw {
    /// Caret rectangle in logical pixels (top-left origin)
    pub rect: Rect,
    /// Display color after trail attenuation
    pub color: Color,
    /// Whether the caret is visible in the current blink phase
    pub visible: bool,
}

impl CaretDraw {
    pub fn new(rect: Rect, color: Color, visible: bool) -> Self {
        Self {
            rect,
            color,
            visible,
        }
    }

    /// Integer pixel rectangle `(x, y, width, height)`
    ///
    /// Position is truncated toward zero, width is rounded and never
    /// narrower than one pixel.
    pub fn pixel_rect(&self) -> (i32, i32, u32, u32) {
        let width = self.rect.width().round().max(1.0) as u32;
        let height = self.rect.height().round().max(0.0) as u32;
        (
            self.rect.x() as i32,
            self.rect.y() as i32,
            width,
            height,
        )
    }
}

/// Rendering sink receiving one draw command per tick
pub trait CaretSink {
    fn draw(&mut self, command: &CaretDraw);
}

impl<F> CaretSink for F
where
    F: FnMut(&CaretDraw),
{
    fn draw(&mut self, command: &CaretDraw) {
        self(command)
    }
}

/// A sink that records commands for later inspection
#[derive(Debug, Default)]
pub struct RecordingSink {
    commands: Vec<CaretDraw>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[CaretDraw] {
        &self.commands
    }

    /// The most recent command, if any
    pub fn last(&self) -> Option<&CaretDraw> {
        self.commands.last()
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<CaretDraw> {
        std::mem::take(&mut self.commands)
    }

    /// Clear all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl CaretSink for RecordingSink {
    fn draw(&mut self, command: &CaretDraw) {
        self.commands.push(*command);
    }
}
