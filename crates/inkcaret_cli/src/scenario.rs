//! Scripted editing sessions
//!
//! A scenario is a TOML file describing the text surface and a timeline of
//! editing events:
//!
//! ```toml
//! duration_ms = 1500
//!
//! [surface]
//! font_size = 12.0
//! line_height = 16.0
//! char_width = 8.0
//! composition = true
//!
//! [[events]]
//! at_ms = 100
//! kind = "type"
//! count = 5
//!
//! [[events]]
//! at_ms = 600
//! kind = "click"
//! x = 240.0
//! y = 48.0
//! line = 3
//! ```

use anyhow::{Context, Result};
use inkcaret::KeyKind;
use inkcaret_core::{CaretLayout, Color, ImeCapability, Point};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A scripted editing session
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    /// Total simulated time
    pub duration_ms: u64,
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

/// Static metrics of the simulated text surface
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub font_size: f32,
    pub line_height: f32,
    pub char_width: f32,
    /// Where the caret starts (top-left of the cell)
    pub origin: Point,
    pub color: Color,
    /// Whether the host reports IME composition
    pub composition: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            line_height: 16.0,
            char_width: 8.0,
            origin: Point::new(0.0, 0.0),
            color: Color::BLACK,
            composition: true,
        }
    }
}

/// One timed event
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// Layout moved the caret without input (selection change, reflow)
    Caret { x: f32, y: f32, line: usize },
    /// A key went down
    Key { key: KeyKind },
    /// Text content changed
    Text,
    /// Type `count` characters on the current line
    Type {
        #[serde(default = "one")]
        count: u32,
    },
    /// Pointer click at a cell's top-left
    Click { x: f32, y: f32, line: usize },
    /// IME composition opened or closed
    Compose { active: bool },
    /// The host stopped ticking for `ms`
    Stall { ms: u64 },
}

fn one() -> u32 {
    1
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut scenario: Scenario = toml::from_str(source)?;
        if !(scenario.surface.line_height.is_finite() && scenario.surface.line_height > 0.0) {
            anyhow::bail!("surface.line_height must be positive");
        }
        // Stable sort keeps same-instant events in file order
        scenario.events.sort_by_key(|event| event.at_ms);
        Ok(scenario)
    }
}

/// Layout collaborator driven by scenario events
#[derive(Debug, Clone)]
pub struct ScriptedLayout {
    pub position: Point,
    pub line: usize,
    pub line_height: f32,
    pub char_width: f32,
    pub font_size: f32,
    pub color: Color,
}

impl ScriptedLayout {
    pub fn new(surface: &SurfaceConfig) -> Self {
        Self {
            position: surface.origin,
            line: 0,
            line_height: surface.line_height,
            char_width: surface.char_width,
            font_size: surface.font_size,
            color: surface.color,
        }
    }

    pub fn move_to(&mut self, x: f32, y: f32, line: usize) {
        self.position = Point::new(x, y);
        self.line = line;
    }

    /// Advance by `count` characters
    pub fn advance_chars(&mut self, count: u32) {
        self.position.x += self.char_width * count as f32;
    }
}

impl CaretLayout for ScriptedLayout {
    fn caret_position(&self) -> Point {
        self.position
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn char_width(&self) -> f32 {
        self.char_width
    }

    fn font_size(&self) -> f32 {
        self.font_size
    }

    fn line_index(&self) -> usize {
        self.line
    }

    fn caret_color(&self) -> Color {
        self.color
    }
}

/// IME collaborator driven by `compose` events
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedIme {
    pub supported: bool,
    pub composing: bool,
}

impl ImeCapability for ScriptedIme {
    fn supports_composition(&self) -> bool {
        self.supported
    }

    fn is_composing(&self) -> bool {
        self.composing
    }
}
