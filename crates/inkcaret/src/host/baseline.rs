//! Caret baseline tracking
//!
//! Lines can mix font sizes (a heading glyph followed by body text). The
//! caret is positioned by its baseline, and within one line the baseline
//! only ever moves down, so typing small text after a large glyph does not
//! make the caret float. It resets when the caret changes line or after a
//! deletion, since the line may have shrunk.

/// Outcome of one observation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaselineUpdate {
    pub baseline: f32,
    /// The caret is on a different line than at the previous observation
    pub row_changed: bool,
}

#[derive(Clone, Debug, Default)]
pub struct BaselineTracker {
    baseline: Option<f32>,
    line_index: usize,
}

impl BaselineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn baseline(&self) -> Option<f32> {
        self.baseline
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// Re-seat on a known line, e.g. under a pointer click
    pub fn reseat(&mut self, baseline: f32, line_index: usize) {
        self.baseline = Some(baseline);
        self.line_index = line_index;
    }

    /// Observe the caret cell for this tick
    ///
    /// `holding` freezes the baseline (typing or composing); `resets`
    /// discards the same-line maximum (deletion keys).
    pub fn observe(
        &mut self,
        top: f32,
        line_height: f32,
        line_index: usize,
        holding: bool,
        resets: bool,
    ) -> BaselineUpdate {
        let bottom = top + line_height;

        let Some(current) = self.baseline else {
            self.reseat(bottom, line_index);
            return BaselineUpdate {
                baseline: bottom,
                row_changed: false,
            };
        };

        if holding {
            return BaselineUpdate {
                baseline: current,
                row_changed: false,
            };
        }

        let row_changed = line_index != self.line_index;
        let baseline = if row_changed || resets {
            self.line_index = line_index;
            bottom
        } else {
            current.max(bottom)
        };
        self.baseline = Some(baseline);

        BaselineUpdate {
            baseline,
            row_changed,
        }
    }
}
