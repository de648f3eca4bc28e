//! Host-side driver
//!
//! [`CaretDriver`] is the glue between an editing surface and the
//! simulator. Event handlers (`on_key`, `on_text_input`, `on_click`,
//! `on_selection_changed`) run synchronously between ticks and only record
//! what happened; [`CaretDriver::tick`] then polls the collaborators, builds
//! one [`TargetSignal`], advances the simulator and paints through the sink.
//!
//! Taking `&mut self` for both events and ticks means a tick can never
//! re-enter itself or overlap an event.

use super::baseline::BaselineTracker;
use super::input::{InputTracker, KeyKind};
use crate::config::CaretConfig;
use crate::error::Result;
use crate::signal::{PointerClick, TargetSignal};
use crate::simulator::CaretSimulator;
use inkcaret_animation::FrameClock;
use inkcaret_core::{CaretDraw, CaretLayout, CaretSink, ImeCapability, Point};
use std::time::{Duration, Instant};

pub struct CaretDriver<L, I, S> {
    layout: L,
    ime: I,
    sink: S,
    clock: FrameClock,
    input: InputTracker,
    baseline: BaselineTracker,
    simulator: CaretSimulator,
    pending_click: Option<PointerClick>,
    ratchet_multiplier: f32,
}

impl<L, I, S> CaretDriver<L, I, S>
where
    L: CaretLayout,
    I: ImeCapability,
    S: CaretSink,
{
    pub fn new(config: CaretConfig, layout: L, ime: I, sink: S) -> Result<Self> {
        let timing = &config.timing;
        let clock = FrameClock::new(timing.tick_timing());
        let input = InputTracker::new(
            Duration::from_millis(timing.typing_timeout_ms),
            Duration::from_millis(timing.blink_timeout_ms),
        );
        let ratchet_multiplier = timing.ratchet_multiplier;
        let simulator = CaretSimulator::new(config)?;

        if !ime.supports_composition() {
            tracing::debug!("CaretDriver: host has no composition support");
        }

        Ok(Self {
            layout,
            ime,
            sink,
            clock,
            input,
            baseline: BaselineTracker::new(),
            simulator,
            pending_click: None,
            ratchet_multiplier,
        })
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    pub fn ime_mut(&mut self) -> &mut I {
        &mut self.ime
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn simulator(&self) -> &CaretSimulator {
        &self.simulator
    }

    /// A key went down
    pub fn on_key(&mut self, key: KeyKind) {
        self.input.register_key(key);
        self.simulator.reset_blink();
    }

    /// The text content changed
    pub fn on_text_input(&mut self, now: Instant) {
        self.input.register_input(now);
    }

    /// The selection (and with it the logical caret) moved
    pub fn on_selection_changed(&mut self) {
        self.simulator.reset_blink();
    }

    /// A pointer click placed the caret in the cell at `top_left`
    pub fn on_click(&mut self, top_left: Point, line_height: f32, line_index: usize) {
        let target = top_left.offset_y(line_height);
        self.baseline.reseat(target.y, line_index);
        self.pending_click = Some(PointerClick::new(target));
        self.simulator.reset_blink();
    }

    /// Whether an IME composition is open, as far as the host can tell
    pub fn is_composing(&self) -> bool {
        self.ime.supports_composition() && self.ime.is_composing()
    }

    /// Resolve collaborator state into this tick's signal
    ///
    /// Consumes any pending click.
    pub fn poll_signal(&mut self, now: Instant) -> TargetSignal {
        let composing = self.is_composing();
        let typing = self.input.is_typing(now, composing);

        let top_left = self.layout.caret_position();
        let line_height = self.layout.line_height();
        let update = self.baseline.observe(
            top_left.y,
            line_height,
            self.layout.line_index(),
            typing,
            self.input.resets_baseline(),
        );

        let mut signal = TargetSignal::new(Point::new(top_left.x, update.baseline), line_height)
            .char_width(self.layout.char_width())
            .ratchet_threshold(self.layout.font_size() * self.ratchet_multiplier)
            .color(self.layout.caret_color())
            .typing(typing)
            .deleting(self.input.is_deleting())
            .composing(composing)
            .recently_typed(self.input.recently_typed(now))
            .row_changed(update.row_changed);
        signal.click = self.pending_click.take();
        signal
    }

    /// Run one simulation step at `now` and paint it
    pub fn tick(&mut self, now: Instant) -> CaretDraw {
        let dt = self.clock.tick(now);
        let signal = self.poll_signal(now);
        let draw = self.simulator.advance(&signal, dt);
        self.sink.draw(&draw);
        draw
    }

    /// Forget the previous tick time, e.g. after the window was hidden
    pub fn resume(&mut self) {
        self.clock.reset();
    }
}
