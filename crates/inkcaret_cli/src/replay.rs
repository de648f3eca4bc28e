//! Scenario replay
//!
//! Feeds a [`Scenario`] through a [`CaretDriver`] one tick at a time. On the
//! virtual clock every tick lands exactly one interval after the previous
//! one (plus any scripted stall); in real time a [`TickPacer`] sets the
//! cadence and the host's actual scheduling jitter flows into the deltas.

use crate::pacer::TickPacer;
use crate::scenario::{EventKind, Scenario, ScriptedIme, ScriptedLayout};
use anyhow::Result;
use inkcaret::{CaretConfig, CaretDriver, KeyKind};
use inkcaret_core::{CaretDraw, CaretLayout, Point, RecordingSink};
use serde::Serialize;
use std::thread;
use std::time::{Duration, Instant};

/// One emitted tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickRecord {
    pub tick: u64,
    /// Scripted time of the tick
    pub time_ms: f32,
    pub regime: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
    pub color: [u8; 4],
}

impl TickRecord {
    fn new(tick: u64, time_ms: f32, regime: String, draw: &CaretDraw) -> Self {
        Self {
            tick,
            time_ms,
            regime,
            x: draw.rect.x(),
            y: draw.rect.y(),
            width: draw.rect.width(),
            height: draw.rect.height(),
            visible: draw.visible,
            color: draw.color.to_rgba8(),
        }
    }
}

/// Totals for a finished replay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    pub ticks: u64,
    pub hidden_ticks: u64,
    /// Ticks the pacer dropped after an overrun (real time only)
    pub coalesced: u64,
    pub final_position: Point,
}

type ScenarioDriver = CaretDriver<ScriptedLayout, ScriptedIme, RecordingSink>;

pub struct Replay {
    scenario: Scenario,
    driver: ScenarioDriver,
    tick_interval_ms: f32,
    next_event: usize,
}

impl Replay {
    pub fn new(scenario: Scenario, config: CaretConfig) -> Result<Self> {
        let tick_interval_ms = config.timing.tick_interval_ms;
        let layout = ScriptedLayout::new(&scenario.surface);
        let ime = ScriptedIme {
            supported: scenario.surface.composition,
            composing: false,
        };
        let driver = CaretDriver::new(config, layout, ime, RecordingSink::new())?;

        Ok(Self {
            scenario,
            driver,
            tick_interval_ms,
            next_event: 0,
        })
    }

    /// Replay on a synthetic clock; output is fully deterministic
    pub fn run_virtual<F>(&mut self, mut emit: F) -> Result<ReplaySummary>
    where
        F: FnMut(&TickRecord) -> Result<()>,
    {
        let start = Instant::now();
        let duration_ms = self.scenario.duration_ms as f32;
        let mut stalled = Duration::ZERO;
        let mut summary = ReplaySummary::default();

        let mut tick: u64 = 0;
        loop {
            let script_ms = tick as f32 * self.tick_interval_ms;
            if script_ms > duration_ms {
                break;
            }

            let event_time = start + millis(script_ms) + stalled;
            stalled += self.apply_due(script_ms, event_time);
            let now = start + millis(script_ms) + stalled;

            self.tick_once(now, script_ms, &mut summary, &mut emit)?;
            tick += 1;
        }

        summary.final_position = self.driver.simulator().state().position;
        Ok(summary)
    }

    /// Replay against the wall clock with a fixed-rate pacer
    pub fn run_realtime<F>(&mut self, mut emit: F) -> Result<ReplaySummary>
    where
        F: FnMut(&TickRecord) -> Result<()>,
    {
        let start = Instant::now();
        let duration_ms = self.scenario.duration_ms as f32;
        let mut pacer = TickPacer::new(millis(self.tick_interval_ms), start);
        tracing::debug!(interval = ?pacer.interval(), "Replay: pacing in real time");
        let mut summary = ReplaySummary::default();

        loop {
            let script_ms = elapsed_ms(start, Instant::now());
            let stall = self.apply_due(script_ms, Instant::now());
            if !stall.is_zero() {
                tracing::info!(stall_ms = stall.as_millis() as u64, "Simulating host stall");
                thread::sleep(stall);
            }

            let now = Instant::now();
            self.tick_once(now, elapsed_ms(start, now), &mut summary, &mut emit)?;
            if script_ms >= duration_ms {
                break;
            }
            pacer.wait();
        }

        summary.coalesced = pacer.skipped();
        summary.final_position = self.driver.simulator().state().position;
        Ok(summary)
    }

    fn tick_once<F>(
        &mut self,
        now: Instant,
        script_ms: f32,
        summary: &mut ReplaySummary,
        emit: &mut F,
    ) -> Result<()>
    where
        F: FnMut(&TickRecord) -> Result<()>,
    {
        self.driver.tick(now);
        let regime = self.driver.simulator().regime_kind().to_string();

        for draw in self.driver.sink_mut().take_commands() {
            summary.ticks += 1;
            if !draw.visible {
                summary.hidden_ticks += 1;
            }
            emit(&TickRecord::new(summary.ticks, script_ms, regime.clone(), &draw))?;
        }
        Ok(())
    }

    /// Apply every event due at `script_ms`; returns the total stall requested
    fn apply_due(&mut self, script_ms: f32, now: Instant) -> Duration {
        let mut stall = Duration::ZERO;

        while let Some(event) = self.scenario.events.get(self.next_event) {
            if event.at_ms as f32 > script_ms {
                break;
            }
            let kind = event.kind.clone();
            self.next_event += 1;

            tracing::debug!(at_ms = event.at_ms, ?kind, "Replay: event");
            match kind {
                EventKind::Caret { x, y, line } => {
                    self.driver.layout_mut().move_to(x, y, line);
                    self.driver.on_selection_changed();
                }
                EventKind::Key { key } => self.driver.on_key(key),
                EventKind::Text => self.driver.on_text_input(now),
                EventKind::Type { count } => {
                    self.driver.on_key(KeyKind::Char);
                    self.driver.layout_mut().advance_chars(count);
                    self.driver.on_text_input(now);
                    self.driver.on_selection_changed();
                }
                EventKind::Click { x, y, line } => {
                    let line_height = self.driver.layout().line_height();
                    self.driver.layout_mut().move_to(x, y, line);
                    self.driver.on_click(Point::new(x, y), line_height, line);
                }
                EventKind::Compose { active } => self.driver.ime_mut().composing = active,
                EventKind::Stall { ms } => stall += Duration::from_millis(ms),
            }
        }

        stall
    }
}

fn millis(ms: f32) -> Duration {
    Duration::from_micros((ms.max(0.0) * 1000.0).round() as u64)
}

fn elapsed_ms(start: Instant, now: Instant) -> f32 {
    now.saturating_duration_since(start).as_secs_f32() * 1000.0
}
