use crate::domain::{PhaseMode, Point, RouletteState, TimeMode};
use crate::engine::geometry::{Angles, Composition, Geometry, HourLabel, Markers};
use crate::engine::input::{ClockCommand, InputController, Targets};
use crate::engine::phase::{Alphas, PhaseScheduler, PhaseWindows};
use crate::engine::roulette::RouletteController;
use crate::engine::time_source::{ClockSource, TimeValue, TimeSource};
use crate::engine::viewport::{ContentBounds, Transform, Viewport};
use serde::Serialize;

/// Fixed ruler segment for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ruler {
    pub top: Point,
    pub bottom: Point,
}

/// Fixed seconds ellipse for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ellipse {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameState {
    pub time: TimeValue,
    pub time_label: String,
    pub time_mode: TimeMode,
    pub roulette: RouletteState,
    pub phase: PhaseMode,
    pub cycle_time: f64,
    pub alphas: Alphas,
    pub viewport: Viewport,
    pub transform: Transform,
    pub bounds: ContentBounds,
    pub hour_shape: [Point; 4],
    pub ruler: Ruler,
    pub ellipse: Ellipse,
    pub markers: Markers,
    pub angles: Angles,
    pub hour_labels: Vec<HourLabel>,
    pub entry: Option<String>,
    pub hint: bool,
}

impl FrameState {
    pub const fn time_mode_label(&self) -> &'static str {
        self.time_mode.label()
    }

    pub const fn roulette_label(&self) -> &'static str {
        self.roulette.label()
    }

    pub const fn phase_label(&self) -> &'static str {
        self.phase.label()
    }
}

/// Owns all state that persists between frames.
#[derive(Debug)]
pub struct Engine {
    time: TimeSource,
    roulette: RouletteController,
    phase: PhaseScheduler,
    input: InputController,
    composition: Composition,
    bounds: ContentBounds,
    elapsed_ms: u64,
}

impl Engine {
    pub fn new(seed: u64) -> Self {
        Self::with_layout(
            seed,
            PhaseWindows::REFERENCE,
            Composition::REFERENCE,
            ContentBounds::REFERENCE,
        )
    }

    pub fn with_layout(
        seed: u64,
        windows: PhaseWindows,
        composition: Composition,
        bounds: ContentBounds,
    ) -> Self {
        Self {
            time: TimeSource::new(seed),
            roulette: RouletteController::new(),
            phase: PhaseScheduler::new(windows),
            input: InputController::new(),
            composition,
            bounds,
            elapsed_ms: 0,
        }
    }

    pub const fn time_source(&self) -> &TimeSource {
        &self.time
    }

    pub const fn roulette(&self) -> &RouletteController {
        &self.roulette
    }

    pub const fn phase(&self) -> &PhaseScheduler {
        &self.phase
    }

    pub const fn input(&self) -> &InputController {
        &self.input
    }

    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn set_manual_time(&mut self, time: TimeValue) {
        self.time.set_manual_time(time.hour, time.minute, time.second);
    }

    pub fn apply(&mut self, command: ClockCommand, now_ms: u64) {
        let mut targets = Targets {
            time: &mut self.time,
            roulette: &mut self.roulette,
            phase: &mut self.phase,
        };
        self.input.apply(command, &mut targets, now_ms);
    }

    /// Runs one frame: input, roulette, phase clock, then the derived state.
    pub fn tick(
        &mut self,
        clock: &impl ClockSource,
        delta_ms: u64,
        viewport: Viewport,
        commands: &[ClockCommand],
    ) -> FrameState {
        let now_ms = clock.monotonic_ms();
        for command in commands {
            self.apply(*command, now_ms);
        }

        self.roulette.update(now_ms, &mut self.time);
        self.elapsed_ms += delta_ms;
        self.phase.advance(delta_ms as f64 / 1000.0);

        self.frame(clock, viewport)
    }

    /// Derived state for the current persisted state; does not mutate anything.
    pub fn frame(&self, clock: &impl ClockSource, viewport: Viewport) -> FrameState {
        let time = self.time.resolve(clock);
        let transform = Transform::compute(&self.bounds, viewport);
        let geometry = Geometry::compute(
            &self.composition,
            &time,
            self.elapsed_ms as f64 / 1000.0,
        );
        let c = &self.composition;

        FrameState {
            time,
            time_label: time.label(),
            time_mode: self.time.mode(),
            roulette: self.roulette.state(),
            phase: self.phase.mode(),
            cycle_time: self.phase.cycle_time(),
            alphas: self.phase.alphas(),
            viewport,
            transform,
            bounds: self.bounds,
            hour_shape: geometry.hour_shape,
            ruler: Ruler {
                top: Point::new(c.minute_x, c.minute_top),
                bottom: Point::new(c.minute_x, c.minute_bottom),
            },
            ellipse: Ellipse {
                center: c.second_center,
                rx: c.second_rx,
                ry: c.second_ry,
            },
            markers: geometry.markers,
            angles: geometry.angles,
            hour_labels: geometry.hour_labels,
            entry: self.input.entry().map(str::to_string),
            hint: self.input.hint_active(clock.monotonic_ms()),
        }
    }
}
