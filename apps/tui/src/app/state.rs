use geoclock::config::ClockConfig;
use geoclock::engine::{ClockCommand, ClockSource, Engine, FrameState, SystemClock, Viewport};
use ratatui::style::Color;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tachyonfx::{fx, Effect, Interpolation};

const HINT_FX_MS: u32 = 700;

pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub engine: Engine,
    pub clock: SystemClock,
    pub frame: Option<FrameState>,
    pub viewport: Viewport,
    pub last_frame: Instant,
    pub last_tick: Duration,
    pub hint_fx: Mutex<Option<Effect>>,
    hint_was_active: bool,
}

impl App {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            running: true,
            show_help: false,
            engine: config.build_engine(),
            clock: SystemClock::new(),
            frame: None,
            viewport: Viewport::new(1.0, 1.0),
            last_frame: Instant::now(),
            last_tick: Duration::ZERO,
            hint_fx: Mutex::new(None),
            hint_was_active: false,
        }
    }

    /// Applies a command between frames; the next `update` sees its effect.
    pub fn dispatch(&mut self, command: ClockCommand) {
        let now_ms = self.clock.monotonic_ms();
        self.engine.apply(command, now_ms);
    }

    pub fn is_typing(&self) -> bool {
        self.engine.input().is_typing()
    }

    /// Advances the engine by the real time since the previous frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;

        let delta_ms = u64::try_from(self.last_tick.as_millis()).unwrap_or(u64::MAX);
        let frame = self.engine.tick(&self.clock, delta_ms, self.viewport, &[]);

        if frame.hint && !self.hint_was_active {
            self.start_hint_fx();
        }
        self.hint_was_active = frame.hint;
        self.clear_finished_fx();
        self.frame = Some(frame);
    }

    fn start_hint_fx(&self) {
        if let Ok(mut slot) = self.hint_fx.lock() {
            *slot = Some(fx::fade_from_fg(
                Color::Red,
                (HINT_FX_MS, Interpolation::QuadOut),
            ));
        }
    }

    fn clear_finished_fx(&self) {
        if let Ok(mut slot) = self.hint_fx.lock() {
            if slot.as_ref().is_some_and(Effect::done) {
                *slot = None;
            }
        }
    }

    /// Seconds since start, for cursor blink and similar cosmetic timing.
    pub fn animation_seconds(&self) -> f64 {
        self.engine.elapsed_ms() as f64 / 1000.0
    }
}
