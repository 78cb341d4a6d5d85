use crate::domain::RouletteState;
use crate::engine::time_source::TimeSource;
use std::fmt;

/// Tick period while spinning.
pub const FAST_INTERVAL_MS: f64 = 50.0;
/// Per-tick growth of the period while braking.
pub const BRAKE_FACTOR: f64 = 1.18;
/// Once the braking period grows past this the wheel stops.
pub const STOP_INTERVAL_MS: f64 = 650.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RouletteEvent {
    Toggle,
    Tick,
}

impl fmt::Display for RouletteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toggle => write!(f, "Toggle"),
            Self::Tick => write!(f, "Tick"),
        }
    }
}

/// Randomised time generator: spins at a constant rate, then brakes to a halt.
#[derive(Debug, Clone)]
pub struct RouletteController {
    state: RouletteState,
    interval_ms: f64,
    next_tick_at: Option<u64>,
}

impl RouletteController {
    pub const fn new() -> Self {
        Self {
            state: RouletteState::Off,
            interval_ms: FAST_INTERVAL_MS,
            next_tick_at: None,
        }
    }

    pub const fn state(&self) -> RouletteState {
        self.state
    }

    pub const fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub const fn next_tick_at(&self) -> Option<u64> {
        self.next_tick_at
    }

    /// OFF -> SPIN -> BRAKE -> OFF. Entering SPIN forces the time source to manual.
    pub fn toggle(&mut self, now_ms: u64, time: &mut TimeSource) {
        self.transition(RouletteEvent::Toggle, now_ms);
        if self.state == RouletteState::Spin {
            time.force_manual();
        }
    }

    /// Stops immediately regardless of state.
    pub fn cancel(&mut self) {
        if self.state.is_active() {
            log::debug!("roulette cancelled from {}", self.state.label());
        }
        self.state = RouletteState::Off;
        self.next_tick_at = None;
    }

    /// Fires at most one tick per frame once the scheduled time has passed.
    pub fn update(&mut self, now_ms: u64, time: &mut TimeSource) {
        let Some(due) = self.next_tick_at else {
            return;
        };
        if now_ms < due {
            return;
        }
        time.set_random_time();
        self.transition(RouletteEvent::Tick, now_ms);
    }

    fn schedule(&mut self, at: u64) {
        self.next_tick_at = Some(at);
    }

    fn schedule_after_interval(&mut self, now_ms: u64) {
        self.schedule(now_ms + self.interval_ms.round() as u64);
    }

    fn transition(&mut self, event: RouletteEvent, now_ms: u64) {
        let from = self.state;
        match (self.state, event) {
            (RouletteState::Off, RouletteEvent::Toggle) => {
                self.state = RouletteState::Spin;
                self.interval_ms = FAST_INTERVAL_MS;
                self.schedule(now_ms);
            }
            (RouletteState::Spin, RouletteEvent::Toggle) => {
                self.state = RouletteState::Brake;
                self.schedule_after_interval(now_ms);
            }
            (RouletteState::Brake, RouletteEvent::Toggle) => {
                self.state = RouletteState::Off;
                self.next_tick_at = None;
            }
            (RouletteState::Spin, RouletteEvent::Tick) => {
                self.interval_ms = FAST_INTERVAL_MS;
                self.schedule_after_interval(now_ms);
            }
            (RouletteState::Brake, RouletteEvent::Tick) => {
                self.interval_ms *= BRAKE_FACTOR;
                self.schedule_after_interval(now_ms);
                if self.interval_ms > STOP_INTERVAL_MS {
                    self.state = RouletteState::Off;
                    self.next_tick_at = None;
                }
            }
            (RouletteState::Off, RouletteEvent::Tick) => {
                self.next_tick_at = None;
            }
        }

        if from != self.state {
            log::debug!(
                "roulette {} -> {} on {event} (interval {:.1}ms)",
                from.label(),
                self.state.label(),
                self.interval_ms
            );
        }
    }
}

impl Default for RouletteController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeMode;

    fn fire_next(roulette: &mut RouletteController, time: &mut TimeSource) -> u64 {
        let due = roulette.next_tick_at().unwrap_or_default();
        roulette.update(due, time);
        due
    }

    #[test]
    fn toggle_from_off_spins_fast_and_forces_manual() {
        let mut time = TimeSource::new(7);
        let mut roulette = RouletteController::new();

        roulette.toggle(1_000, &mut time);

        assert_eq!(roulette.state(), RouletteState::Spin);
        assert!((roulette.interval_ms() - FAST_INTERVAL_MS).abs() < f64::EPSILON);
        assert_eq!(roulette.next_tick_at(), Some(1_000));
        assert_eq!(time.mode(), TimeMode::Manual);
    }

    #[test]
    fn spinning_keeps_interval_fast() {
        let mut time = TimeSource::new(7);
        let mut roulette = RouletteController::new();
        roulette.toggle(0, &mut time);

        for _ in 0..25 {
            let due = fire_next(&mut roulette, &mut time);
            assert_eq!(roulette.state(), RouletteState::Spin);
            assert!((roulette.interval_ms() - FAST_INTERVAL_MS).abs() < f64::EPSILON);
            assert_eq!(roulette.next_tick_at(), Some(due + 50));
        }
    }

    #[test]
    fn no_tick_before_schedule() {
        let mut time = TimeSource::new(7);
        let mut roulette = RouletteController::new();
        roulette.toggle(0, &mut time);
        roulette.update(0, &mut time);
        let value = time.manual_value();

        roulette.update(49, &mut time);
        assert_eq!(time.manual_value(), value);
        assert_eq!(roulette.next_tick_at(), Some(50));
    }

    #[test]
    fn braking_grows_interval_until_it_stops() {
        let mut time = TimeSource::new(7);
        let mut roulette = RouletteController::new();
        roulette.toggle(0, &mut time);
        fire_next(&mut roulette, &mut time);

        roulette.toggle(10, &mut time);
        assert_eq!(roulette.state(), RouletteState::Brake);
        assert_eq!(roulette.next_tick_at(), Some(60));

        let mut previous = roulette.interval_ms();
        let mut ticks = 0;
        while roulette.state() == RouletteState::Brake {
            fire_next(&mut roulette, &mut time);
            assert!(roulette.interval_ms() > previous);
            previous = roulette.interval_ms();
            ticks += 1;
            assert!(ticks < 100, "brake never stopped");
        }

        assert_eq!(roulette.state(), RouletteState::Off);
        assert!(roulette.interval_ms() > STOP_INTERVAL_MS);
        assert_eq!(roulette.next_tick_at(), None);
        assert_eq!(time.mode(), TimeMode::Manual);
    }

    #[test]
    fn toggle_while_braking_is_an_emergency_stop() {
        let mut time = TimeSource::new(7);
        let mut roulette = RouletteController::new();
        roulette.toggle(0, &mut time);
        roulette.toggle(5, &mut time);
        roulette.toggle(6, &mut time);

        assert_eq!(roulette.state(), RouletteState::Off);
        assert_eq!(roulette.next_tick_at(), None);

        let value = time.manual_value();
        roulette.update(10_000, &mut time);
        assert_eq!(time.manual_value(), value);
    }

    #[test]
    fn restarting_resets_to_fast() {
        let mut time = TimeSource::new(7);
        let mut roulette = RouletteController::new();
        roulette.toggle(0, &mut time);
        roulette.toggle(0, &mut time);
        for _ in 0..3 {
            fire_next(&mut roulette, &mut time);
        }
        roulette.cancel();
        roulette.toggle(500, &mut time);
        assert!((roulette.interval_ms() - FAST_INTERVAL_MS).abs() < f64::EPSILON);
    }
}
