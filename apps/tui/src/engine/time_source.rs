use crate::domain::TimeMode;
use chrono::Timelike;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;

/// Wall-clock reading handed over by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Host clock: a wall clock plus a monotonic millisecond counter.
pub trait ClockSource {
    fn wall_time(&self) -> WallTime;
    fn monotonic_ms(&self) -> u64;
}

/// Reads the local wall clock through chrono and measures monotonic time from construction.
#[derive(Debug)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for SystemClock {
    fn wall_time(&self) -> WallTime {
        let now = chrono::Local::now();
        WallTime {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second().min(59) as u8,
        }
    }

    fn monotonic_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock frozen at a given reading, for headless runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub wall: WallTime,
    pub monotonic_ms: u64,
}

impl FixedClock {
    pub const fn new(hour: u8, minute: u8, second: u8, monotonic_ms: u64) -> Self {
        Self {
            wall: WallTime {
                hour,
                minute,
                second,
            },
            monotonic_ms,
        }
    }

    pub fn advance(&mut self, delta_ms: u64) {
        self.monotonic_ms += delta_ms;
    }
}

impl ClockSource for FixedClock {
    fn wall_time(&self) -> WallTime {
        self.wall
    }

    fn monotonic_ms(&self) -> u64 {
        self.monotonic_ms
    }
}

/// A resolved time of day. `second` may carry a fraction in live mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeValue {
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

impl TimeValue {
    pub fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second: f64::from(second),
        }
    }

    pub fn seconds_float(&self) -> f64 {
        self.second
    }

    pub fn minute_float(&self) -> f64 {
        f64::from(self.minute) + self.second / 60.0
    }

    pub fn hour12_float(&self) -> f64 {
        f64::from(self.hour % 12) + self.minute_float() / 60.0
    }

    pub fn label(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.hour,
            self.minute,
            self.second.floor() as u8
        )
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeEntryError {
    #[error("time entry is empty")]
    Empty,
    #[error("expected H:M or H:M:S, got {0} fields")]
    FieldCount(usize),
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("{field} {value} is out of range")]
    OutOfRange { field: &'static str, value: u32 },
}

/// Parses `H:M` or `H:M:S` (hours 0-23, minutes and seconds 0-59).
pub fn parse_time_string(input: &str) -> Result<TimeValue, TimeEntryError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TimeEntryError::Empty);
    }

    let parts: Vec<&str> = input.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(TimeEntryError::FieldCount(parts.len()));
    }

    let hour = parse_field(parts[0], "hour", 23)?;
    let minute = parse_field(parts[1], "minute", 59)?;
    let second = match parts.get(2) {
        Some(part) => parse_field(part, "second", 59)?,
        None => 0,
    };

    Ok(TimeValue::new(hour, minute, second))
}

fn parse_field(part: &str, field: &'static str, max: u32) -> Result<u8, TimeEntryError> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeEntryError::NotANumber(part.to_string()));
    }
    let value: u32 = part
        .parse()
        .map_err(|_| TimeEntryError::NotANumber(part.to_string()))?;
    if value > max {
        return Err(TimeEntryError::OutOfRange { field, value });
    }
    Ok(value as u8)
}

fn clamp_field(value: f64, max: u8) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.trunc().clamp(0.0, f64::from(max)) as u8
}

/// Resolves the current time of day from the live clock or a held manual value.
#[derive(Debug)]
pub struct TimeSource {
    mode: TimeMode,
    manual: TimeValue,
    rng: Pcg64Mcg,
}

impl TimeSource {
    pub fn new(seed: u64) -> Self {
        Self {
            mode: TimeMode::Live,
            manual: TimeValue::new(0, 0, 0),
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub const fn mode(&self) -> TimeMode {
        self.mode
    }

    pub const fn manual_value(&self) -> TimeValue {
        self.manual
    }

    pub fn set_live(&mut self) {
        if self.mode != TimeMode::Live {
            log::debug!("time source -> live");
        }
        self.mode = TimeMode::Live;
    }

    pub fn force_manual(&mut self) {
        self.mode = TimeMode::Manual;
    }

    /// Stores a manual time, truncating and clamping every field into range.
    pub fn set_manual_time(
        &mut self,
        hour: impl Into<f64>,
        minute: impl Into<f64>,
        second: impl Into<f64>,
    ) {
        self.manual = TimeValue::new(
            clamp_field(hour.into(), 23),
            clamp_field(minute.into(), 59),
            clamp_field(second.into(), 59),
        );
        self.mode = TimeMode::Manual;
        log::trace!("manual time set to {}", self.manual.label());
    }

    pub fn set_random_time(&mut self) {
        let hour = self.rng.gen_range(0..24_u8);
        let minute = self.rng.gen_range(0..60_u8);
        let second = self.rng.gen_range(0..60_u8);
        self.set_manual_time(hour, minute, second);
    }

    pub fn resolve(&self, clock: &impl ClockSource) -> TimeValue {
        match self.mode {
            TimeMode::Live => {
                let wall = clock.wall_time();
                let fraction = (clock.monotonic_ms() % 1000) as f64 / 1000.0;
                TimeValue {
                    hour: wall.hour,
                    minute: wall.minute,
                    second: f64::from(wall.second) + fraction,
                }
            }
            TimeMode::Manual => self.manual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    #[test]
    fn manual_time_round_trips_every_valid_value() {
        let mut source = TimeSource::new(1);
        for hour in 0..24_u8 {
            for minute in (0..60_u8).step_by(7) {
                for second in (0..60_u8).step_by(11) {
                    source.set_manual_time(hour, minute, second);
                    assert_eq!(source.mode(), TimeMode::Manual);
                    assert_eq!(
                        source.resolve(&FixedClock::new(1, 2, 3, 456)),
                        TimeValue::new(hour, minute, second)
                    );
                }
            }
        }
    }

    #[test]
    fn out_of_range_fields_are_clamped() {
        let mut source = TimeSource::new(1);
        source.set_manual_time(-1, 75, -3);
        assert_eq!(source.manual_value(), TimeValue::new(0, 59, 0));

        source.set_manual_time(24, 60, 61);
        assert_eq!(source.manual_value(), TimeValue::new(23, 59, 59));

        source.set_manual_time(9.9, f64::NAN, 30.7);
        assert_eq!(source.manual_value(), TimeValue::new(9, 0, 30));
    }

    #[test]
    fn live_mode_adds_sub_second_fraction() {
        let source = TimeSource::new(1);
        let time = source.resolve(&FixedClock::new(14, 30, 12, 10_250));
        assert_eq!(time.hour, 14);
        assert_eq!(time.minute, 30);
        assert_close(time.seconds_float(), 12.25);
    }

    #[test]
    fn manual_mode_has_no_fractional_motion() {
        let mut source = TimeSource::new(1);
        source.set_manual_time(3, 4, 5);
        let first = source.resolve(&FixedClock::new(0, 0, 0, 100));
        let later = source.resolve(&FixedClock::new(0, 0, 0, 999));
        assert_eq!(first, later);
        assert_close(first.seconds_float(), 5.0);
    }

    #[test]
    fn derived_quantities() {
        let time = TimeValue {
            hour: 15,
            minute: 30,
            second: 30.0,
        };
        assert_close(time.minute_float(), 30.5);
        assert_close(time.hour12_float(), 3.0 + 30.5 / 60.0);
        assert_eq!(time.label(), "15:30:30");
    }

    #[test]
    fn random_time_stays_in_range_and_is_seeded() {
        let mut a = TimeSource::new(42);
        let mut b = TimeSource::new(42);
        for _ in 0..200 {
            a.set_random_time();
            b.set_random_time();
            let value = a.manual_value();
            assert_eq!(value, b.manual_value());
            assert!(value.hour < 24);
            assert!(value.minute < 60);
            assert!(value.second < 60.0);
        }
        assert_eq!(a.mode(), TimeMode::Manual);
    }

    #[test]
    fn parses_valid_time_strings() {
        assert_eq!(parse_time_string("9:05"), Ok(TimeValue::new(9, 5, 0)));
        assert_eq!(parse_time_string("09:05:30"), Ok(TimeValue::new(9, 5, 30)));
        assert_eq!(parse_time_string("23:59:59"), Ok(TimeValue::new(23, 59, 59)));
        assert_eq!(parse_time_string("0:0"), Ok(TimeValue::new(0, 0, 0)));
    }

    #[test]
    fn rejects_invalid_time_strings() {
        assert_eq!(parse_time_string(""), Err(TimeEntryError::Empty));
        assert_eq!(
            parse_time_string("25:00"),
            Err(TimeEntryError::OutOfRange {
                field: "hour",
                value: 25
            })
        );
        assert_eq!(
            parse_time_string("9:5:5:5"),
            Err(TimeEntryError::FieldCount(4))
        );
        assert_eq!(parse_time_string("12"), Err(TimeEntryError::FieldCount(1)));
        assert!(matches!(
            parse_time_string("9:"),
            Err(TimeEntryError::NotANumber(_))
        ));
        assert!(matches!(
            parse_time_string("9:123"),
            Err(TimeEntryError::NotANumber(_))
        ));
        assert!(matches!(
            parse_time_string("10:60"),
            Err(TimeEntryError::OutOfRange { field: "minute", .. })
        ));
    }
}
