use crate::domain::{PhaseMode, RouletteState};
use crate::engine::phase::PhaseScheduler;
use crate::engine::roulette::RouletteController;
use crate::engine::time_source::{parse_time_string, TimeEntryError, TimeSource};

/// How long a rejected time entry keeps its hint visible.
pub const HINT_DURATION_MS: u64 = 1500;
/// Longest buffer the entry accepts ("HH:MM:SS").
pub const MAX_ENTRY_LEN: usize = 8;

/// Discrete commands coming from whatever host drives the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCommand {
    Reset,
    RouletteToggle,
    PhaseSelect(PhaseMode),
    PhaseAutoToggle,
    TimeEntryToggle,
    TimeEntryChar(char),
    TimeEntryBackspace,
    TimeEntrySubmit,
    TimeEntryCancel,
}

/// Mutable collaborators the dispatcher drives.
pub struct Targets<'a> {
    pub time: &'a mut TimeSource,
    pub roulette: &'a mut RouletteController,
    pub phase: &'a mut PhaseScheduler,
}

/// Time-entry buffer plus the dispatcher that keeps typing and roulette exclusive.
#[derive(Debug, Clone, Default)]
pub struct InputController {
    entry: Option<String>,
    hint_until_ms: Option<u64>,
    last_error: Option<TimeEntryError>,
}

impl InputController {
    pub const fn new() -> Self {
        Self {
            entry: None,
            hint_until_ms: None,
            last_error: None,
        }
    }

    pub const fn is_typing(&self) -> bool {
        self.entry.is_some()
    }

    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    pub const fn last_error(&self) -> Option<&TimeEntryError> {
        self.last_error.as_ref()
    }

    pub fn hint_active(&self, now_ms: u64) -> bool {
        self.hint_until_ms.is_some_and(|until| now_ms < until)
    }

    fn close_entry(&mut self) {
        self.entry = None;
        self.hint_until_ms = None;
        self.last_error = None;
    }

    pub fn apply(&mut self, command: ClockCommand, targets: &mut Targets<'_>, now_ms: u64) {
        match command {
            ClockCommand::Reset => {
                targets.time.set_live();
                targets.roulette.cancel();
                targets.phase.set_mode(PhaseMode::Auto);
                self.close_entry();
            }
            ClockCommand::RouletteToggle => {
                if targets.roulette.state() == RouletteState::Off {
                    self.close_entry();
                }
                targets.roulette.toggle(now_ms, targets.time);
            }
            ClockCommand::PhaseSelect(mode) => targets.phase.set_mode(mode),
            ClockCommand::PhaseAutoToggle => targets.phase.toggle_lock(),
            ClockCommand::TimeEntryToggle => {
                if self.is_typing() {
                    self.close_entry();
                } else {
                    targets.roulette.cancel();
                    self.entry = Some(String::new());
                    self.hint_until_ms = None;
                    self.last_error = None;
                }
            }
            ClockCommand::TimeEntryChar(c) => {
                if let Some(entry) = &mut self.entry {
                    if (c.is_ascii_digit() || c == ':') && entry.len() < MAX_ENTRY_LEN {
                        entry.push(c);
                    }
                }
            }
            ClockCommand::TimeEntryBackspace => {
                if let Some(entry) = &mut self.entry {
                    entry.pop();
                }
            }
            ClockCommand::TimeEntrySubmit => self.submit(targets, now_ms),
            ClockCommand::TimeEntryCancel => self.close_entry(),
        }
    }

    fn submit(&mut self, targets: &mut Targets<'_>, now_ms: u64) {
        let Some(entry) = &self.entry else {
            return;
        };
        match parse_time_string(entry) {
            Ok(time) => {
                targets
                    .time
                    .set_manual_time(time.hour, time.minute, time.second);
                self.close_entry();
            }
            Err(e) => {
                log::debug!("rejected time entry {entry:?}: {e}");
                self.hint_until_ms = Some(now_ms + HINT_DURATION_MS);
                self.last_error = Some(e);
            }
        }
    }
}
