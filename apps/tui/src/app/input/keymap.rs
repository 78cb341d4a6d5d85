use crossterm::event::KeyCode;
use geoclock::{ClockCommand, PhaseMode};

/// Keys while the clock is running normally.
pub const fn command_for_key(key: KeyCode) -> Option<ClockCommand> {
    match key {
        KeyCode::Char('r') => Some(ClockCommand::Reset),
        KeyCode::Char('s') => Some(ClockCommand::RouletteToggle),
        KeyCode::Char('1') => Some(ClockCommand::PhaseSelect(PhaseMode::Geo)),
        KeyCode::Char('2') => Some(ClockCommand::PhaseSelect(PhaseMode::Tri)),
        KeyCode::Char('0') => Some(ClockCommand::PhaseSelect(PhaseMode::Auto)),
        KeyCode::Char('p') => Some(ClockCommand::PhaseAutoToggle),
        KeyCode::Char('t') => Some(ClockCommand::TimeEntryToggle),
        _ => None,
    }
}

/// Keys while a time is being typed.
pub const fn entry_command_for_key(key: KeyCode) -> Option<ClockCommand> {
    match key {
        KeyCode::Char(c) if c.is_ascii_digit() || c == ':' => Some(ClockCommand::TimeEntryChar(c)),
        KeyCode::Char('t') => Some(ClockCommand::TimeEntryToggle),
        KeyCode::Backspace => Some(ClockCommand::TimeEntryBackspace),
        KeyCode::Enter => Some(ClockCommand::TimeEntrySubmit),
        KeyCode::Esc => Some(ClockCommand::TimeEntryCancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_select_phase_outside_entry() {
        assert_eq!(
            command_for_key(KeyCode::Char('1')),
            Some(ClockCommand::PhaseSelect(PhaseMode::Geo))
        );
        assert_eq!(
            command_for_key(KeyCode::Char('0')),
            Some(ClockCommand::PhaseSelect(PhaseMode::Auto))
        );
        assert_eq!(command_for_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn digits_are_typed_during_entry() {
        assert_eq!(
            entry_command_for_key(KeyCode::Char('1')),
            Some(ClockCommand::TimeEntryChar('1'))
        );
        assert_eq!(
            entry_command_for_key(KeyCode::Char(':')),
            Some(ClockCommand::TimeEntryChar(':'))
        );
        assert_eq!(
            entry_command_for_key(KeyCode::Enter),
            Some(ClockCommand::TimeEntrySubmit)
        );
        assert_eq!(entry_command_for_key(KeyCode::Char('s')), None);
    }
}
