mod keymap;

use crate::app::state::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use keymap::{command_for_key, entry_command_for_key};

pub fn handle_input(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    if handle_help_toggle(app, key.code) {
        return;
    }

    if app.is_typing() {
        if let Some(command) = entry_command_for_key(key.code) {
            app.dispatch(command);
        }
        return;
    }

    if key.code == KeyCode::Char('q') {
        app.running = false;
        return;
    }

    if let Some(command) = command_for_key(key.code) {
        app.dispatch(command);
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoclock::config::ClockConfig;
    use geoclock::{PhaseMode, RouletteState};

    fn app() -> App {
        App::new(&ClockConfig {
            seed: Some(1),
            ..ClockConfig::default()
        })
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn entry(app: &App) -> Option<&str> {
        app.engine.input().entry()
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        assert!(app.show_help);

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.engine.roulette().state(), RouletteState::Off);

        press(&mut app, KeyCode::F(1));
        assert!(!app.show_help);
    }

    #[test]
    fn esc_closes_help_before_cancelling_entry() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::F(1));

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert_eq!(entry(&app), Some(""));

        press(&mut app, KeyCode::Esc);
        assert_eq!(entry(&app), None);
    }

    #[test]
    fn q_quits_only_outside_typing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(entry(&app), Some(""));

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::F(1));
        handle_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }

    #[test]
    fn digits_type_while_entering_and_select_phase_otherwise() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.engine.phase().mode(), PhaseMode::Tri);

        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(entry(&app), Some("1"));
        assert_eq!(app.engine.phase().mode(), PhaseMode::Tri);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_input(&mut app, key);
        assert!(app.running);
    }
}
