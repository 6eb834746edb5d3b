//! Key handling per view.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::{Period, TimerMode};

use super::app::{App, View};


/// Route a key press to the active view. Sets `should_quit` on exit keys.
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.view {
        View::Timer if app.timer.is_editing() => handle_edit(app, key, now),
        View::Timer => handle_timer(app, key, now),
        View::Dashboard => handle_dashboard(app, key),
        View::Settings if app.settings.input.is_some() => handle_setting_input(app, key, now),
        View::Settings => handle_settings(app, key),
    }
}


fn handle_timer(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char(' ') => {
            if app.timer.is_running() {
                app.timer.pause();
            } else {
                let effects = app.timer.start();
                app.apply(effects, now);
            }
        }
        KeyCode::Char('r') => {
            let effects = app.timer.reset();
            app.apply(effects, now);
        }
        KeyCode::Char('1') => app.timer.switch_mode(TimerMode::Focus),
        KeyCode::Char('2') => app.timer.switch_mode(TimerMode::ShortBreak),
        KeyCode::Char('3') => app.timer.switch_mode(TimerMode::LongBreak),
        KeyCode::Tab => {
            let next = match app.timer.mode() {
                TimerMode::Focus => TimerMode::ShortBreak,
                TimerMode::ShortBreak => TimerMode::LongBreak,
                TimerMode::LongBreak => TimerMode::Focus,
            };
            app.timer.switch_mode(next);
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            app.timer.begin_edit();
        }
        KeyCode::Char('d') => app.open_dashboard(),
        KeyCode::Char('o') => app.view = View::Settings,
        _ => {}
    }
}


fn handle_edit(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char(' ') => {
            let effects = app.timer.start();
            app.apply(effects, now);
        }
        KeyCode::Char(c) => app.timer.edit_push(c),
        KeyCode::Backspace => app.timer.edit_backspace(),
        KeyCode::Enter | KeyCode::Tab => app.timer.commit_edit(),
        KeyCode::Esc => app.timer.cancel_edit(),
        _ => {}
    }
}


fn handle_dashboard(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Char('t') => app.view = View::Timer,
        KeyCode::Char('w') => app.dashboard.switch_period(Period::Week),
        KeyCode::Char('m') => app.dashboard.switch_period(Period::Month),
        KeyCode::Char('y') => app.dashboard.switch_period(Period::Year),
        KeyCode::Char('p') | KeyCode::Tab => {
            let next = app.dashboard.period().next();
            app.dashboard.switch_period(next);
        }
        KeyCode::Char('r') => app.open_dashboard(),
        _ => {}
    }
}


fn handle_settings(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('o') => app.view = View::Timer,
        KeyCode::Down | KeyCode::Char('j') => app.settings.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.settings.select_prev(),
        KeyCode::Enter | KeyCode::Char('e') => {
            let current = app.timer.settings().minutes_for(app.settings.mode());
            app.settings.input = Some(current.to_string());
        }
        _ => {}
    }
}


fn handle_setting_input(app: &mut App, key: KeyEvent, now: Instant) {
    let Some(input) = app.settings.input.as_mut() else { return };

    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() && input.len() < 3 => input.push(c),
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Enter => app.commit_setting(now),
        KeyCode::Esc => app.settings.input = None,
        _ => {}
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimerConfig;
    use crate::timer::RunState;

    fn app(dir: &tempfile::TempDir) -> App {
        App::new(
            TimerConfig::default(),
            TimerMode::Focus,
            None,
            dir.path().join("missing.json"),
            Period::Week,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_space_toggles_run_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.timer.run_state(), RunState::Running);

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.timer.run_state(), RunState::Paused);
    }

    #[test]
    fn test_number_keys_switch_mode() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.timer.mode(), TimerMode::LongBreak);
        assert_eq!(app.timer.remaining_secs(), 15 * 60);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.timer.mode(), TimerMode::Focus);
    }

    #[test]
    fn test_edit_flow_from_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "1230");
        assert_eq!(app.timer.edit_text(), Some("1230"));

        press(&mut app, KeyCode::Enter);
        assert!(!app.timer.is_editing());
        assert_eq!(app.timer.remaining_secs(), 12 * 60 + 30);
    }

    #[test]
    fn test_escape_cancels_edit_without_quitting() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "5");
        press(&mut app, KeyCode::Esc);

        assert!(!app.should_quit);
        assert_eq!(app.timer.remaining_secs(), 25 * 60);
    }

    #[test]
    fn test_dashboard_period_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.view, View::Dashboard);

        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.dashboard.period(), Period::Year);

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.dashboard.period(), Period::Week);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, View::Timer);
    }

    #[test]
    fn test_settings_entry_changes_duration() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.settings.input.as_deref(), Some("5"));

        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "10");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.timer.settings().short_break_minutes, 10);
        assert_eq!(app.settings.input, None);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.view = View::Settings;

        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(app.should_quit);
    }
}
