use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Reload the snapshot and re-render now
    Refresh,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::Char;

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match key.code {
        Char('q') | KeyCode::Esc => Action::Quit,
        Char('r') | KeyCode::F(5) => Action::Refresh,
        Char('+' | '=') | KeyCode::Up => {
            app.change_show_count(1);
            Action::Refresh
        }
        Char('-') | KeyCode::Down => {
            app.change_show_count(-1);
            Action::Refresh
        }
        Char('l') => {
            app.cycle_language();
            Action::Refresh
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use raccolta_core::{ReminderSettings, card_info};
    use serde_json::json;

    use super::*;
    use crate::source::FileSource;

    fn app() -> App {
        App::new(
            card_info(),
            FileSource::new(PathBuf::from("/nonexistent/states.json"), None),
            json!({}),
            ReminderSettings::default(),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn should_quit_on_q_and_ctrl_c() {
        let mut app = app();
        assert_eq!(handle_key_event(press(KeyCode::Char('q')), &mut app), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &mut app), Action::Quit);
    }

    #[test]
    fn should_change_show_count_and_refresh() {
        let mut app = app();
        assert_eq!(handle_key_event(press(KeyCode::Char('+')), &mut app), Action::Refresh);
        assert_eq!(app.show_count(), 2);
        assert_eq!(handle_key_event(press(KeyCode::Char('-')), &mut app), Action::Refresh);
        assert_eq!(app.show_count(), 1);
    }

    #[test]
    fn should_ignore_unbound_keys() {
        let mut app = app();
        assert_eq!(handle_key_event(press(KeyCode::Char('x')), &mut app), Action::None);
    }
}
