use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::Input;

/// Map a key press to a session input. Unbound keys map to `None`.
pub fn input_for_key(key: KeyEvent) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }

    match key.code {
        KeyCode::Char(' ') => Some(Input::PrimaryToggle),
        KeyCode::Enter => Some(Input::Accept),
        KeyCode::Char('s') => Some(Input::StopKey),
        KeyCode::Char('h') | KeyCode::Left => Some(Input::FocusLeft),
        KeyCode::Char('l') | KeyCode::Right => Some(Input::FocusRight),
        KeyCode::Char('q') => Some(Input::Quit),
        _ => None,
    }
}
