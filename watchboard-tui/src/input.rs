//! Keyboard input dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppState;

/// Side effect the main loop must carry out after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Refresh,
    Quit,
}

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> InputAction {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
            InputAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            InputAction::Quit
        }
        KeyCode::Char('r') => InputAction::Refresh,
        _ => InputAction::None,
    }
}
