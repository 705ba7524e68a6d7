//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, PopupState};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Rebuild the collector and run a new cycle.
    Refresh,
    /// Open the report preview (needs a fresh snapshot).
    Preview,
    /// Write the PNG report.
    Export,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.popup = PopupState::None;
        return KeyAction::Quit;
    }
    match state.popup {
        PopupState::QuitConfirm => handle_quit_confirm(state, key),
        PopupState::Preview(_) => handle_preview(state, key),
        PopupState::None => handle_normal_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_preview(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        KeyCode::Char('e') | KeyCode::Char('E') => KeyAction::Export,
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys when no popup is open.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Refresh,
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char(' ') => {
            state.paused = !state.paused;
            state.status_message = Some(if state.paused {
                "Auto-refresh paused".to_string()
            } else {
                "Auto-refresh resumed".to_string()
            });
            KeyAction::None
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.slower();
            state.status_message = Some(format!("Refresh interval: {} ms", state.interval_ms()));
            KeyAction::None
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            state.faster();
            state.status_message = Some(format!("Refresh interval: {} ms", state.interval_ms()));
            KeyAction::None
        }
        KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Preview,
        KeyCode::Char('e') | KeyCode::Char('E') => KeyAction::Export,
        KeyCode::Esc => {
            state.status_message = None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_c() -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn state() -> AppState {
        AppState::new(1000, "app@localhost:5432".to_string())
    }

    #[test]
    fn q_asks_for_confirmation_then_quits() {
        let mut state = state();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::None);
        assert_eq!(state.popup, PopupState::QuitConfirm);
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::Quit);
    }

    #[test]
    fn esc_cancels_quit_confirmation() {
        let mut state = state();
        handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(handle_key(&mut state, key(KeyCode::Esc)), KeyAction::None);
        assert_eq!(state.popup, PopupState::None);
    }

    #[test]
    fn ctrl_c_quits_immediately() {
        let mut state = state();
        assert_eq!(handle_key(&mut state, ctrl_c()), KeyAction::Quit);
    }

    #[test]
    fn space_and_a_toggle_auto_refresh() {
        let mut state = state();
        handle_key(&mut state, key(KeyCode::Char(' ')));
        assert!(state.paused);
        handle_key(&mut state, key(KeyCode::Char('a')));
        assert!(!state.paused);
    }

    #[test]
    fn plus_and_minus_cycle_interval() {
        let mut state = state();
        handle_key(&mut state, key(KeyCode::Char('+')));
        assert_eq!(state.interval_ms(), 2000);
        handle_key(&mut state, key(KeyCode::Char('-')));
        handle_key(&mut state, key(KeyCode::Char('-')));
        assert_eq!(state.interval_ms(), 500);
        assert_eq!(
            state.status_message.as_deref(),
            Some("Refresh interval: 500 ms")
        );
    }

    #[test]
    fn refresh_preview_and_export_are_actions() {
        let mut state = state();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('r'))), KeyAction::Refresh);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('p'))), KeyAction::Preview);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('e'))), KeyAction::Export);
    }
}
