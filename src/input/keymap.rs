//! Keymap
//!
//! Key bindings for the dashboard and the login form mapped to actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be triggered by key presses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Dashboard
    OpenLogin,
    Quit,

    // Form navigation
    FocusNext,
    FocusPrev,

    // Confirmation
    Submit,
    Cancel,

    // Text input
    InsertChar(char),
    DeleteChar,
    DeleteCharForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearLine,

    // No action
    None,
}

/// Map key event to action on the dashboard
pub fn dashboard_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Enter, _) => Action::OpenLogin,
        (KeyCode::Char('q') | KeyCode::Char('Q'), _) | (KeyCode::Esc, _) => Action::Quit,
        _ => Action::None,
    }
}

/// Map key event to action while a text field has focus
pub fn text_input_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Tab, _) => Action::FocusNext,
        (KeyCode::BackTab, _) => Action::FocusPrev,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::Delete, _) => Action::DeleteCharForward,
        (KeyCode::Left, _) => Action::CursorLeft,
        (KeyCode::Right, _) => Action::CursorRight,
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => Action::CursorHome,
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => Action::CursorEnd,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ClearLine,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Action::InsertChar(c),
        _ => Action::None,
    }
}

/// Map key event to action while the form or a button has focus
pub fn form_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Submit,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Action::Cancel,
        _ => Action::None,
    }
}
