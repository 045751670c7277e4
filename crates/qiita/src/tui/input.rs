//! Key events to actions

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::AppMode;

/// Map a key to an action for the current mode
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('o') | KeyCode::Enter => Some(Action::OpenSelected),
            KeyCode::Char('/') | KeyCode::Char('s') => Some(Action::StartSearch),
            KeyCode::Char('c') => Some(Action::ClearSearch),
            KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
        AppMode::Searching => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::Alert(_) => match key {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('y') => Some(Action::Submit),
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('n') => Some(Action::Cancel),
            _ => None,
        },
    }
}
