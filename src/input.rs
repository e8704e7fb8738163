//! Keyboard input mapping.
//!
//! Translates crossterm key events into form actions. What a key means
//! depends on whether a text field is being edited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::Mode;

/// Something the user asked the form to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    SectionNext,
    SectionPrev,
    BeginEdit,
    CommitEdit,
    CancelEdit,
    InsertChar(char),
    Newline,
    Backspace,
    CycleNext,
    CyclePrev,
    Regenerate,
    AddSection,
    RemoveSection,
    AddTopic,
    RemoveTopic,
    Submit,
    Ignore,
}

/// Map a key event to an action for the given mode
pub fn map_key(mode: Mode, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Commands available in both modes
    if ctrl {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('r') => Action::Regenerate,
            KeyCode::Char('n') => Action::AddSection,
            KeyCode::Char('d') => Action::RemoveSection,
            KeyCode::Char('t') => Action::AddTopic,
            KeyCode::Char('s') => Action::Submit,
            _ => Action::Ignore,
        };
    }

    match mode {
        Mode::Editing => match key.code {
            KeyCode::Esc => Action::CancelEdit,
            // Shift-Enter is only distinguishable with keyboard enhancement; Alt-Enter works everywhere
        KeyCode::Enter if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            Action::Newline
        }
            KeyCode::Enter => Action::CommitEdit,
            KeyCode::Tab => Action::CommitEdit,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char(c) => Action::InsertChar(c),
            _ => Action::Ignore,
        },
        Mode::Navigate => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            KeyCode::Tab => Action::FocusNext,
            KeyCode::BackTab => Action::FocusPrev,
            KeyCode::Down | KeyCode::Char('j') => Action::SectionNext,
            KeyCode::Up | KeyCode::Char('k') => Action::SectionPrev,
            KeyCode::Enter | KeyCode::Char('i') => Action::BeginEdit,
            KeyCode::Right | KeyCode::Char('l') => Action::CycleNext,
            KeyCode::Left | KeyCode::Char('h') => Action::CyclePrev,
            KeyCode::Delete => Action::RemoveTopic,
            _ => Action::Ignore,
        },
    }
}
