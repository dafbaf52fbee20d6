//! Key mapping
//!
//! Translates crossterm key events into application actions. The mapping
//! depends on the current view: the landing screen uses single-letter
//! shortcuts, the terminal view feeds printable keys into the input line.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::view::View;

/// An input-triggered application action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Switch to the terminal view.
    OpenTerminal,
    /// Dashboard affordance (stub view).
    OpenDashboard,
    /// Return to the landing view.
    CloseTerminal,
    /// Exit the application.
    Quit,
    /// Submit the input line.
    Submit,
    /// Recall the previous history entry.
    HistoryPrev,
    /// Recall the next history entry.
    HistoryNext,
    /// Tab completion.
    Autocomplete,
    /// Toggle the interface language.
    ToggleLanguage,
    /// Scroll the output region up.
    ScrollUp,
    /// Scroll the output region down.
    ScrollDown,
    /// Delete the character before the input cursor.
    Backspace,
    /// Type a character into the input line.
    Insert(char),
}

/// Stateless key-to-action translation.
pub struct KeyMapper;

impl KeyMapper {
    /// Map a key press to an action for the given view. Returns `None` for
    /// keys that mean nothing there.
    pub fn map(event: &KeyEvent, view: View) -> Option<Action> {
        // Ctrl+C quits from anywhere.
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c') = event.code {
                return Some(Action::Quit);
            }
            return None;
        }

        match view {
            View::Landing => match event.code {
                KeyCode::Enter | KeyCode::Char('t') => Some(Action::OpenTerminal),
                KeyCode::Char('d') => Some(Action::OpenDashboard),
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::F(2) => Some(Action::ToggleLanguage),
                _ => None,
            },
            View::Terminal => match event.code {
                KeyCode::Esc => Some(Action::CloseTerminal),
                KeyCode::Enter => Some(Action::Submit),
                KeyCode::Up => Some(Action::HistoryPrev),
                KeyCode::Down => Some(Action::HistoryNext),
                KeyCode::Tab => Some(Action::Autocomplete),
                KeyCode::F(2) => Some(Action::ToggleLanguage),
                KeyCode::PageUp => Some(Action::ScrollUp),
                KeyCode::PageDown => Some(Action::ScrollDown),
                KeyCode::Backspace => Some(Action::Backspace),
                KeyCode::Char(c) => Some(Action::Insert(c)),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn landing_shortcuts() {
        assert_eq!(
            KeyMapper::map(&key(KeyCode::Enter), View::Landing),
            Some(Action::OpenTerminal)
        );
        assert_eq!(
            KeyMapper::map(&key(KeyCode::Char('t')), View::Landing),
            Some(Action::OpenTerminal)
        );
        assert_eq!(
            KeyMapper::map(&key(KeyCode::Char('d')), View::Landing),
            Some(Action::OpenDashboard)
        );
        assert_eq!(
            KeyMapper::map(&key(KeyCode::Char('q')), View::Landing),
            Some(Action::Quit)
        );
        // Escape does nothing on the landing screen.
        assert_eq!(KeyMapper::map(&key(KeyCode::Esc), View::Landing), None);
    }

    #[test]
    fn terminal_keys() {
        assert_eq!(
            KeyMapper::map(&key(KeyCode::Esc), View::Terminal),
            Some(Action::CloseTerminal)
        );
        assert_eq!(
            KeyMapper::map(&key(KeyCode::Enter), View::Terminal),
            Some(Action::Submit)
        );
        assert_eq!(
            KeyMapper::map(&key(KeyCode::Up), View::Terminal),
            Some(Action::HistoryPrev)
        );
        assert_eq!(
            KeyMapper::map(&key(KeyCode::Down), View::Terminal),
            Some(Action::HistoryNext)
        );
        assert_eq!(
            KeyMapper::map(&key(KeyCode::Tab), View::Terminal),
            Some(Action::Autocomplete)
        );
    }

    #[test]
    fn terminal_prints_chars_instead_of_shortcuts() {
        assert_eq!(
            KeyMapper::map(&key(KeyCode::Char('q')), View::Terminal),
            Some(Action::Insert('q'))
        );
        assert_eq!(
            KeyMapper::map(&key(KeyCode::Char('t')), View::Terminal),
            Some(Action::Insert('t'))
        );
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyMapper::map(&event, View::Landing), Some(Action::Quit));
        assert_eq!(KeyMapper::map(&event, View::Terminal), Some(Action::Quit));
    }

    #[test]
    fn other_control_chords_are_ignored() {
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(KeyMapper::map(&event, View::Terminal), None);
    }
}
