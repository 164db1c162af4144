//! Logical keys
//!
//! Terminal events are reduced to a small key space before the engine sees
//! them. Arrow keys stay distinct so line editing can ignore them; panel
//! handlers fold them into `h`/`j`/`k`/`l` with [`Key::to_hjkl`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    /// Function key `F1`..`F12`
    F(u8),
}

impl Key {
    /// Convert a crossterm key event. Releases and unsupported keys give `None`.
    pub fn from_event(event: KeyEvent) -> Option<Key> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let key = match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Esc,
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::F(n) => Key::F(n),
            _ => return None,
        };
        Some(key)
    }

    /// Fold arrows into vi keys
    pub fn to_hjkl(self) -> Key {
        match self {
            Key::Left => Key::Char('h'),
            Key::Down => Key::Char('j'),
            Key::Up => Key::Char('k'),
            Key::Right => Key::Char('l'),
            other => other,
        }
    }

    pub fn char(self) -> Option<char> {
        match self {
            Key::Char(c) => Some(c),
            _ => None,
        }
    }
}
