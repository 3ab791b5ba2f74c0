use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key as seen by the session, independent of the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Any single printable, non-space character
    Char(char),
    Space,
    Enter,
    Backspace,
    /// Keys the session has no use for (arrows, function keys, ...)
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
    };

    /// Control on most platforms, command on macOS
    pub fn is_command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// One discrete key press, stamped with the moment it arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub key: Key,
    pub modifiers: Modifiers,
    pub at: Instant,
}

impl Keystroke {
    pub fn new(key: Key, modifiers: Modifiers, at: Instant) -> Self {
        Self { key, modifiers, at }
    }

    pub fn plain(key: Key, at: Instant) -> Self {
        Self::new(key, Modifiers::NONE, at)
    }

    /// Map a character to the key it was typed with
    pub fn from_char(c: char, at: Instant) -> Self {
        let key = if c == ' ' { Key::Space } else { Key::Char(c) };
        Self::plain(key, at)
    }

    /// Translate a crossterm event. Key releases, reported by terminals with
    /// enhanced keyboard support, are dropped.
    pub fn from_key_event(event: KeyEvent, at: Instant) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let key = match event.code {
            KeyCode::Char(' ') => Key::Space,
            // many terminals send ctrl+backspace as 0x08, which decodes as ctrl+h
            KeyCode::Char('h') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Backspace
            }
            KeyCode::Char(c) if !c.is_control() => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            _ => Key::Other,
        };

        let modifiers = Modifiers {
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            meta: event
                .modifiers
                .intersects(KeyModifiers::SUPER | KeyModifiers::META),
        };

        Some(Self::new(key, modifiers, at))
    }

    /// True for Space and Enter
    pub fn is_delimiter(&self) -> bool {
        matches!(self.key, Key::Space | Key::Enter)
    }
}
