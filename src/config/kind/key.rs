//! Key codes for action bindings.
//!
//! A key token is either a symbolic name from [`NAMED_KEYS`] (matched
//! case-insensitively) or a single printable character taken literally.

use super::ValueError;
use std::fmt;

/// Maximum number of alternate keys bound to one action.
pub const MAX_KEYS: usize = 8;

/// A key that can trigger an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Backspace,
    Break,
    Delete,
    Insert,
    /// Function key `F1`-`F12`.
    F(u8),
    /// A literal character, including control characters reached by name.
    Char(char),
}

/// Symbolic key names. The first name listed for a code is its display form.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("KEY_UP", KeyCode::Up),
    ("KEY_DOWN", KeyCode::Down),
    ("KEY_LEFT", KeyCode::Left),
    ("KEY_RIGHT", KeyCode::Right),
    ("KEY_PPAGE", KeyCode::PageUp),
    ("KEY_NPAGE", KeyCode::PageDown),
    ("KEY_HOME", KeyCode::Home),
    ("KEY_END", KeyCode::End),
    ("KEY_ENTER", KeyCode::Enter),
    ("KEY_BACKSPACE", KeyCode::Backspace),
    ("KEY_BREAK", KeyCode::Break),
    ("KEY_DC", KeyCode::Delete),
    ("KEY_IC", KeyCode::Insert),
    ("F1", KeyCode::F(1)),
    ("F2", KeyCode::F(2)),
    ("F3", KeyCode::F(3)),
    ("F4", KeyCode::F(4)),
    ("F5", KeyCode::F(5)),
    ("F6", KeyCode::F(6)),
    ("F7", KeyCode::F(7)),
    ("F8", KeyCode::F(8)),
    ("F9", KeyCode::F(9)),
    ("F10", KeyCode::F(10)),
    ("F11", KeyCode::F(11)),
    ("F12", KeyCode::F(12)),
    ("ESC", KeyCode::Char('\x1b')),
    ("ETX", KeyCode::Char('\x03')),
    ("LF", KeyCode::Char('\n')),
    ("BS", KeyCode::Char('\x08')),
    ("HT", KeyCode::Char('\t')),
    ("SPACE", KeyCode::Char(' ')),
    ("COMMA", KeyCode::Char(',')),
    ("QUOTE", KeyCode::Char('"')),
];

impl KeyCode {
    /// Parse a single key token.
    pub fn parse(token: &str) -> Result<Self, ValueError> {
        if let Some((_, code)) = NAMED_KEYS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
        {
            return Ok(*code);
        }

        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if is_literal(c) => Ok(Self::Char(c)),
            _ => Err(ValueError::UnknownKey(token.to_string())),
        }
    }

    /// Symbolic name of this key, if it has one.
    pub fn name(&self) -> Option<&'static str> {
        NAMED_KEYS
            .iter()
            .find(|(_, code)| code == self)
            .map(|(name, _)| *name)
    }
}

/// Characters that may appear as a literal key token.
fn is_literal(c: char) -> bool {
    !c.is_control() && !c.is_whitespace() && c != ','
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self) {
            (Some(name), _) => f.write_str(name),
            (None, Self::Char(c)) => write!(f, "{c}"),
            (None, other) => write!(f, "{other:?}"),
        }
    }
}
