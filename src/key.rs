//! Keypad codes.

/// Raw code of the delete (backspace) key.
pub const DELETE: u8 = 8;
/// Raw code of the enter (confirm) key.
pub const ENTER: u8 = 10;
/// Raw code of the escape (cancel) key.
pub const ESCAPE: u8 = 27;
/// Raw code of the edit key.
pub const EDIT: u8 = 32;

/// A decoded keypad event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Decimal digit, value 0-9.
    Digit(u8),
    /// Confirm entry.
    Enter,
    /// Abort entry.
    Escape,
    /// Remove last digit.
    Delete,
    /// Start editing the time.
    Edit,
    /// Any other code; never acted on.
    Other(u8),
}

impl Key {
    /// Decodes a raw ASCII key code.
    pub const fn from_code(code: u8) -> Self {
        match code {
            DELETE => Key::Delete,
            ENTER => Key::Enter,
            ESCAPE => Key::Escape,
            EDIT => Key::Edit,
            b'0'..=b'9' => Key::Digit(code - b'0'),
            other => Key::Other(other),
        }
    }

    /// Raw ASCII code for this key.
    pub const fn code(self) -> u8 {
        match self {
            Key::Delete => DELETE,
            Key::Enter => ENTER,
            Key::Escape => ESCAPE,
            Key::Edit => EDIT,
            Key::Digit(d) => b'0' + d,
            Key::Other(code) => code,
        }
    }
}

impl From<u8> for Key {
    fn from(code: u8) -> Self {
        Key::from_code(code)
    }
}
