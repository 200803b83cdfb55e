//! Keypad-driven time entry.
//!
//! [`TimeEntry`] is the finite-state machine behind editing the clock. It
//! collects six digits (`HHMMSS`), validating each one against its position so
//! that a complete buffer always decodes to a time between 00:00:00 and
//! 23:59:59. Invalid keys are dropped without feedback and the user may retry
//! the same position indefinitely.
//!
//! The machine itself never touches a port. Each call to [`TimeEntry::handle`]
//! reports an [`EntryOutcome`] that the keypad task turns into mode changes and
//! display writes.

use crate::key::Key;
use crate::types::{Mode, TimeOfDay};
use heapless::Vec;

/// Number of digits in a complete entry.
pub const ENTRY_DIGITS: usize = 6;

/// Cursor value once every digit has been entered.
pub const CURSOR_COMPLETE: u8 = ENTRY_DIGITS as u8 + 1;

/// Returns whether `digit` may be typed at 1-based `position`.
///
/// `hour_tens` is the digit already accepted at position 1 and only matters
/// for position 2.
pub fn digit_allowed(position: u8, digit: u8, hour_tens: Option<u8>) -> bool {
    match position {
        1 => digit <= 2,
        2 => match hour_tens {
            Some(2) => digit <= 3,
            _ => digit <= 9,
        },
        3 | 5 => digit <= 5,
        4 | 6 => digit <= 9,
        _ => false,
    }
}

/// Digits typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryBuffer {
    digits: Vec<u8, ENTRY_DIGITS>,
}

impl EntryBuffer {
    pub const fn new() -> Self {
        Self { digits: Vec::new() }
    }

    /// Position the next digit goes to, 1..=7. 7 means complete.
    #[inline]
    pub fn cursor(&self) -> u8 {
        self.digits.len() as u8 + 1
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.digits.is_full()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Accepted digit values, oldest first.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Validates and stores `digit` at the cursor.
    ///
    /// Returns false, leaving the buffer untouched, if the digit is not
    /// allowed at this position or the buffer is already full.
    pub fn push(&mut self, digit: u8) -> bool {
        let hour_tens = self.digits.first().copied();
        if !digit_allowed(self.cursor(), digit, hour_tens) {
            return false;
        }
        self.digits.push(digit).is_ok()
    }

    /// Removes the most recent digit, if any.
    pub fn pop(&mut self) -> Option<u8> {
        self.digits.pop()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Decodes a complete buffer.
    pub fn to_time(&self) -> Option<TimeOfDay> {
        let digits: [u8; ENTRY_DIGITS] = self.digits.as_slice().try_into().ok()?;
        Some(TimeOfDay::from_validated_digits(digits))
    }
}

/// What a key did to the entry machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryOutcome {
    /// Edit key pressed in Display mode. Buffer is empty, cursor at 1.
    EnteredEdit,
    /// Digit value stored; it should be echoed.
    DigitAccepted(u8),
    /// Digit value not valid at the cursor (or buffer full). Nothing changed.
    DigitRejected(u8),
    /// Last digit removed.
    Erased,
    /// All six digits confirmed. Buffer is cleared.
    Committed(TimeOfDay),
    /// Entry aborted. Buffer is cleared.
    Cancelled,
    /// Key has no meaning in the current mode.
    Ignored,
}

/// Time-entry state machine.
#[derive(Debug, Clone, Default)]
pub struct TimeEntry {
    buffer: EntryBuffer,
}

impl TimeEntry {
    pub const fn new() -> Self {
        Self {
            buffer: EntryBuffer::new(),
        }
    }

    /// Current cursor position, 1..=7.
    #[inline]
    pub fn cursor(&self) -> u8 {
        self.buffer.cursor()
    }

    pub fn buffer(&self) -> &EntryBuffer {
        &self.buffer
    }

    /// Feeds one key given the current application mode.
    ///
    /// Digits are evaluated first, then confirm, edit, escape and delete.
    pub fn handle(&mut self, mode: Mode, key: Key) -> EntryOutcome {
        match (mode, key) {
            (Mode::Edit, Key::Digit(digit)) => {
                if self.buffer.push(digit) {
                    EntryOutcome::DigitAccepted(digit)
                } else {
                    trace!("digit {} rejected at position {}", digit, self.cursor());
                    EntryOutcome::DigitRejected(digit)
                }
            }
            (Mode::Edit, Key::Enter) => match self.buffer.to_time() {
                Some(time) => {
                    self.buffer.clear();
                    EntryOutcome::Committed(time)
                }
                None => EntryOutcome::Ignored,
            },
            (Mode::Display, Key::Edit) => {
                self.buffer.clear();
                EntryOutcome::EnteredEdit
            }
            (Mode::Edit, Key::Escape) => {
                self.buffer.clear();
                EntryOutcome::Cancelled
            }
            (Mode::Edit, Key::Delete) => match self.buffer.pop() {
                Some(_) => EntryOutcome::Erased,
                None => EntryOutcome::Ignored,
            },
            _ => EntryOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_tens_limited_to_two() {
        assert!(digit_allowed(1, 0, None));
        assert!(digit_allowed(1, 2, None));
        assert!(!digit_allowed(1, 3, None));
    }

    #[test]
    fn hour_units_depend_on_hour_tens() {
        assert!(digit_allowed(2, 9, Some(1)));
        assert!(digit_allowed(2, 3, Some(2)));
        assert!(!digit_allowed(2, 4, Some(2)));
    }

    #[test]
    fn minute_and_second_tens_limited_to_five() {
        for position in [3, 5] {
            assert!(digit_allowed(position, 5, None));
            assert!(!digit_allowed(position, 6, None));
        }
        for position in [4, 6] {
            assert!(digit_allowed(position, 9, None));
        }
    }

    #[test]
    fn no_position_past_six() {
        assert!(!digit_allowed(7, 0, None));
        assert!(!digit_allowed(0, 0, None));
    }

    #[test]
    fn buffer_cursor_tracks_length() {
        let mut buffer = EntryBuffer::new();
        assert_eq!(buffer.cursor(), 1);
        assert!(buffer.push(1));
        assert!(buffer.push(2));
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(buffer.pop(), Some(2));
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn full_buffer_rejects_further_digits() {
        let mut buffer = EntryBuffer::new();
        for d in [0, 0, 0, 0, 0, 0] {
            assert!(buffer.push(d));
        }
        assert!(buffer.is_complete());
        assert!(!buffer.push(0));
        assert_eq!(buffer.cursor(), CURSOR_COMPLETE);
    }

    #[test]
    fn incomplete_buffer_has_no_time() {
        let mut buffer = EntryBuffer::new();
        buffer.push(1);
        assert_eq!(buffer.to_time(), None);
    }

    #[test]
    fn keys_outside_edit_mode_are_ignored() {
        let mut entry = TimeEntry::new();
        assert_eq!(entry.handle(Mode::Display, Key::Digit(1)), EntryOutcome::Ignored);
        assert_eq!(entry.handle(Mode::Display, Key::Enter), EntryOutcome::Ignored);
        assert_eq!(entry.handle(Mode::Display, Key::Escape), EntryOutcome::Ignored);
        assert_eq!(entry.handle(Mode::Display, Key::Delete), EntryOutcome::Ignored);
        assert_eq!(entry.cursor(), 1);
    }

    #[test]
    fn edit_key_while_editing_is_ignored() {
        let mut entry = TimeEntry::new();
        entry.handle(Mode::Edit, Key::Digit(1));
        assert_eq!(entry.handle(Mode::Edit, Key::Edit), EntryOutcome::Ignored);
        assert_eq!(entry.cursor(), 2);
    }

    #[test]
    fn other_codes_never_change_state() {
        let mut entry = TimeEntry::new();
        assert_eq!(entry.handle(Mode::Edit, Key::Other(b'A')), EntryOutcome::Ignored);
        assert_eq!(entry.cursor(), 1);
    }
}
