//! Hardware abstraction traits.
//!
//! Implement these for your display, keypad and LEDs to let the clock drive
//! them. None of the methods can fail; handle hardware errors internally.

/// Six-cell character display with separator dots and a battery gauge.
pub trait Display {
    /// Shifts every cell one place left and writes `c` into the rightmost cell.
    fn put_left(&mut self, c: u8);

    /// Shifts every cell one place right and writes `c` into the leftmost cell.
    ///
    /// Used with a blank to erase the most recently echoed digit.
    fn put_right(&mut self, c: u8);

    /// Turns the `HH:MM:SS` separator dots on or off.
    fn set_separator(&mut self, on: bool);

    /// Shows the battery gauge at segment `position` (0..=7).
    fn set_battery_segment(&mut self, position: u8);
}

/// Non-blocking keypad.
pub trait Keypad {
    /// Returns the most recently pressed key code, or `None` if nothing new.
    fn read_key(&mut self) -> Option<u8>;
}

/// Two indicator LEDs blinked while editing.
pub trait StatusLeds {
    fn set_led1(&mut self, on: bool);

    fn set_led2(&mut self, on: bool);
}
