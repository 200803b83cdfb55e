//! Shared test infrastructure for keypad-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use heapless::{Deque, Vec};
use keypad_clock::{
    ClockConfig, ClockFirmware, Display, Keypad, StatusLeds, Tick, TickSource, key,
};

// ============================================================================
// Mock Tick Source
// ============================================================================

/// Mock tick counter with controllable time advancement
pub struct MockTickSource {
    current: core::cell::Cell<Tick>,
}

impl MockTickSource {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(tick: Tick) -> Self {
        Self {
            current: core::cell::Cell::new(tick),
        }
    }

    /// Advance the counter by the given number of ticks
    pub fn advance(&self, ticks: Tick) {
        self.current.set(self.current.get().wrapping_add(ticks));
    }

    pub fn set(&self, tick: Tick) {
        self.current.set(tick);
    }
}

impl TickSource for MockTickSource {
    fn now(&self) -> Tick {
        self.current.get()
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// Mock six-cell scrolling display that records separator and battery writes
pub struct MockDisplay {
    cells: [u8; 6],
    pub separator: bool,
    pub separator_history: Vec<bool, 256>,
    pub battery_history: Vec<u8, 512>,
    pub left_writes: usize,
    pub right_writes: usize,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            cells: [b' '; 6],
            separator: false,
            separator_history: Vec::new(),
            battery_history: Vec::new(),
            left_writes: 0,
            right_writes: 0,
        }
    }

    /// Current cell contents, leftmost first
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.cells).unwrap()
    }
}

impl Display for MockDisplay {
    fn put_left(&mut self, c: u8) {
        self.cells.rotate_left(1);
        self.cells[5] = c;
        self.left_writes += 1;
    }

    fn put_right(&mut self, c: u8) {
        self.cells.rotate_right(1);
        self.cells[0] = c;
        self.right_writes += 1;
    }

    fn set_separator(&mut self, on: bool) {
        self.separator = on;
        let _ = self.separator_history.push(on);
    }

    fn set_battery_segment(&mut self, position: u8) {
        let _ = self.battery_history.push(position);
    }
}

// ============================================================================
// Mock Keypad
// ============================================================================

/// Mock keypad returning queued key codes, one per read
pub struct MockKeypad {
    queue: Deque<u8, 64>,
    pub reads: usize,
}

impl MockKeypad {
    pub fn new() -> Self {
        Self {
            queue: Deque::new(),
            reads: 0,
        }
    }

    pub fn press(&mut self, code: u8) {
        self.queue.push_back(code).unwrap();
    }

    pub fn press_all(&mut self, codes: &[u8]) {
        for &code in codes {
            self.press(code);
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Keypad for MockKeypad {
    fn read_key(&mut self) -> Option<u8> {
        self.reads += 1;
        self.queue.pop_front()
    }
}

// ============================================================================
// Mock LEDs
// ============================================================================

/// Mock LED pair that records every write
pub struct MockLeds {
    pub led1: bool,
    pub led2: bool,
    pub history: Vec<(bool, bool), 256>,
}

impl MockLeds {
    pub fn new() -> Self {
        Self {
            led1: false,
            led2: false,
            history: Vec::new(),
        }
    }
}

impl StatusLeds for MockLeds {
    fn set_led1(&mut self, on: bool) {
        self.led1 = on;
    }

    fn set_led2(&mut self, on: bool) {
        self.led2 = on;
        let _ = self.history.push((self.led1, self.led2));
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestClock<'t> = ClockFirmware<'t, MockTickSource, MockDisplay, MockKeypad, MockLeds>;

/// Builds firmware with the default 16 Hz configuration
pub fn clock(ticks: &MockTickSource) -> TestClock<'_> {
    clock_with(ticks, ClockConfig::default())
}

pub fn clock_with(ticks: &MockTickSource, config: ClockConfig) -> TestClock<'_> {
    ClockFirmware::new(
        config,
        ticks,
        MockDisplay::new(),
        MockKeypad::new(),
        MockLeds::new(),
    )
    .unwrap()
}

/// Polls once per tick for `n` ticks, starting with a poll at the current tick
pub fn run_ticks(clock: &mut TestClock<'_>, ticks: &MockTickSource, n: u32) {
    for _ in 0..n {
        clock.poll();
        ticks.advance(1);
    }
}

/// Queues keys and polls once per tick until the keypad is drained
///
/// With the default config the keypad task fires every tick, so each key is
/// consumed by exactly one poll.
pub fn type_keys(clock: &mut TestClock<'_>, ticks: &MockTickSource, codes: &[u8]) {
    clock.keypad_mut().press_all(codes);
    while clock.keypad().pending() > 0 {
        clock.poll();
        ticks.advance(1);
    }
}

pub const EDIT: u8 = key::EDIT;
pub const ENTER: u8 = key::ENTER;
pub const ESCAPE: u8 = key::ESCAPE;
pub const DELETE: u8 = key::DELETE;
