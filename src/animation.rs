//! Decorative animation state.

use crate::time::Tick;

/// Direction of the battery sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Left,
    Right,
}

/// Number of speed phases in one battery cycle.
pub const BATTERY_PHASES: u8 = 4;

/// Highest segment reached by the sweep.
const LAST_SEGMENT: u8 = 6;

/// Bouncing battery gauge that speeds up on every direction change.
///
/// The sweep starts at segment 0 moving right. Each bounce moves to the next
/// phase, doubling the speed, and after the fourth phase it drops back to the
/// base speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryAnimation {
    direction: Direction,
    position: u8,
    phase: u8,
}

impl Default for BatteryAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl BatteryAnimation {
    pub const fn new() -> Self {
        Self {
            direction: Direction::Right,
            position: 0,
            phase: 0,
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Segment shown on the next step.
    #[inline]
    pub fn position(&self) -> u8 {
        self.position
    }

    #[inline]
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Speed multiplier for the current phase: 1, 2, 4 or 8.
    #[inline]
    pub fn speed_factor(&self) -> u32 {
        1 << self.phase
    }

    /// Ticks until the next step, given the base sweep period.
    ///
    /// Never shorter than one tick.
    pub fn period(&self, base_period: Tick) -> Tick {
        (base_period / self.speed_factor()).max(1)
    }

    /// Returns the segment to show now and moves the sweep one step on.
    pub fn step(&mut self) -> u8 {
        let shown = self.position;

        match self.direction {
            Direction::Right => {
                self.position += 1;
                if self.position > LAST_SEGMENT {
                    self.position = LAST_SEGMENT;
                    self.bounce(Direction::Left);
                }
            }
            Direction::Left => {
                self.position -= 1;
                if self.position == 0 {
                    self.position = 1;
                    self.bounce(Direction::Right);
                }
            }
        }

        shown
    }

    fn bounce(&mut self, direction: Direction) {
        self.direction = direction;
        self.phase = (self.phase + 1) % BATTERY_PHASES;
    }
}

/// Two-state blinker that can be parked in a known phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blink {
    on: bool,
}

impl Blink {
    pub const fn new() -> Self {
        Self { on: false }
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Returns the current state and flips it.
    pub fn toggle(&mut self) -> bool {
        let current = self.on;
        self.on = !self.on;
        current
    }

    /// Parks the blinker in the off state.
    pub fn reset(&mut self) {
        self.on = false;
    }
}
