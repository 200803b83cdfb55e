//! Core clock types.

/// A wall-clock time between 00:00:00 and 23:59:59.
///
/// Fields are only reachable through validated constructors and [`tick`],
/// so a value is always in range.
///
/// [`tick`]: TimeOfDay::tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl TimeOfDay {
    /// 00:00:00.
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Creates a time, rejecting out-of-range fields.
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Result<Self, TimeError> {
        if hours >= 24 {
            return Err(TimeError::HoursOutOfRange(hours));
        }
        if minutes >= 60 {
            return Err(TimeError::MinutesOutOfRange(minutes));
        }
        if seconds >= 60 {
            return Err(TimeError::SecondsOutOfRange(seconds));
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Builds a time from six decimal digit values (`HHMMSS`).
    ///
    /// Callers guarantee each pair is in range; the entry state machine only
    /// ever stores digits that pass positional validation.
    pub(crate) fn from_validated_digits(digits: [u8; 6]) -> Self {
        let time = Self {
            hours: digits[0] * 10 + digits[1],
            minutes: digits[2] * 10 + digits[3],
            seconds: digits[4] * 10 + digits[5],
        };
        debug_assert!(time.hours < 24 && time.minutes < 60 && time.seconds < 60);
        time
    }

    #[inline]
    pub fn hours(&self) -> u8 {
        self.hours
    }

    #[inline]
    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    #[inline]
    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Advances by one second, carrying into minutes and hours.
    ///
    /// 23:59:59 wraps to 00:00:00; there is no day counter.
    pub fn tick(&mut self) {
        self.seconds += 1;
        if self.seconds >= 60 {
            self.seconds = 0;
            self.minutes += 1;

            if self.minutes >= 60 {
                self.minutes = 0;
                self.hours += 1;

                if self.hours >= 24 {
                    self.hours = 0;
                }
            }
        }
    }

    /// The six ASCII digits shown on the display, hour tens first.
    pub fn digits(&self) -> [u8; 6] {
        [
            b'0' + self.hours / 10,
            b'0' + self.hours % 10,
            b'0' + self.minutes / 10,
            b'0' + self.minutes % 10,
            b'0' + self.seconds / 10,
            b'0' + self.seconds % 10,
        ]
    }
}

impl core::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Time construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeError {
    /// Hours not in 0-23.
    HoursOutOfRange(u8),

    /// Minutes not in 0-59.
    MinutesOutOfRange(u8),

    /// Seconds not in 0-59.
    SecondsOutOfRange(u8),
}

impl core::fmt::Display for TimeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TimeError::HoursOutOfRange(h) => write!(f, "hours {} out of range 0-23", h),
            TimeError::MinutesOutOfRange(m) => write!(f, "minutes {} out of range 0-59", m),
            TimeError::SecondsOutOfRange(s) => write!(f, "seconds {} out of range 0-59", s),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimeError {}

/// Application mode shared by all tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Clock is shown, separator blinks.
    #[default]
    Display,
    /// User is typing a new time.
    Edit,
}

/// Authoritative time plus the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockState {
    pub time: TimeOfDay,
    pub mode: Mode,
}

impl ClockState {
    pub const fn new(time: TimeOfDay) -> Self {
        Self {
            time,
            mode: Mode::Display,
        }
    }
}
