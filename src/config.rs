//! Task rates and startup settings.

use crate::time::Tick;
use crate::types::TimeOfDay;

/// Validated clock configuration.
///
/// Every task period is derived as `tick_hz / rate` using integer division,
/// so rates that do not divide the tick rate round the period down (the
/// default 5 Hz LED blink runs every 3 ticks of a 16 Hz counter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    tick_hz: u32,
    clock_hz: u32,
    keypad_hz: u32,
    battery_hz: u32,
    dots_hz: u32,
    led_hz: u32,
    initial_time: TimeOfDay,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_hz: 16,
            clock_hz: 1,
            keypad_hz: 10,
            battery_hz: 2,
            dots_hz: 2,
            led_hz: 5,
            initial_time: TimeOfDay::MIDNIGHT,
        }
    }
}

impl ClockConfig {
    /// Creates a builder seeded with the default rates.
    pub fn builder() -> ClockConfigBuilder {
        ClockConfigBuilder::new()
    }

    /// Base tick counter frequency.
    #[inline]
    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    #[inline]
    pub fn initial_time(&self) -> TimeOfDay {
        self.initial_time
    }

    #[inline]
    pub fn clock_period(&self) -> Tick {
        self.tick_hz / self.clock_hz
    }

    #[inline]
    pub fn keypad_period(&self) -> Tick {
        self.tick_hz / self.keypad_hz
    }

    /// Battery sweep period at the slowest animation phase.
    #[inline]
    pub fn battery_period(&self) -> Tick {
        self.tick_hz / self.battery_hz
    }

    #[inline]
    pub fn dots_period(&self) -> Tick {
        self.tick_hz / self.dots_hz
    }

    #[inline]
    pub fn led_period(&self) -> Tick {
        self.tick_hz / self.led_hz
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A rate of zero was given.
    ZeroRate {
        /// Which rate.
        name: &'static str,
    },

    /// A task rate is faster than the tick counter.
    RateAboveTickRate {
        /// Which task.
        name: &'static str,
        rate_hz: u32,
        tick_hz: u32,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroRate { name } => write!(f, "{} rate must be non-zero", name),
            ConfigError::RateAboveTickRate {
                name,
                rate_hz,
                tick_hz,
            } => write!(
                f,
                "{} rate of {} Hz exceeds tick rate of {} Hz",
                name, rate_hz, tick_hz
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Builder for [`ClockConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ClockConfigBuilder {
    config: ClockConfig,
}

impl Default for ClockConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClockConfig::default(),
        }
    }

    /// Sets the tick counter frequency.
    pub fn tick_hz(mut self, hz: u32) -> Self {
        self.config.tick_hz = hz;
        self
    }

    /// Sets the clock increment rate. Anything but 1 Hz makes a stopwatch.
    pub fn clock_hz(mut self, hz: u32) -> Self {
        self.config.clock_hz = hz;
        self
    }

    /// Sets how often the keypad is polled.
    pub fn keypad_hz(mut self, hz: u32) -> Self {
        self.config.keypad_hz = hz;
        self
    }

    /// Sets the battery sweep rate at its slowest phase.
    pub fn battery_hz(mut self, hz: u32) -> Self {
        self.config.battery_hz = hz;
        self
    }

    /// Sets the separator toggle rate.
    pub fn dots_hz(mut self, hz: u32) -> Self {
        self.config.dots_hz = hz;
        self
    }

    /// Sets the edit-mode LED toggle rate.
    pub fn led_hz(mut self, hz: u32) -> Self {
        self.config.led_hz = hz;
        self
    }

    /// Sets the time shown at power-up.
    pub fn initial_time(mut self, time: TimeOfDay) -> Self {
        self.config.initial_time = time;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    /// * `ZeroRate` - The tick rate or a task rate is zero
    /// * `RateAboveTickRate` - A task would need a period shorter than one tick
    pub fn build(self) -> Result<ClockConfig, ConfigError> {
        let config = self.config;

        if config.tick_hz == 0 {
            return Err(ConfigError::ZeroRate { name: "tick" });
        }

        let rates = [
            ("clock", config.clock_hz),
            ("keypad", config.keypad_hz),
            ("battery", config.battery_hz),
            ("dots", config.dots_hz),
            ("led", config.led_hz),
        ];

        for (name, rate_hz) in rates {
            if rate_hz == 0 {
                return Err(ConfigError::ZeroRate { name });
            }
            if rate_hz > config.tick_hz {
                return Err(ConfigError::RateAboveTickRate {
                    name,
                    rate_hz,
                    tick_hz: config.tick_hz,
                });
            }
        }

        Ok(config)
    }
}
