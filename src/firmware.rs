//! The clock main loop.
//!
//! Provides [`ClockFirmware`], which owns the ports, the shared clock context
//! and a [`Scheduler`] loaded with the five clock tasks. Call [`poll`] once per
//! tick-counter update, or hand control to [`run`] and let it sleep between
//! ticks.
//!
//! [`poll`]: ClockFirmware::poll
//! [`run`]: ClockFirmware::run

use crate::config::ClockConfig;
use crate::ports::{Display, Keypad, StatusLeds};
use crate::schedule::{Scheduler, SchedulerError};
use crate::tasks::{
    ClockContext, battery_task, clock_task, dots_task, keypad_task, led_task,
};
use crate::time::TickSource;
use crate::types::{ClockState, Mode, TimeOfDay};

/// Number of tasks the firmware runs.
pub const TASK_COUNT: usize = 5;

/// Errors that can occur while setting up the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FirmwareError {
    /// A task could not be registered.
    Scheduler(SchedulerError),
}

impl core::fmt::Display for FirmwareError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FirmwareError::Scheduler(err) => write!(f, "scheduler error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FirmwareError {}

impl From<SchedulerError> for FirmwareError {
    fn from(err: SchedulerError) -> Self {
        FirmwareError::Scheduler(err)
    }
}

/// Keypad-editable clock driven by a tick counter.
///
/// Tasks run in a fixed order on every poll: clock, keypad, battery, dots,
/// led. A mode change made by the keypad is therefore visible to the
/// animations in the same pass, but only to the clock on the next one.
///
/// # Type Parameters
/// * `'t` - Lifetime of the tick source reference
/// * `T` - Tick source implementation type
/// * `D` - Display implementation type
/// * `K` - Keypad implementation type
/// * `L` - Status LED implementation type
pub struct ClockFirmware<'t, T: TickSource, D: Display, K: Keypad, L: StatusLeds> {
    tick_source: &'t T,
    scheduler: Scheduler<ClockContext<D, K, L>, TASK_COUNT>,
    ctx: ClockContext<D, K, L>,
}

impl<'t, T, D, K, L> ClockFirmware<'t, T, D, K, L>
where
    T: TickSource,
    D: Display,
    K: Keypad,
    L: StatusLeds,
{
    /// Creates the firmware and registers its tasks.
    ///
    /// Every task is first due at the tick current at construction, so the
    /// first [`poll`](Self::poll) draws the display immediately. LEDs are
    /// switched off.
    pub fn new(
        config: ClockConfig,
        tick_source: &'t T,
        display: D,
        keypad: K,
        mut leds: L,
    ) -> Result<Self, FirmwareError> {
        leds.set_led1(false);
        leds.set_led2(false);

        let start = tick_source.now();
        let mut scheduler: Scheduler<ClockContext<D, K, L>, TASK_COUNT> = Scheduler::new();
        scheduler.add("clock", config.clock_period(), start, clock_task::<D, K, L>)?;
        scheduler.add("keypad", config.keypad_period(), start, keypad_task::<D, K, L>)?;
        scheduler.add("battery", config.battery_period(), start, battery_task::<D, K, L>)?;
        scheduler.add("dots", config.dots_period(), start, dots_task::<D, K, L>)?;
        scheduler.add("led", config.led_period(), start, led_task::<D, K, L>)?;

        let ctx = ClockContext::new(
            display,
            keypad,
            leds,
            ClockState::new(config.initial_time()),
            config.battery_period(),
        );

        info!("clock started at {} (tick {})", config.initial_time(), start);

        Ok(Self {
            tick_source,
            scheduler,
            ctx,
        })
    }

    /// Runs one main-loop iteration: every task that is due fires once.
    ///
    /// Returns how many tasks fired.
    pub fn poll(&mut self) -> usize {
        let now = self.tick_source.now();
        self.scheduler.run_pending(now, &mut self.ctx)
    }

    /// Polls forever, calling `wait` between iterations.
    ///
    /// `wait` should sleep until the tick counter changes (typically a
    /// wait-for-interrupt).
    pub fn run<W: FnMut()>(&mut self, mut wait: W) -> ! {
        loop {
            self.poll();
            wait();
        }
    }

    #[inline]
    pub fn time(&self) -> TimeOfDay {
        self.ctx.state.time
    }

    /// Overrides the time. Does not leave Edit mode.
    pub fn set_time(&mut self, time: TimeOfDay) {
        self.ctx.state.time = time;
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.ctx.state.mode
    }

    /// Time-entry cursor, 1..=7.
    #[inline]
    pub fn entry_cursor(&self) -> u8 {
        self.ctx.entry.cursor()
    }

    /// Digits typed so far in the current edit.
    pub fn entry_digits(&self) -> &[u8] {
        self.ctx.entry.buffer().digits()
    }

    /// Task schedules in run order.
    pub fn scheduler(&self) -> &Scheduler<ClockContext<D, K, L>, TASK_COUNT> {
        &self.scheduler
    }

    pub fn display(&self) -> &D {
        &self.ctx.display
    }

    pub fn keypad(&self) -> &K {
        &self.ctx.keypad
    }

    /// Mutable keypad access, e.g. to queue key codes from an interrupt buffer.
    pub fn keypad_mut(&mut self) -> &mut K {
        &mut self.ctx.keypad
    }

    pub fn leds(&self) -> &L {
        &self.ctx.leds
    }

    /// Consumes the firmware and returns its ports.
    pub fn into_ports(self) -> (D, K, L) {
        (self.ctx.display, self.ctx.keypad, self.ctx.leds)
    }
}
