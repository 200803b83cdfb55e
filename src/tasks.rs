//! The clock's periodic tasks and the context they share.
//!
//! Each task is a plain function over [`ClockContext`] registered with the
//! [`Scheduler`](crate::Scheduler). Tasks run to completion, never block and
//! never call each other; the context is the only thing they share.

use crate::animation::{BatteryAnimation, Blink};
use crate::entry::{EntryOutcome, TimeEntry};
use crate::key::Key;
use crate::ports::{Display, Keypad, StatusLeds};
use crate::schedule::NextDue;
use crate::time::Tick;
use crate::types::{ClockState, Mode};

/// Character written to blank a display cell.
pub const BLANK: u8 = b' ';

/// Number of character cells on the display.
pub const DISPLAY_CELLS: usize = 6;

/// State and ports shared by all tasks.
pub struct ClockContext<D: Display, K: Keypad, L: StatusLeds> {
    pub(crate) display: D,
    pub(crate) keypad: K,
    pub(crate) leds: L,
    pub(crate) state: ClockState,
    pub(crate) entry: TimeEntry,
    pub(crate) battery: BatteryAnimation,
    pub(crate) battery_period: Tick,
    pub(crate) dots: Blink,
    pub(crate) led_blink: Blink,
    pub(crate) leds_lit: bool,
}

impl<D: Display, K: Keypad, L: StatusLeds> ClockContext<D, K, L> {
    pub(crate) fn new(
        display: D,
        keypad: K,
        leds: L,
        state: ClockState,
        battery_period: Tick,
    ) -> Self {
        Self {
            display,
            keypad,
            leds,
            state,
            entry: TimeEntry::new(),
            battery: BatteryAnimation::new(),
            battery_period,
            dots: Blink::new(),
            led_blink: Blink::new(),
            leds_lit: false,
        }
    }

    fn write_cells(&mut self, cells: &[u8]) {
        for &c in cells {
            self.display.put_left(c);
        }
    }
}

/// Shows the time while in Display mode, then advances it one second.
///
/// The time keeps running while the user is editing.
pub fn clock_task<D: Display, K: Keypad, L: StatusLeds>(
    ctx: &mut ClockContext<D, K, L>,
) -> NextDue {
    if ctx.state.mode == Mode::Display {
        let digits = ctx.state.time.digits();
        ctx.write_cells(&digits);
    }

    ctx.state.time.tick();
    NextDue::Period
}

/// Reads one key and runs it through the time-entry machine.
pub fn keypad_task<D: Display, K: Keypad, L: StatusLeds>(
    ctx: &mut ClockContext<D, K, L>,
) -> NextDue {
    let Some(code) = ctx.keypad.read_key() else {
        return NextDue::Period;
    };

    let outcome = ctx.entry.handle(ctx.state.mode, Key::from_code(code));

    match outcome {
        EntryOutcome::EnteredEdit => {
            info!("entering edit mode");
            ctx.state.mode = Mode::Edit;
            ctx.display.set_separator(false);
            ctx.write_cells(&[BLANK; DISPLAY_CELLS]);
        }
        EntryOutcome::DigitAccepted(digit) => {
            ctx.display.put_left(b'0' + digit);
        }
        EntryOutcome::Erased => {
            ctx.display.put_right(BLANK);
        }
        EntryOutcome::Committed(time) => {
            info!("time set to {}", time);
            ctx.state.time = time;
            ctx.state.mode = Mode::Display;
        }
        EntryOutcome::Cancelled => {
            info!("edit cancelled");
            ctx.state.mode = Mode::Display;
        }
        EntryOutcome::DigitRejected(_) | EntryOutcome::Ignored => {}
    }

    NextDue::Period
}

/// Steps the battery sweep. Runs in every mode.
pub fn battery_task<D: Display, K: Keypad, L: StatusLeds>(
    ctx: &mut ClockContext<D, K, L>,
) -> NextDue {
    let period = ctx.battery.period(ctx.battery_period);
    let segment = ctx.battery.step();
    ctx.display.set_battery_segment(segment);
    NextDue::After(period)
}

/// Blinks the separator in Display mode and holds it off while editing.
pub fn dots_task<D: Display, K: Keypad, L: StatusLeds>(
    ctx: &mut ClockContext<D, K, L>,
) -> NextDue {
    match ctx.state.mode {
        Mode::Display => {
            let on = ctx.dots.toggle();
            ctx.display.set_separator(on);
        }
        Mode::Edit => {
            ctx.display.set_separator(false);
            ctx.dots.reset();
        }
    }
    NextDue::Period
}

/// Alternates the two LEDs while editing.
///
/// On the first fire back in Display mode both LEDs are switched off so they
/// never stay lit after an edit ends.
pub fn led_task<D: Display, K: Keypad, L: StatusLeds>(
    ctx: &mut ClockContext<D, K, L>,
) -> NextDue {
    match ctx.state.mode {
        Mode::Edit => {
            let led1 = ctx.led_blink.toggle();
            ctx.leds.set_led1(led1);
            ctx.leds.set_led2(ctx.led_blink.is_on());
            ctx.leds_lit = true;
        }
        Mode::Display if ctx.leds_lit => {
            ctx.leds.set_led1(false);
            ctx.leds.set_led2(false);
            ctx.led_blink.reset();
            ctx.leds_lit = false;
        }
        Mode::Display => {}
    }
    NextDue::Period
}
