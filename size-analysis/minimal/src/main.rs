#![no_std]
#![no_main]

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use heapless::Deque;
use keypad_clock::{ClockConfig, ClockFirmware, Display, Keypad, StatusLeds, Tick, TickSource};
use panic_halt as _;

/// Core clock assumed for the SysTick reload value.
const CORE_HZ: u32 = 8_000_000;

// ============================================================================
// Tick Counter
// ============================================================================

/// Tick counter written only by the SysTick handler.
static TICKS: AtomicU32 = AtomicU32::new(0);

#[exception]
fn SysTick() {
    // Single writer, so load + store is enough on cores without atomic RMW
    let now = TICKS.load(Ordering::Relaxed);
    TICKS.store(now.wrapping_add(1), Ordering::Relaxed);
}

pub struct SysTickCounter;

impl TickSource for SysTickCounter {
    fn now(&self) -> Tick {
        TICKS.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Minimal Port Implementations
// ============================================================================

/// Zero-size display for measuring library overhead
pub struct MinimalDisplay;

impl Display for MinimalDisplay {
    fn put_left(&mut self, c: u8) {
        core::hint::black_box(c);
    }

    fn put_right(&mut self, c: u8) {
        core::hint::black_box(c);
    }

    fn set_separator(&mut self, on: bool) {
        core::hint::black_box(on);
    }

    fn set_battery_segment(&mut self, position: u8) {
        core::hint::black_box(position);
    }
}

/// Keypad fed from a small ring buffer
pub struct BufferedKeypad {
    pending: Deque<u8, 8>,
}

impl Keypad for BufferedKeypad {
    fn read_key(&mut self) -> Option<u8> {
        self.pending.pop_front()
    }
}

pub struct MinimalLeds;

impl StatusLeds for MinimalLeds {
    fn set_led1(&mut self, on: bool) {
        core::hint::black_box(on);
    }

    fn set_led2(&mut self, on: bool) {
        core::hint::black_box(on);
    }
}

#[entry]
fn main() -> ! {
    let mut cp = cortex_m::Peripherals::take().unwrap();

    let config = ClockConfig::default();
    cp.SYST.set_clock_source(SystClkSource::Core);
    cp.SYST.set_reload(CORE_HZ / config.tick_hz() - 1);
    cp.SYST.clear_current();
    cp.SYST.enable_interrupt();
    cp.SYST.enable_counter();

    let ticks = SysTickCounter;
    let keypad = BufferedKeypad {
        pending: Deque::new(),
    };

    let mut clock = ClockFirmware::new(config, &ticks, MinimalDisplay, keypad, MinimalLeds).unwrap();

    // Sleep until the next SysTick between polls
    clock.run(cortex_m::asm::wfi)
}
