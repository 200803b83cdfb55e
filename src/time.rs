//! Tick counter abstraction for platform-agnostic scheduling.

/// One unit of the base tick counter.
pub type Tick = u32;

/// Trait for abstracting the base tick counter.
///
/// The counter increments at a fixed rate (see
/// [`ClockConfig::tick_hz`](crate::ClockConfig::tick_hz)) and is read-only to
/// the library. Wrapping is tolerated as long as no task lags behind by more
/// than half the counter range.
pub trait TickSource {
    /// Returns the current tick count.
    fn now(&self) -> Tick;
}

/// Returns true once `now` has reached or passed `deadline`.
///
/// Compares through a wrapping difference so deadlines keep working across a
/// counter overflow.
#[inline]
pub fn has_reached(now: Tick, deadline: Tick) -> bool {
    (now.wrapping_sub(deadline) as i32) >= 0
}
