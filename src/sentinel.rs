//! One-word timer that encodes "stopped" as [`TIMER_MAX`].
//!
//! Layout-compatible with a bare `u32` expiry field. All arithmetic wraps,
//! which leaves two caller obligations:
//!
//! - never [`extend`](SentinelTimer::extend) a stopped timer: `TIMER_MAX + d`
//!   wraps to `d - 1`, an armed deadline in the past;
//! - keep `now + duration` below `TIMER_MAX`, or the deadline wraps (or lands
//!   on the sentinel and reads as stopped).
//!
//! [`Timer`](crate::Timer) rejects both cases instead.

#[cfg(feature = "logging")]
use log::debug;

use crate::clock::{Clock, TIMER_MAX};

/// Expiry timer stored as a single absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SentinelTimer {
    expiry: u32,
}

impl SentinelTimer {
    /// Creates a stopped timer.
    pub const fn new() -> Self {
        SentinelTimer { expiry: TIMER_MAX }
    }

    /// Resets the timer to stopped.
    ///
    /// Optional before [`start`](Self::start) when the initial state does not
    /// matter.
    pub fn init(&mut self) {
        self.expiry = TIMER_MAX;
    }

    /// Arms the timer to expire `duration` ticks from now, replacing any
    /// previous deadline.
    pub fn start<C: Clock>(&mut self, clock: &C, duration: u32) {
        self.expiry = clock.now().wrapping_add(duration);
        #[cfg(feature = "logging")]
        debug!("Sentinel timer started, expiry at tick {}.", self.expiry);
    }

    /// Pushes the stored expiry `duration` ticks further, for fixed-period
    /// cycles that must not drift.
    pub fn extend(&mut self, duration: u32) {
        self.expiry = self.expiry.wrapping_add(duration);
    }

    /// Sets the timer to stopped.
    pub fn stop(&mut self) {
        self.expiry = TIMER_MAX;
    }

    /// True while the timer holds a deadline, whether or not it has passed.
    pub fn running(&self) -> bool {
        TIMER_MAX > self.expiry
    }

    /// True once the clock has reached the expiry.
    ///
    /// A stopped timer reads as expired at tick [`TIMER_MAX`].
    pub fn expired<C: Clock>(&self, clock: &C) -> bool {
        clock.now() >= self.expiry
    }

    /// Raw expiry word; [`TIMER_MAX`] when stopped.
    pub fn expiry(&self) -> u32 {
        self.expiry
    }
}

impl Default for SentinelTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TickCounter;

    #[test]
    fn starts_stopped() {
        let timer = SentinelTimer::new();
        assert!(!timer.running());
        assert_eq!(timer.expiry(), TIMER_MAX);
        assert_eq!(SentinelTimer::default(), timer);
    }

    #[test]
    fn start_sets_absolute_expiry() {
        let mut clock = TickCounter::starting_at(1000);
        let mut timer = SentinelTimer::new();
        timer.start(&clock, 500);
        assert_eq!(timer.expiry(), 1500);
        assert!(timer.running());
        assert!(!timer.expired(&clock));

        clock.set(1499);
        assert!(!timer.expired(&clock));
        clock.set(1500);
        assert!(timer.expired(&clock));
        // still armed after expiry
        assert!(timer.running());
    }

    #[test]
    fn start_zero_is_immediately_expired() {
        let mut timer = SentinelTimer::new();
        timer.init();
        assert!(!timer.running());
        timer.start(&5000u32, 0);
        assert_eq!(timer.expiry(), 5000);
        assert!(timer.expired(&5000u32));
    }

    #[test]
    fn restart_replaces_deadline() {
        let mut timer = SentinelTimer::new();
        timer.start(&100u32, 50);
        timer.start(&120u32, 50);
        assert_eq!(timer.expiry(), 170);
    }

    #[test]
    fn extend_accumulates_from_previous_deadline() {
        let mut timer = SentinelTimer::new();
        timer.start(&1000u32, 100);
        timer.extend(100);
        assert_eq!(timer.expiry(), 1200);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut timer = SentinelTimer::new();
        timer.start(&0u32, 10);
        timer.stop();
        assert!(!timer.running());
        timer.stop();
        assert!(!timer.running());
    }

    #[test]
    fn extend_on_stopped_wraps_to_small_deadline() {
        let mut timer = SentinelTimer::new();
        timer.init();
        timer.extend(10);
        assert_eq!(timer.expiry(), 9);
        assert!(timer.running());
        assert!(!timer.expired(&8u32));
        assert!(timer.expired(&9u32));
    }

    #[test]
    fn stopped_timer_reads_expired_at_max_tick() {
        let timer = SentinelTimer::new();
        assert!(!timer.expired(&(TIMER_MAX - 1)));
        assert!(timer.expired(&TIMER_MAX));
    }

    #[test]
    fn start_landing_on_sentinel_reads_stopped() {
        let mut timer = SentinelTimer::new();
        timer.start(&(TIMER_MAX - 10), 10);
        assert!(!timer.running());
    }

    #[test]
    fn start_past_tick_range_wraps() {
        let mut timer = SentinelTimer::new();
        timer.start(&(TIMER_MAX - 5), 10);
        assert_eq!(timer.expiry(), 4);
        assert!(timer.running());
    }
}
