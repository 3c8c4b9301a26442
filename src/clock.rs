//! Tick counters that timers are measured against.
//!
//! A tick is whatever one increment of the counter means to its driver,
//! nominally one millisecond. Timers never read a global; every query takes
//! a [`Clock`] so independent clocks can coexist in one process.

use std::sync::atomic::{AtomicU32, Ordering};

/// Reserved tick value that encodes "stopped" in a [`SentinelTimer`](crate::SentinelTimer).
pub const TIMER_MAX: u32 = u32::MAX;

/// A source of the current tick.
pub trait Clock {
    /// Returns the current tick.
    fn now(&self) -> u32;
}

/// A frozen instant.
impl Clock for u32 {
    fn now(&self) -> u32 {
        *self
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u32 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> u32 {
        (**self).now()
    }
}

/// Tick counter owned by a single execution context.
///
/// Advancing past [`TIMER_MAX`] wraps to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCounter {
    ticks: u32,
}

impl TickCounter {
    /// Creates a counter at tick zero.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a counter at the given tick.
    pub fn starting_at(ticks: u32) -> Self {
        TickCounter { ticks }
    }

    /// Advances the counter by one tick.
    pub fn tick(&mut self) {
        self.advance(1);
    }

    /// Advances the counter by `ticks`.
    pub fn advance(&mut self, ticks: u32) {
        self.ticks = self.ticks.wrapping_add(ticks);
    }

    /// Moves the counter to an absolute tick.
    pub fn set(&mut self, ticks: u32) {
        self.ticks = ticks;
    }
}

impl Clock for TickCounter {
    fn now(&self) -> u32 {
        self.ticks
    }
}

/// Tick counter with one writer and any number of readers across tasks.
///
/// Only tearing of the word is ruled out; no ordering with other memory is
/// implied, so all accesses are relaxed.
#[derive(Debug, Default)]
pub struct SharedTickCounter {
    ticks: AtomicU32,
}

impl SharedTickCounter {
    /// Creates a counter at tick zero.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a counter at the given tick.
    pub fn starting_at(ticks: u32) -> Self {
        SharedTickCounter {
            ticks: AtomicU32::new(ticks),
        }
    }

    /// Advances the counter by one tick and returns the new value.
    pub fn tick(&self) -> u32 {
        self.advance(1)
    }

    /// Advances the counter by `ticks` and returns the new value.
    pub fn advance(&self, ticks: u32) -> u32 {
        // fetch_add wraps on overflow
        self.ticks
            .fetch_add(ticks, Ordering::Relaxed)
            .wrapping_add(ticks)
    }

    /// Moves the counter to an absolute tick.
    pub fn set(&self, ticks: u32) {
        self.ticks.store(ticks, Ordering::Relaxed);
    }
}

impl Clock for SharedTickCounter {
    fn now(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }
}
