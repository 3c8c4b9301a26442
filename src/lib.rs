//! # tick-timer
//! Allocation-free expiry timers for protocol state machines, measured in
//! ticks of an explicitly passed clock.
//!
//! [`Timer`] is the checked API. [`SentinelTimer`] keeps the one-word,
//! sentinel-encoded form with wrapping arithmetic. [`TickDriver`] advances a
//! [`SharedTickCounter`] from a tokio task.

pub mod clock;
pub mod driver;
pub mod errors;
pub mod sentinel;
pub mod timer;

pub use clock::{Clock, SharedTickCounter, TickCounter, TIMER_MAX};
pub use driver::{TickDriver, TickHandler};
pub use errors::TimerError;
pub use sentinel::SentinelTimer;
pub use timer::{Timer, TimerState};
