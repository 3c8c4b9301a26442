//! Error handling module for tick-timer.

use thiserror::Error;

/// Custom error type for timer and driver operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Operation needs a running timer or driver, but it is stopped.
    #[error("Operation attempted on a stopped timer.")]
    NotRunning,

    /// The driver is already running.
    #[error("Driver is already running.")]
    AlreadyRunning,

    /// The computed deadline does not fit in the 32-bit tick space.
    #[error("Deadline overflow: {base} + {duration} exceeds the tick range.")]
    DeadlineOverflow {
        /// Tick the duration was added to.
        base: u32,
        /// Requested duration in ticks.
        duration: u32,
    },

    /// Invalid parameter provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Tick handler execution failed.
    #[error("Callback execution failed: {0}")]
    CallbackError(String),
}
