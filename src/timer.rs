#[cfg(feature = "logging")]
use log::{debug, warn};

use crate::clock::{Clock, TIMER_MAX};
use crate::errors::TimerError;
use crate::sentinel::SentinelTimer;

/// Represents the state of a timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimerState {
    /// Not counting toward anything.
    #[default]
    Stopped,
    /// Due once the clock reaches `deadline`.
    Armed { deadline: u32 },
}

/// Expiry timer measured against a [`Clock`].
///
/// Unlike [`SentinelTimer`], the stopped state is not a tick value, so
/// extending a stopped timer and deadlines past the tick range are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Timer {
    state: TimerState,
}

impl Timer {
    /// Creates a stopped timer.
    pub const fn new() -> Self {
        Timer {
            state: TimerState::Stopped,
        }
    }

    /// Resets the timer to stopped.
    pub fn init(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Arms the timer to expire `duration` ticks from now, replacing any
    /// previous deadline.
    ///
    /// Fails with [`TimerError::DeadlineOverflow`] when the deadline would
    /// exceed the tick range; the timer is left untouched in that case.
    pub fn start<C: Clock>(&mut self, clock: &C, duration: u32) -> Result<(), TimerError> {
        let deadline = checked_deadline(clock.now(), duration)?;
        self.state = TimerState::Armed { deadline };
        #[cfg(feature = "logging")]
        debug!("Timer started, deadline at tick {}.", deadline);
        Ok(())
    }

    /// Moves the deadline `duration` ticks past the current one.
    ///
    /// Use this after handling an expiry to keep a fixed period without
    /// accumulating handling latency.
    pub fn extend(&mut self, duration: u32) -> Result<(), TimerError> {
        match self.state {
            TimerState::Armed { deadline } => {
                let deadline = checked_deadline(deadline, duration)?;
                self.state = TimerState::Armed { deadline };
                #[cfg(feature = "logging")]
                debug!("Timer extended, deadline at tick {}.", deadline);
                Ok(())
            }
            TimerState::Stopped => {
                #[cfg(feature = "logging")]
                warn!("Extend attempted on a stopped timer.");
                Err(TimerError::NotRunning)
            }
        }
    }

    /// Sets the timer to stopped.
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// True while the timer holds a deadline, whether or not it has passed.
    pub fn running(&self) -> bool {
        matches!(self.state, TimerState::Armed { .. })
    }

    /// True once an armed timer's deadline has been reached. Never true for
    /// a stopped timer.
    pub fn expired<C: Clock>(&self, clock: &C) -> bool {
        match self.state {
            TimerState::Armed { deadline } => clock.now() >= deadline,
            TimerState::Stopped => false,
        }
    }

    /// Gets the current state of the timer.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// The absolute deadline, if armed.
    pub fn deadline(&self) -> Option<u32> {
        match self.state {
            TimerState::Armed { deadline } => Some(deadline),
            TimerState::Stopped => None,
        }
    }

    /// Ticks left until the deadline, saturating at zero once expired.
    pub fn remaining<C: Clock>(&self, clock: &C) -> Option<u32> {
        self.deadline()
            .map(|deadline| deadline.saturating_sub(clock.now()))
    }
}

fn checked_deadline(base: u32, duration: u32) -> Result<u32, TimerError> {
    base.checked_add(duration).ok_or_else(|| {
        #[cfg(feature = "logging")]
        warn!("Deadline overflow: {} + {}.", base, duration);
        TimerError::DeadlineOverflow { base, duration }
    })
}

impl From<SentinelTimer> for Timer {
    fn from(timer: SentinelTimer) -> Self {
        let state = if timer.running() {
            TimerState::Armed {
                deadline: timer.expiry(),
            }
        } else {
            TimerState::Stopped
        };
        Timer { state }
    }
}

/// An armed deadline of exactly [`TIMER_MAX`] has no sentinel encoding and
/// converts to a stopped timer.
impl From<Timer> for SentinelTimer {
    fn from(timer: Timer) -> Self {
        let mut sentinel = SentinelTimer::new();
        if let TimerState::Armed { deadline } = timer.state {
            if deadline != TIMER_MAX {
                sentinel.start(&deadline, 0);
            }
        }
        sentinel
    }
}
