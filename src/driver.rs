use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
#[cfg(feature = "logging")]
use log::{debug, error};

use crate::clock::SharedTickCounter;
use crate::errors::TimerError;

/// A trait for code that runs after every tick, typically a state machine
/// polling its timers.
#[async_trait]
pub trait TickHandler: Send + Sync {
    /// Called with the counter value right after it was advanced.
    async fn on_tick(&self, now: u32) -> Result<(), TimerError>;
}

/// Advances a [`SharedTickCounter`] once per period on the tokio runtime.
pub struct TickDriver {
    counter: Arc<SharedTickCounter>,
    period: Duration,
    handler: Option<Arc<dyn TickHandler>>,
    handle: Option<JoinHandle<()>>,
}

impl TickDriver {
    /// Creates a stopped driver for `counter`.
    pub fn new(counter: Arc<SharedTickCounter>, period: Duration) -> Result<Self, TimerError> {
        if period.is_zero() {
            return Err(TimerError::InvalidParameter(
                "Tick period must be greater than zero.".into(),
            ));
        }
        Ok(TickDriver {
            counter,
            period,
            handler: None,
            handle: None,
        })
    }

    /// Registers a handler invoked after each tick.
    pub fn with_handler<H>(mut self, handler: H) -> Self
    where
        H: TickHandler + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// The counter this driver advances.
    pub fn counter(&self) -> &Arc<SharedTickCounter> {
        &self.counter
    }

    /// The tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the tick task is alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Spawns the tick task. The first tick lands one period from now.
    ///
    /// Late periods are caught up in a burst so that no tick is lost.
    pub async fn start(&mut self) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::AlreadyRunning);
        }

        let counter = Arc::clone(&self.counter);
        let handler = self.handler.clone();
        let period = self.period;

        #[cfg(feature = "logging")]
        debug!("Starting tick driver with period {:?}.", period);

        self.handle = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                interval.tick().await;
                let now = counter.tick();

                if let Some(handler) = &handler {
                    if let Err(e) = handler.on_tick(now).await {
                        #[cfg(feature = "logging")]
                        error!("Tick handler error at tick {}: {}", now, e);
                        #[cfg(not(feature = "logging"))]
                        let _ = e;
                    }
                }
            }
        }));

        Ok(())
    }

    /// Stops the tick task. The counter keeps its value.
    pub fn stop(&mut self) -> Result<(), TimerError> {
        match self.handle.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                #[cfg(feature = "logging")]
                debug!("Tick driver stopped at tick {}.", crate::Clock::now(&self.counter));
                Ok(())
            }
            _ => Err(TimerError::NotRunning),
        }
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
