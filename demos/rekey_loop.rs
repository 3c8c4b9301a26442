use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tick_timer::{SharedTickCounter, TickDriver, TickHandler, Timer, TimerError};
use tokio::time::sleep;

const REKEY_PERIOD_MS: u32 = 200;
const LIVENESS_TIMEOUT_MS: u32 = 600;

struct Session {
    timers: Mutex<SessionTimers>,
}

struct SessionTimers {
    rekey: Timer,
    liveness: Timer,
    rekeys: u32,
}

#[async_trait]
impl TickHandler for Session {
    async fn on_tick(&self, now: u32) -> Result<(), TimerError> {
        let mut timers = self.timers.lock().unwrap();

        if timers.rekey.expired(&now) {
            timers.rekeys += 1;
            println!("[{now:>5} ms] re-key #{}", timers.rekeys);
            // anchored to the previous deadline, not to `now`
            timers.rekey.extend(REKEY_PERIOD_MS)?;
        }

        // the peer answers after every second re-key, then goes silent
        if timers.rekeys < 4
            && timers.rekeys % 2 == 0
            && timers.rekey.remaining(&now) == Some(REKEY_PERIOD_MS - 1)
        {
            println!("[{now:>5} ms] heartbeat, liveness restarted");
            timers.liveness.start(&now, LIVENESS_TIMEOUT_MS)?;
        }

        if timers.liveness.expired(&now) {
            println!("[{now:>5} ms] peer timed out");
            timers.liveness.stop();
            timers.rekey.stop();
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let counter = Arc::new(SharedTickCounter::new());

    let mut rekey = Timer::new();
    rekey.start(counter.as_ref(), REKEY_PERIOD_MS).unwrap();
    let mut liveness = Timer::new();
    liveness.start(counter.as_ref(), LIVENESS_TIMEOUT_MS).unwrap();

    let session = Session {
        timers: Mutex::new(SessionTimers {
            rekey,
            liveness,
            rekeys: 0,
        }),
    };

    let mut driver = TickDriver::new(Arc::clone(&counter), Duration::from_millis(1))
        .unwrap()
        .with_handler(session);
    driver.start().await.unwrap();

    sleep(Duration::from_millis(1500)).await;

    driver.stop().unwrap();
    println!("Driver stopped.");
}
