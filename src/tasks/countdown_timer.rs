//! Recurring one-second tick callback

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome};

/// Interval between ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to the scheduled tick callback.
///
/// Acquired by `AppState::start`, released by `invalidate`. Dropping the
/// handle releases it as well.
#[derive(Debug)]
pub struct ActiveTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

impl ActiveTimer {
    pub fn new(generation: u64, handle: JoinHandle<()>) -> Self {
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel the callback. No tick fires after this returns.
    pub fn invalidate(self) {
        drop(self);
    }
}

impl Drop for ActiveTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Tick the countdown once per period until it expires or is replaced
pub async fn countdown_timer_task(state: Arc<AppState>, generation: u64) {
    debug!("Starting tick callback (generation {})", generation);

    // First tick lands one full period after start.
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        match state.tick_scheduled(generation) {
            Ok(Some(TickOutcome::Decremented)) => {}
            Ok(Some(TickOutcome::Expired)) => {
                info!("Countdown reached 00:00");
                break;
            }
            Ok(None) => {
                debug!("Tick callback generation {} superseded", generation);
                break;
            }
            Err(e) => {
                error!("Failed to apply tick: {}", e);
                break;
            }
        }
    }
}
