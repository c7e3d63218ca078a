//! Main application state: the countdown controller

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{CountdownState, TickOutcome, TimerState};
use crate::tasks::{countdown_timer_task, ActiveTimer};

/// Everything guarded by the controller lock
#[derive(Debug)]
struct Controller {
    countdown: CountdownState,
    /// Scheduled tick callback, at most one
    active_timer: Option<ActiveTimer>,
    /// Bumped on every start; ticks from older callbacks are dropped
    generation: u64,
}

impl Controller {
    fn snapshot(&self) -> TimerState {
        TimerState::capture(&self.countdown, self.active_timer.is_some())
    }

    fn invalidate_timer(&mut self) -> bool {
        match self.active_timer.take() {
            Some(timer) => {
                debug!("Invalidating tick callback (generation {})", timer.generation());
                timer.invalidate();
                true
            }
            None => false,
        }
    }
}

/// Owns the countdown, its tick schedule and the channels observers listen on
#[derive(Debug)]
pub struct AppState {
    controller: Mutex<Controller>,
    /// Timer snapshots for the presentation layer
    timer_update_tx: watch::Sender<TimerState>,
    /// Flipped to true once `quit` is requested
    quit_tx: watch::Sender<bool>,
    /// Server metadata
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a stopped controller holding a full countdown of `duration_seconds`
    pub fn new(duration_seconds: u64) -> Self {
        let countdown = CountdownState::new(duration_seconds);
        let (timer_update_tx, _) = watch::channel(TimerState::capture(&countdown, false));
        let (quit_tx, _) = watch::channel(false);

        Self {
            controller: Mutex::new(Controller {
                countdown,
                active_timer: None,
                generation: 0,
            }),
            timer_update_tx,
            quit_tx,
            start_time: Instant::now(),
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    fn lock_controller(&self) -> Result<MutexGuard<'_, Controller>, String> {
        self.controller.lock()
            .map_err(|e| format!("Failed to lock countdown state: {}", e))
    }

    /// Push a snapshot to subscribers if it differs from the last one
    fn publish(&self, snapshot: TimerState) {
        self.timer_update_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Cancel any scheduled tick callback and schedule a fresh one-second tick.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self: &Arc<Self>) -> Result<TimerState, String> {
        let mut controller = self.lock_controller()?;
        self.start_locked(&mut controller);
        let snapshot = controller.snapshot();
        drop(controller);

        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    /// Swap in a new tick callback. The caller holds the controller lock, so
    /// no tick from the replaced callback can land in between.
    fn start_locked(self: &Arc<Self>, controller: &mut Controller) {
        controller.invalidate_timer();

        controller.generation += 1;
        let generation = controller.generation;
        let handle = tokio::spawn(countdown_timer_task(Arc::clone(self), generation));
        controller.active_timer = Some(ActiveTimer::new(generation, handle));

        info!("Countdown started at {} (generation {})", controller.countdown.display(), generation);
    }

    /// Apply one tick. Takes a second off while time remains, otherwise
    /// invalidates the active timer.
    pub fn tick(&self) -> Result<TickOutcome, String> {
        let mut controller = self.lock_controller()?;
        let outcome = Self::apply_tick(&mut controller);
        let snapshot = controller.snapshot();
        drop(controller);

        self.publish(snapshot);
        Ok(outcome)
    }

    /// Tick on behalf of the callback scheduled as `generation`.
    ///
    /// Returns `None` when that callback has since been replaced.
    pub fn tick_scheduled(&self, generation: u64) -> Result<Option<TickOutcome>, String> {
        let mut controller = self.lock_controller()?;
        if controller.generation != generation || controller.active_timer.is_none() {
            debug!("Dropping tick from stale callback (generation {})", generation);
            return Ok(None);
        }

        let outcome = Self::apply_tick(&mut controller);
        let snapshot = controller.snapshot();
        drop(controller);

        self.publish(snapshot);
        Ok(Some(outcome))
    }

    fn apply_tick(controller: &mut Controller) -> TickOutcome {
        let outcome = controller.countdown.tick();
        match outcome {
            TickOutcome::Decremented => {
                debug!("Tick: {}", controller.countdown.display());
            }
            TickOutcome::Expired => {
                if controller.invalidate_timer() {
                    info!("Countdown expired, tick callback invalidated");
                }
            }
        }
        outcome
    }

    /// Refill the countdown to its default and restart the tick schedule.
    ///
    /// Returns `None` without touching the countdown once `quit` was requested.
    pub fn reset(self: &Arc<Self>) -> Result<Option<TimerState>, String> {
        let mut controller = self.lock_controller()?;
        if self.is_quitting() {
            debug!("Ignoring reset, quit already requested");
            return Ok(None);
        }

        controller.countdown.reset();
        info!("Countdown reset to {}", controller.countdown.display());
        self.start_locked(&mut controller);
        let snapshot = controller.snapshot();
        drop(controller);

        self.record_action("restart");
        self.publish(snapshot.clone());
        Ok(Some(snapshot))
    }

    /// Invalidate the pending tick and ask the host process to exit
    pub fn quit(&self) -> Result<(), String> {
        let mut controller = self.lock_controller()?;
        controller.invalidate_timer();
        // Flipped under the lock so a concurrent reset cannot re-arm the timer.
        self.quit_tx.send_replace(true);
        let snapshot = controller.snapshot();
        drop(controller);

        self.publish(snapshot);
        self.record_action("quit");
        info!("Quit requested");
        Ok(())
    }

    /// Resolve once `quit` has been called
    pub async fn quit_requested(&self) {
        let mut quit_rx = self.quit_tx.subscribe();
        // The sender lives in `self`, so this only errors if it was dropped.
        let _ = quit_rx.wait_for(|requested| *requested).await;
    }

    /// Check whether `quit` has been called
    pub fn is_quitting(&self) -> bool {
        *self.quit_tx.borrow()
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.lock_controller().map(|controller| controller.snapshot())
    }

    /// Current `MM:SS` label
    pub fn display(&self) -> Result<String, String> {
        self.lock_controller()
            .map(|controller| controller.countdown.display().to_string())
    }

    /// Configured countdown length in seconds
    pub fn duration_seconds(&self) -> Result<u64, String> {
        self.lock_controller()
            .map(|controller| controller.countdown.duration_seconds())
    }

    /// Subscribe to timer snapshots; the receiver starts at the latest one
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
