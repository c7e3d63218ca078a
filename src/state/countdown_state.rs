//! Countdown state structure and the `MM:SS` formatter

use serde::{Deserialize, Serialize};

/// Default countdown duration: fifteen minutes
pub const DEFAULT_DURATION_SECONDS: u64 = 15 * 60;

/// Logical phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Remaining time is above zero and the timer is ticking
    Running,
    /// Remaining time reached zero, the timer is no longer scheduled
    Expired,
}

/// Result of applying one tick to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second was taken off; the countdown is still running
    Decremented,
    /// The tick took the last second off, or found nothing left to take
    Expired,
}

/// Remaining time plus the label derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    duration_seconds: u64,
    remaining: u64,
    display: String,
}

impl CountdownState {
    /// Create a countdown that starts full at `duration_seconds`
    pub fn new(duration_seconds: u64) -> Self {
        Self {
            duration_seconds,
            remaining: duration_seconds,
            display: format_time(duration_seconds),
        }
    }

    /// Take one second off. Never goes below zero.
    pub fn tick(&mut self) -> TickOutcome {
        if self.remaining == 0 {
            return TickOutcome::Expired;
        }

        self.remaining -= 1;
        self.display = format_time(self.remaining);

        if self.remaining == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Decremented
        }
    }

    /// Refill to the configured duration
    pub fn reset(&mut self) {
        self.remaining = self.duration_seconds;
        self.display = format_time(self.remaining);
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn phase(&self) -> Phase {
        if self.remaining > 0 {
            Phase::Running
        } else {
            Phase::Expired
        }
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECONDS)
    }
}

/// Render seconds as `MM:SS`.
///
/// The minute field wraps every hour, so 3600 renders like 0. There is no
/// hours field.
pub fn format_time(seconds: u64) -> String {
    let minutes = seconds / 60 % 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}", minutes, secs)
}
