//! Timer snapshot published to observers

use serde::{Deserialize, Serialize};

use super::{CountdownState, Phase};

/// Observable copy of the countdown, sent on every change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u64,
    pub display: String,
    pub phase: Phase,
    /// Whether a tick callback is currently scheduled
    pub active: bool,
}

impl TimerState {
    /// Snapshot a countdown together with its scheduling status
    pub fn capture(countdown: &CountdownState, active: bool) -> Self {
        Self {
            remaining_seconds: countdown.remaining(),
            display: countdown.display().to_string(),
            phase: countdown.phase(),
            active,
        }
    }

    /// Check if the timer is active
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::capture(&CountdownState::default(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_copies_countdown_fields() {
        let mut countdown = CountdownState::new(62);
        countdown.tick();

        let snapshot = TimerState::capture(&countdown, true);
        assert_eq!(snapshot.remaining_seconds, 61);
        assert_eq!(snapshot.display, "01:01");
        assert_eq!(snapshot.phase, Phase::Running);
        assert!(snapshot.is_active());
    }

    #[test]
    fn serializes_phase_in_lowercase() {
        let snapshot = TimerState::capture(&CountdownState::new(0), false);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["phase"], "expired");
        assert_eq!(json["display"], "00:00");
        assert_eq!(json["active"], false);
    }
}
