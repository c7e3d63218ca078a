//! State management module
//! 
//! This module contains the countdown, its published snapshot and the
//! controller that owns both.

pub mod countdown_state;
pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use countdown_state::{format_time, CountdownState, Phase, TickOutcome, DEFAULT_DURATION_SECONDS};
pub use app_state::AppState;
pub use timer_state::TimerState;
