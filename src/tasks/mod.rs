//! Background tasks module
//! 
//! This module contains the tick callback and the terminal label mirror that
//! run alongside the HTTP server.

pub mod countdown_timer;
pub mod label_mirror;

// Re-export main functions
pub use countdown_timer::{countdown_timer_task, ActiveTimer, TICK_PERIOD};
pub use label_mirror::label_mirror_task;
