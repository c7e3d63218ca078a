//! ui-time - A countdown label with restart and quit commands
//! 
//! This library owns a fifteen-minute countdown that ticks once per second,
//! renders it as `MM:SS`, and exposes it over HTTP for a menu-bar style
//! presentation layer.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{format_time, AppState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
