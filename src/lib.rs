//! Stopclock - A state-managed HTTP server for countdown timing
//!
//! This library provides a countdown timer with lap recording: start a
//! countdown from hours/minutes/seconds, stop and reset it, and record
//! lap snapshots of the remaining time while it runs.

pub mod api;
pub mod config;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
