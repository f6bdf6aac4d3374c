//! State management module
//!
//! This module contains the countdown state machine, lap records, and the
//! application state that owns them.

pub mod app_state;
pub mod lap;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use lap::LapRecord;
pub use timer_state::{
    LapOutcome, StartOutcome, StopOutcome, TickOutcome, TimerPhase, TimerSnapshot, TimerState,
};
