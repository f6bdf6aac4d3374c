//! Lap record structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::format::format_hms;

/// A recorded snapshot of the remaining time, numbered sequentially.
///
/// Lap records are purely presentational: they are handed to clients in
/// status responses and never read back into the countdown state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    /// Sequential lap number, starting at 1
    pub index: u64,
    /// Remaining countdown seconds at the moment the lap was recorded
    pub remaining_seconds: u64,
    /// Remaining time formatted as HH:MM:SS
    pub display: String,
    /// When the lap was recorded
    pub recorded_at: DateTime<Utc>,
}

impl LapRecord {
    /// Create a lap record for the given lap number and remaining time
    pub fn new(index: u64, remaining_seconds: u64) -> Self {
        Self {
            index,
            remaining_seconds,
            display: format_hms(remaining_seconds),
            recorded_at: Utc::now(),
        }
    }
}
