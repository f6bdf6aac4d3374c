//! API request structures

use serde::{Deserialize, Serialize};

/// Upper bound for the hours field
pub const MAX_HOURS: i64 = 99;
/// Upper bound for the minutes field
pub const MAX_MINUTES: i64 = 59;
/// Upper bound for the seconds field
pub const MAX_SECONDS: i64 = 59;

/// Request body for POST /start.
///
/// Fields are accepted as signed integers and clamped to their bounds
/// (hours 0-99, minutes and seconds 0-59) before the total is computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub minutes: i64,
    #[serde(default)]
    pub seconds: i64,
}

impl StartRequest {
    /// Clamp each field to its bound and compute the total in seconds
    pub fn total_seconds(&self) -> u64 {
        let hours = self.hours.clamp(0, MAX_HOURS) as u64;
        let minutes = self.minutes.clamp(0, MAX_MINUTES) as u64;
        let seconds = self.seconds.clamp(0, MAX_SECONDS) as u64;

        hours * 3600 + minutes * 60 + seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_combine_all_fields() {
        let req = StartRequest { hours: 1, minutes: 2, seconds: 3 };
        assert_eq!(req.total_seconds(), 3723);
    }

    #[test]
    fn values_above_the_bounds_clamp_down() {
        let req = StartRequest { hours: 200, minutes: 75, seconds: 90 };
        assert_eq!(req.total_seconds(), 99 * 3600 + 59 * 60 + 59);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let req = StartRequest { hours: -1, minutes: -30, seconds: -5 };
        assert_eq!(req.total_seconds(), 0);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let req: StartRequest = serde_json::from_str(r#"{"seconds": 5}"#).unwrap();
        assert_eq!(req.hours, 0);
        assert_eq!(req.minutes, 0);
        assert_eq!(req.total_seconds(), 5);
    }
}
