//! Countdown state machine
//!
//! Pure transition logic for the countdown timer. All side effects (the
//! recurring tick, the deferred alert clear, lap list bookkeeping) are
//! handled by the caller around these methods.

use serde::{Deserialize, Serialize};

use super::LapRecord;
use crate::utils::format::format_hms;

/// Observable phase of the countdown, derived from the machine fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// No time configured, nothing running
    Idle,
    /// Counting down once per second
    Running,
    /// Frozen with time remaining
    Stopped,
    /// Reached zero; the visual alert has not cleared yet
    Expired,
}

/// Result of a start attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Countdown configured and running
    Started,
    /// Already counting down; nothing changed
    AlreadyRunning,
    /// Total duration was zero; nothing changed
    InvalidDuration,
}

/// Result of applying one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second consumed, still counting down
    Decremented,
    /// Reached zero; the countdown is over
    Expired,
    /// Tick arrived while not running; nothing changed
    NotRunning,
}

/// Result of a stop attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Countdown frozen with time remaining
    Stopped,
    /// Not counting down; nothing changed
    NotRunning,
}

/// Result of a lap attempt
#[derive(Debug, Clone, PartialEq)]
pub enum LapOutcome {
    /// Lap recorded; the record should be prepended to the lap list
    Recorded(LapRecord),
    /// Not running or already at zero; nothing recorded
    Ignored,
}

/// Countdown timer state machine
///
/// Owns the remaining time, the run flag, and the lap counter, plus the
/// control-lock and alert flags the display mirrors back to clients.
#[derive(Debug, Clone)]
pub struct TimerState {
    remaining_seconds: u64,
    running: bool,
    lap_counter: u64,
    inputs_locked: bool,
    start_locked: bool,
    alert: bool,
}

/// Serializable copy of the timer state for responses and notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub running: bool,
    pub remaining_seconds: u64,
    pub display: String,
    pub lap_counter: u64,
    pub inputs_locked: bool,
    pub start_locked: bool,
    pub alert: bool,
}

impl TimerState {
    /// Create a fresh idle machine
    pub fn new() -> Self {
        Self {
            remaining_seconds: 0,
            running: false,
            lap_counter: 1,
            inputs_locked: false,
            start_locked: false,
            alert: false,
        }
    }

    /// Derive the current phase
    pub fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else if self.remaining_seconds > 0 {
            TimerPhase::Stopped
        } else if self.alert {
            TimerPhase::Expired
        } else {
            TimerPhase::Idle
        }
    }

    /// Whether the countdown is currently running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin a countdown of `total_seconds`.
    ///
    /// A zero total is rejected without touching the state. Starting while
    /// already running is a no-op; at most one recurring tick is ever
    /// active. A pending expiry alert is left as-is; its deferred clear
    /// still fires.
    pub fn start(&mut self, total_seconds: u64) -> StartOutcome {
        if self.running {
            return StartOutcome::AlreadyRunning;
        }
        if total_seconds == 0 {
            return StartOutcome::InvalidDuration;
        }

        self.remaining_seconds = total_seconds;
        self.running = true;
        self.inputs_locked = true;
        self.start_locked = true;
        StartOutcome::Started
    }

    /// Consume one second of the countdown.
    ///
    /// On reaching zero the run ends: the start control unlocks, the alert
    /// flag raises, and the caller is expected to stop the recurring tick
    /// and schedule the deferred alert clear. Time-entry inputs stay locked
    /// until reset.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::NotRunning;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
            self.start_locked = false;
            self.alert = true;
            TickOutcome::Expired
        } else {
            TickOutcome::Decremented
        }
    }

    /// Freeze the countdown with its remaining time intact.
    ///
    /// Unlocks the start control but leaves time-entry inputs locked; only
    /// reset unlocks them.
    pub fn stop(&mut self) -> StopOutcome {
        if !self.running {
            return StopOutcome::NotRunning;
        }

        self.running = false;
        self.start_locked = false;
        StopOutcome::Stopped
    }

    /// Return to the idle state: zero time, lap counter back to 1, all
    /// controls unlocked, alert cleared. Valid from any state.
    pub fn reset(&mut self) {
        self.remaining_seconds = 0;
        self.running = false;
        self.lap_counter = 1;
        self.inputs_locked = false;
        self.start_locked = false;
        self.alert = false;
    }

    /// Record a lap at the current remaining time.
    ///
    /// Only records while running with time left; the lap counter advances
    /// only on a successful record.
    pub fn lap(&mut self) -> LapOutcome {
        if !self.running || self.remaining_seconds == 0 {
            return LapOutcome::Ignored;
        }

        let record = LapRecord::new(self.lap_counter, self.remaining_seconds);
        self.lap_counter += 1;
        LapOutcome::Recorded(record)
    }

    /// Clear the expiry alert styling
    pub fn clear_alert(&mut self) {
        self.alert = false;
    }

    /// Take a serializable snapshot of the current state
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase(),
            running: self.running,
            remaining_seconds: self.remaining_seconds,
            display: format_hms(self.remaining_seconds),
            lap_counter: self.lap_counter,
            inputs_locked: self.inputs_locked,
            start_locked: self.start_locked,
            alert: self.alert,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
