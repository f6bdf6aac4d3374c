//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{info, warn};

use super::{LapOutcome, LapRecord, StartOutcome, StopOutcome, TickOutcome, TimerSnapshot, TimerState};

/// Main application state that owns the countdown machine and lap list
#[derive(Debug)]
pub struct AppState {
    /// The countdown state machine
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Recorded laps, newest first; cleared on reset
    pub laps: Arc<Mutex<Vec<LapRecord>>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last command tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for command-driven transitions; the countdown task listens
    /// here to begin and cancel its recurring tick
    pub state_change_tx: broadcast::Sender<TimerSnapshot>,
    /// Channel for per-tick display updates
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerSnapshot>,
    /// Pending one-shot alert clear, aborted by reset
    pub alert_reset_handle: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AppState {
    /// Create a new AppState with an idle countdown
    pub fn new(port: u16, host: String) -> Self {
        let (state_change_tx, _) = broadcast::channel(100);
        let (timer_update_tx, timer_update_rx) = watch::channel(TimerState::new().snapshot());

        Self {
            timer_state: Arc::new(Mutex::new(TimerState::new())),
            laps: Arc::new(Mutex::new(Vec::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            state_change_tx,
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
            alert_reset_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Begin a countdown of `total_seconds`.
    ///
    /// A zero total is rejected and starting while already running is a
    /// no-op; neither touches the machine or notifies the countdown task.
    pub fn start_timer(&self, total_seconds: u64) -> Result<(StartOutcome, TimerSnapshot), String> {
        let mut machine = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let outcome = machine.start(total_seconds);
        let snapshot = machine.snapshot();
        drop(machine);

        if outcome == StartOutcome::Started {
            info!("Countdown started with {} seconds remaining", snapshot.remaining_seconds);
            self.record_action("start");
            self.notify_command(&snapshot);
        }

        Ok((outcome, snapshot))
    }

    /// Freeze the countdown, keeping its remaining time.
    ///
    /// A stop while not running is a silent no-op.
    pub fn stop_timer(&self) -> Result<(StopOutcome, TimerSnapshot), String> {
        let mut machine = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let outcome = machine.stop();
        let snapshot = machine.snapshot();
        drop(machine);

        if outcome == StopOutcome::Stopped {
            info!("Countdown stopped at {}", snapshot.display);
            self.record_action("stop");
            self.notify_command(&snapshot);
        }

        Ok((outcome, snapshot))
    }

    /// Return everything to the idle state: machine defaults, empty lap
    /// list, and no pending alert clear. Valid from any state.
    pub fn reset_timer(&self) -> Result<TimerSnapshot, String> {
        self.cancel_alert_reset();

        let mut machine = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        machine.reset();
        let snapshot = machine.snapshot();
        drop(machine);

        let mut laps = self.laps.lock()
            .map_err(|e| format!("Failed to lock lap list: {}", e))?;
        let cleared = laps.len();
        laps.clear();
        drop(laps);

        info!("Timer reset, {} lap records cleared", cleared);
        self.record_action("reset");
        self.notify_command(&snapshot);

        Ok(snapshot)
    }

    /// Record a lap at the current remaining time, newest first.
    ///
    /// Ignored while not running or at zero; the lap counter only advances
    /// on a successful record.
    pub fn record_lap(&self) -> Result<(LapOutcome, TimerSnapshot), String> {
        let mut machine = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let outcome = machine.lap();
        let snapshot = machine.snapshot();
        drop(machine);

        if let LapOutcome::Recorded(record) = &outcome {
            let mut laps = self.laps.lock()
                .map_err(|e| format!("Failed to lock lap list: {}", e))?;
            laps.insert(0, record.clone());
            drop(laps);

            info!("Lap {} recorded at {}", record.index, record.display);
            self.record_action("lap");
            self.notify_command(&snapshot);
        }

        Ok((outcome, snapshot))
    }

    /// Apply one tick of the recurring countdown.
    ///
    /// Called by the countdown task only. Publishes the new display on the
    /// watch channel; tick updates never go out on the command channel the
    /// countdown task listens to.
    pub fn apply_tick(&self) -> Result<(TickOutcome, TimerSnapshot), String> {
        let mut machine = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let outcome = machine.tick();
        let snapshot = machine.snapshot();
        drop(machine);

        if outcome != TickOutcome::NotRunning {
            self.notify_display(&snapshot);
        }

        Ok((outcome, snapshot))
    }

    /// Clear the expiry alert styling
    pub fn clear_alert(&self) -> Result<(), String> {
        let mut machine = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        machine.clear_alert();
        let snapshot = machine.snapshot();
        drop(machine);

        self.notify_display(&snapshot);
        Ok(())
    }

    /// Get a snapshot of the current timer state
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer_state.lock()
            .map(|machine| machine.snapshot())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Get the recorded laps, newest first
    pub fn get_laps(&self) -> Result<Vec<LapRecord>, String> {
        self.laps.lock()
            .map(|laps| laps.clone())
            .map_err(|e| format!("Failed to lock lap list: {}", e))
    }

    /// Remember the pending one-shot alert clear, aborting any previous one
    pub fn store_alert_reset(&self, handle: JoinHandle<()>) {
        if let Ok(mut slot) = self.alert_reset_handle.lock() {
            if let Some(previous) = slot.replace(handle) {
                previous.abort();
            }
        }
    }

    /// Abort the pending one-shot alert clear, if any
    pub fn cancel_alert_reset(&self) {
        if let Ok(mut slot) = self.alert_reset_handle.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last command information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Update last command tracking
    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Notify the countdown task and display watchers of a command-driven
    /// transition
    fn notify_command(&self, snapshot: &TimerSnapshot) {
        if let Err(e) = self.state_change_tx.send(snapshot.clone()) {
            warn!("Failed to send state change notification: {}", e);
        }
        self.notify_display(snapshot);
    }

    /// Publish the latest snapshot for display watchers
    fn notify_display(&self, snapshot: &TimerSnapshot) {
        if let Err(e) = self.timer_update_tx.send(snapshot.clone()) {
            warn!("Failed to send timer update: {}", e);
        }
    }
}
