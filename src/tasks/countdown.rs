//! Countdown tick background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, sleep, Instant};
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome};
use super::alert_reset::schedule_alert_reset;

/// Period of the recurring countdown tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that drives the recurring one-second countdown tick.
///
/// This task owns the only recurring timer in the process. It waits for
/// command notifications; when a start puts the machine into the running
/// state it drives an interval, applying one tick per second until the
/// countdown expires or a command takes the machine out of the running
/// state. Stop and reset cancel the interval deterministically through the
/// same notification channel.
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut state_rx = state.state_change_tx.subscribe();

    loop {
        match state_rx.recv().await {
            Ok(_) => {
                // Broadcast payloads can be stale by the time they arrive,
                // so decisions are made on the live state
                let running = match state.snapshot() {
                    Ok(snapshot) => snapshot.running,
                    Err(e) => {
                        error!("Failed to read timer state: {}", e);
                        continue;
                    }
                };

                if !running {
                    debug!("Countdown task notified, timer not running");
                    continue;
                }

                info!("Countdown running, ticking every second");

                // First tick lands one full period after the start command
                let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
                let mut cancelled = false;

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            match state.apply_tick() {
                                Ok((TickOutcome::Decremented, snapshot)) => {
                                    debug!("Tick: {} remaining", snapshot.display);
                                }
                                Ok((TickOutcome::Expired, _)) => {
                                    info!("Countdown expired, scheduling alert clear");
                                    schedule_alert_reset(Arc::clone(&state));
                                    break;
                                }
                                Ok((TickOutcome::NotRunning, _)) => {
                                    cancelled = true;
                                    break;
                                }
                                Err(e) => {
                                    error!("Failed to apply tick: {}", e);
                                }
                            }
                        }

                        // Command arrived - check whether it ended the run
                        _ = state_rx.recv() => {
                            let still_running = state.snapshot()
                                .map(|snapshot| snapshot.running)
                                .unwrap_or(false);

                            if !still_running {
                                info!("Countdown cancelled by command");
                                cancelled = true;
                                break;
                            }
                        }
                    }
                }

                if cancelled {
                    debug!("Recurring tick stopped before expiry");
                }
            }
            Err(e) => {
                error!("Error receiving state change: {}", e);
                // Wait a bit before retrying
                sleep(Duration::from_secs(1)).await;
            }
        }
    }
}
