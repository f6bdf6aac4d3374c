//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{AppState, LapOutcome, StartOutcome, StopOutcome};
use super::requests::StartRequest;
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /start - Begin a countdown from the submitted time fields
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRequest>,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    let total_seconds = request.total_seconds();

    match state.start_timer(total_seconds) {
        Ok((StartOutcome::Started, snapshot)) => {
            info!("Start endpoint called - countdown running from {}", snapshot.display);
            Ok((
                StatusCode::OK,
                Json(ApiResponse::ok(
                    format!("Countdown started at {}", snapshot.display),
                    snapshot,
                )),
            ))
        }
        Ok((StartOutcome::AlreadyRunning, snapshot)) => {
            info!("Start endpoint called while already running - ignoring");
            Ok((
                StatusCode::OK,
                Json(ApiResponse::noop(
                    "Countdown already running".to_string(),
                    snapshot,
                )),
            ))
        }
        Ok((StartOutcome::InvalidDuration, snapshot)) => {
            warn!("Start endpoint called with a zero duration");
            Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "Please enter a valid time".to_string(),
                    snapshot,
                )),
            ))
        }
        Err(e) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /stop - Freeze the countdown with its remaining time
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.stop_timer() {
        Ok((StopOutcome::Stopped, snapshot)) => {
            info!("Stop endpoint called - countdown frozen at {}", snapshot.display);
            Ok(Json(ApiResponse::ok(
                format!("Countdown stopped at {}", snapshot.display),
                snapshot,
            )))
        }
        Ok((StopOutcome::NotRunning, snapshot)) => {
            info!("Stop endpoint called while not running - ignoring");
            Ok(Json(ApiResponse::noop(
                "Countdown is not running".to_string(),
                snapshot,
            )))
        }
        Err(e) => {
            error!("Failed to stop countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Return the timer to idle and clear all laps
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset_timer() {
        Ok(snapshot) => {
            info!("Reset endpoint called - timer back to idle");
            Ok(Json(ApiResponse::ok("Timer reset".to_string(), snapshot)))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /lap - Record the current remaining time
pub async fn lap_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.record_lap() {
        Ok((LapOutcome::Recorded(record), snapshot)) => {
            info!("Lap endpoint called - lap {} at {}", record.index, record.display);
            Ok(Json(ApiResponse::ok(
                format!("Lap {} recorded at {}", record.index, record.display),
                snapshot,
            )))
        }
        Ok((LapOutcome::Ignored, snapshot)) => {
            info!("Lap endpoint called while not running - ignoring");
            Ok(Json(ApiResponse::noop(
                "Lap ignored, countdown is not running".to_string(),
                snapshot,
            )))
        }
        Err(e) => {
            error!("Failed to record lap: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the timer snapshot and lap list
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let laps = match state.get_laps() {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to get lap list: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: snapshot,
        laps,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
