//! Stopclock - A state-managed HTTP server for countdown timing
//!
//! This is the main entry point for the stopclock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use stopclock::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::countdown_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("stopclock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting stopclock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Start the countdown tick background task
    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(timer_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Begin a countdown from hours/minutes/seconds");
    info!("  POST /stop   - Freeze the countdown");
    info!("  POST /reset  - Return the timer to idle and clear laps");
    info!("  POST /lap    - Record the current remaining time");
    info!("  GET  /status - Timer snapshot and lap list");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
