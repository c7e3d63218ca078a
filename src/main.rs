//! ui-time - A countdown label with restart and quit commands
//! 
//! This is the main entry point for the ui-time application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use ui_time::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::label_mirror_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("ui_time={},tower_http=info", config.log_level()))
        .init();

    info!("Starting ui-time v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}min, label={}",
          config.host, config.port, config.minutes, config.label);

    // Create the countdown controller and start ticking
    let state = Arc::new(AppState::new(config.duration_seconds()));
    state.start().map_err(anyhow::Error::msg)?;

    if config.label {
        let label_state = Arc::clone(&state);
        tokio::spawn(async move {
            label_mirror_task(label_state).await;
        });
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /display - Current MM:SS label");
    info!("  GET  /status  - Timer snapshot and uptime");
    info!("  GET  /events  - Server-sent timer snapshots");
    info!("  POST /restart - Restart the countdown");
    info!("  POST /quit    - Quit the application");
    info!("  GET  /health  - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(Arc::clone(&state)))
        .await?;

    if config.label {
        println!();
    }
    info!("Shutdown complete");
    Ok(())
}
