//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{Stream, StreamExt};
use tokio_stream::wrappers::WatchStream;
use tracing::{error, info, warn};

use crate::state::AppState;
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /restart - Refill the countdown and restart the tick
pub async fn restart_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(Some(timer)) => {
            info!("Restart endpoint called - countdown reset to {}", timer.display);
            Ok(Json(ApiResponse::running(
                "Countdown restarted".to_string(),
                timer,
            )))
        }
        Ok(None) => {
            warn!("Restart endpoint called while shutting down");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
        Err(e) => {
            error!("Failed to restart countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /quit - Stop the countdown and terminate the process
pub async fn quit_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    if let Err(e) = state.quit() {
        error!("Failed to quit: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    info!("Quit endpoint called - shutting down");
    match state.get_timer_state() {
        Ok(timer) => Ok(Json(ApiResponse::quitting("Shutting down".to_string(), timer))),
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /display - The bare `MM:SS` label
pub async fn display_handler(State(state): State<Arc<AppState>>) -> Result<String, StatusCode> {
    state.display().map_err(|e| {
        error!("Failed to read display: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let duration_seconds = match state.duration_seconds() {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to get countdown duration: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        duration_seconds,
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream a `tick` event per snapshot change until quit
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let quit_state = Arc::clone(&state);
    let stream = WatchStream::new(state.subscribe())
        .filter_map(|timer| async move {
            match Event::default().event("tick").json_data(&timer) {
                Ok(event) => Some(Ok::<_, Infallible>(event)),
                Err(e) => {
                    warn!("Failed to encode timer event: {}", e);
                    None
                }
            }
        })
        .take_until(async move { quit_state.quit_requested().await });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
