//! HTTP API module
//!
//! This module is the presentation surface: the label, the restart and quit
//! commands, and a snapshot event stream.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/display", get(display_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/restart", post(restart_handler))
        .route("/quit", post(quit_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{self, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{
        api::responses::{ApiResponse, StatusResponse},
        state::Phase,
    };

    fn test_app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(900));
        state.start().expect("start");
        (create_router(Arc::clone(&state)), state)
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body")
            .to_vec()
    }

    #[tokio::test]
    async fn display_returns_the_label() {
        let (app, state) = test_app();
        state.tick().expect("tick");

        let request = Request::get("/display").body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"14:59");
    }

    #[tokio::test]
    async fn restart_resets_an_expired_countdown() {
        let (app, state) = test_app();
        for _ in 0..900 {
            state.tick().expect("tick");
        }
        assert!(!state.get_timer_state().expect("timer").active);

        let request = Request::post("/restart").body(Body::empty()).expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let dto: ApiResponse = serde_json::from_slice(&body_bytes(response).await).expect("json");
        assert_eq!(dto.status, "running");
        assert_eq!(dto.timer.display, "15:00");
        assert_eq!(dto.timer.phase, Phase::Running);
        assert!(dto.timer.active);

        let request = Request::get("/status").body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("response");
        let status: StatusResponse = serde_json::from_slice(&body_bytes(response).await).expect("json");
        assert_eq!(status.duration_seconds, 900);
        assert_eq!(status.last_action.as_deref(), Some("restart"));
        assert!(status.last_action_time.is_some());
    }

    #[tokio::test]
    async fn quit_signals_shutdown() {
        let (app, state) = test_app();

        let request = Request::post("/quit").body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let dto: ApiResponse = serde_json::from_slice(&body_bytes(response).await).expect("json");
        assert_eq!(dto.status, "quitting");
        assert!(!dto.timer.active);
        assert!(state.is_quitting());
    }

    #[tokio::test]
    async fn restart_after_quit_is_unavailable() {
        let (app, state) = test_app();
        state.quit().expect("quit");

        let request = Request::post("/restart").body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!state.get_timer_state().expect("timer").active);
    }

    #[tokio::test]
    async fn restart_requires_post() {
        let (app, _state) = test_app();

        let request = Request::get("/restart").body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn events_stream_ends_after_quit() {
        let (app, state) = test_app();

        let request = Request::get("/events").body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/event-stream"
        );

        let reader = tokio::spawn(body_bytes(response));
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        state.quit().expect("quit");

        let body = tokio::time::timeout(std::time::Duration::from_secs(5), reader)
            .await
            .expect("stream should end after quit")
            .expect("reader task");
        let text = String::from_utf8(body).expect("utf8");
        assert!(text.contains("event: tick"));
        assert!(text.contains("\"display\":\"15:00\""));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _state) = test_app();

        let request = Request::get("/health").body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
