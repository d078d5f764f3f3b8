//! REST endpoints for driving the questionnaire over HTTP.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::error::ChannelError;
use crate::planner::PlannerManager;

/// Shared state for planner routes.
#[derive(Clone)]
pub struct PlannerRouteState {
    pub manager: Arc<PlannerManager>,
}

/// Body of `POST /api/answer`.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub text: String,
}

/// GET /api/session
async fn get_session(State(state): State<PlannerRouteState>) -> impl IntoResponse {
    Json(state.manager.snapshot().await)
}

/// POST /api/answer
///
/// Applies the answer; if it was the last one, generates the itinerary
/// before responding.
async fn post_answer(
    State(state): State<PlannerRouteState>,
    Json(body): Json<AnswerRequest>,
) -> impl IntoResponse {
    state.manager.submit_answer(&body.text).await;
    state.manager.generate_if_ready().await;
    Json(state.manager.snapshot().await)
}

/// POST /api/reset
async fn post_reset(State(state): State<PlannerRouteState>) -> impl IntoResponse {
    Json(state.manager.reset().await)
}

/// Build the planner REST routes.
pub fn planner_routes(state: PlannerRouteState) -> Router {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/answer", post(post_answer))
        .route("/api/reset", post(post_reset))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `0.0.0.0:{port}` and serve the planner routes until the process exits.
pub async fn serve(port: u16, manager: Arc<PlannerManager>) -> Result<(), ChannelError> {
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| ChannelError::StartupFailed {
            name: "http".to_string(),
            reason: format!("Failed to bind port {port}: {e}"),
        })?;
    tracing::info!(port, "Planner HTTP server started");
    axum::serve(listener, planner_routes(PlannerRouteState { manager })).await?;
    Ok(())
}
