//! REST API implementation for the gig service
//!
//! Exposes gig lifecycle, tip/request intake, operator actions, preference
//! editing, the merged live feed, and an SSE event stream.

pub mod handlers;
pub mod sse;

use axum::{
    extract::State,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared session/preference state
    pub state: Arc<SharedState>,
    /// Default currency for tips that don't carry one
    pub currency: String,
    /// Server port
    pub port: u16,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no prefix for health endpoint)
        .route("/health", get(health_check))

        // API v1 routes
        .nest("/api/v1", Router::new()
            // Gig session lifecycle
            .route("/gig/start", post(handlers::start_gig))
            .route("/gig/end", post(handlers::end_gig))
            .route("/gig", get(handlers::get_gig))
            .route("/gig/feed", get(handlers::get_feed))
            .route("/gigs/history", get(handlers::get_history))

            // Event intake
            .route("/tips", post(handlers::post_tip))
            .route("/requests", post(handlers::post_request))

            // Operator actions on requests
            .route("/requests/:request_id/action", post(handlers::post_request_action))

            // Request preferences
            .route("/preferences", get(handlers::get_preferences))
            .route("/preferences", put(handlers::put_preferences))
            .route("/preferences/genres", post(handlers::add_genre))
            .route("/preferences/genres/:genre", delete(handlers::remove_genre))
            .route("/preferences/blocked-words", post(handlers::add_blocked_word))
            .route("/preferences/blocked-words/:word", delete(handlers::remove_blocked_word))
            .route("/preferences/preferred-songs", post(handlers::add_preferred_song))
            .route("/preferences/preferred-songs/:song", delete(handlers::remove_preferred_song))
            .route("/preferences/blocked-songs", post(handlers::add_blocked_song))
            .route("/preferences/blocked-songs/:song", delete(handlers::remove_blocked_song))

            // SSE events
            .route("/events", get(sse::event_stream))
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "module": "bandit-gig",
        "version": env!("CARGO_PKG_VERSION"),
        "port": state.port,
    }))
}
