//! HTTP request handlers
//!
//! Implements REST API endpoints for gig lifecycle, intake, operator
//! actions, and preference editing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use bandit_common::feed::FeedItem;
use bandit_common::model::{Gig, Request, RequestAction, RequestCandidate, Tip};
use bandit_common::prefs::RequestPreferences;

use crate::api::AppState;
use crate::error::Error;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct StartGigRequest {
    pub title: String,
    pub venue: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub feed: Vec<FeedItem>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub gigs: Vec<Gig>,
}

#[derive(Debug, Deserialize)]
pub struct TipIntakeRequest {
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub fan_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TipResponse {
    pub status: String,
    pub tip: Tip,
}

#[derive(Debug, Serialize)]
pub struct SubmitRequestResponse {
    pub status: String,
    /// False when admission rejected the candidate (no record created)
    pub admitted: bool,
    pub request: Option<Request>,
}

#[derive(Debug, Deserialize)]
pub struct RequestActionBody {
    pub action: RequestAction,
}

#[derive(Debug, Serialize)]
pub struct RequestActionResponse {
    pub status: String,
    /// Confirmation line for the UI; absent when the id matched nothing
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenreBody {
    pub genre: String,
}

#[derive(Debug, Deserialize)]
pub struct WordBody {
    pub word: String,
}

#[derive(Debug, Deserialize)]
pub struct SongBody {
    pub song: String,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub status: String,
    /// Whether the edit changed the preference sets
    pub changed: bool,
}

type ApiError = (StatusCode, Json<StatusResponse>);

/// Map a service error to an HTTP status + JSON body
fn error_response(error: Error) -> ApiError {
    let status = match &error {
        Error::NoActiveGig | Error::GigAlreadyActive => StatusCode::CONFLICT,
        Error::BadRequest(_) => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(StatusResponse {
            status: error.to_string(),
        }),
    )
}

// ============================================================================
// Gig Session Endpoints
// ============================================================================

/// POST /gig/start - Start a new gig session
pub async fn start_gig(
    State(app): State<AppState>,
    Json(body): Json<StartGigRequest>,
) -> Result<Json<Gig>, ApiError> {
    if body.title.trim().is_empty() || body.venue.trim().is_empty() {
        return Err(error_response(Error::BadRequest(
            "Gig title and venue must be nonempty".to_string(),
        )));
    }
    let gig = app
        .state
        .start_gig(body.title, body.venue, body.lat, body.lng)
        .await
        .map_err(error_response)?;
    info!("Gig {} started at {}", gig.id, gig.venue);
    Ok(Json(gig))
}

/// POST /gig/end - End the active gig and return final totals
pub async fn end_gig(State(app): State<AppState>) -> Result<Json<Gig>, ApiError> {
    let gig = app.state.end_gig().await.map_err(error_response)?;
    Ok(Json(gig))
}

/// GET /gig - Active gig snapshot with live totals
pub async fn get_gig(State(app): State<AppState>) -> Result<Json<Gig>, ApiError> {
    let gig = app.state.current_gig().await.map_err(error_response)?;
    Ok(Json(gig))
}

/// GET /gig/feed - Merged live feed, most recent first, capped for display
pub async fn get_feed(State(app): State<AppState>) -> Result<Json<FeedResponse>, ApiError> {
    let feed = app.state.feed().await.map_err(error_response)?;
    Ok(Json(FeedResponse { feed }))
}

/// GET /gigs/history - Summaries of completed gigs
pub async fn get_history(State(app): State<AppState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        gigs: app.state.gig_history().await,
    })
}

// ============================================================================
// Intake Endpoints
// ============================================================================

/// POST /tips - Record an incoming tip
pub async fn post_tip(
    State(app): State<AppState>,
    Json(body): Json<TipIntakeRequest>,
) -> Result<Json<TipResponse>, ApiError> {
    let currency = body.currency.unwrap_or_else(|| app.currency.clone());
    let tip = app
        .state
        .record_tip(body.amount, currency, body.fan_name, body.message)
        .await
        .map_err(error_response)?;
    Ok(Json(TipResponse {
        status: "ok".to_string(),
        tip,
    }))
}

/// POST /requests - Submit a song request candidate to admission
///
/// A rejected candidate is not an error: the response carries
/// `admitted: false` and no request record, and the fan sees nothing.
pub async fn post_request(
    State(app): State<AppState>,
    Json(candidate): Json<RequestCandidate>,
) -> Result<Json<SubmitRequestResponse>, ApiError> {
    let admitted = app
        .state
        .submit_request(candidate)
        .await
        .map_err(error_response)?;
    Ok(Json(SubmitRequestResponse {
        status: "ok".to_string(),
        admitted: admitted.is_some(),
        request: admitted,
    }))
}

// ============================================================================
// Operator Action Endpoints
// ============================================================================

/// POST /requests/:request_id/action - Pin, complete, or refund a request
///
/// Unknown ids are acknowledged without effect; callers only reference ids
/// they previously observed in the feed.
pub async fn post_request_action(
    State(app): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<RequestActionBody>,
) -> Result<Json<RequestActionResponse>, ApiError> {
    let message = app
        .state
        .apply_request_action(request_id, body.action)
        .await
        .map_err(error_response)?;
    Ok(Json(RequestActionResponse {
        status: "ok".to_string(),
        message: message.map(str::to_string),
    }))
}

// ============================================================================
// Preference Endpoints
// ============================================================================

/// GET /preferences - Current request preferences
pub async fn get_preferences(State(app): State<AppState>) -> Json<RequestPreferences> {
    Json(app.state.preferences().await)
}

/// PUT /preferences - Replace the request preferences wholesale
pub async fn put_preferences(
    State(app): State<AppState>,
    Json(prefs): Json<RequestPreferences>,
) -> Json<StatusResponse> {
    app.state.set_preferences(prefs).await;
    Json(StatusResponse {
        status: "ok".to_string(),
    })
}

/// POST /preferences/genres - Add an allowed genre
pub async fn add_genre(
    State(app): State<AppState>,
    Json(body): Json<GenreBody>,
) -> Json<EditResponse> {
    let changed = app
        .state
        .edit_preferences(|p| p.add_genre(&body.genre))
        .await;
    edit_response(changed)
}

/// DELETE /preferences/genres/:genre - Remove an allowed genre
pub async fn remove_genre(
    State(app): State<AppState>,
    Path(genre): Path<String>,
) -> Json<EditResponse> {
    let changed = app.state.edit_preferences(|p| p.remove_genre(&genre)).await;
    edit_response(changed)
}

/// POST /preferences/blocked-words - Add a blocked word
pub async fn add_blocked_word(
    State(app): State<AppState>,
    Json(body): Json<WordBody>,
) -> Json<EditResponse> {
    let changed = app
        .state
        .edit_preferences(|p| p.add_blocked_word(&body.word))
        .await;
    edit_response(changed)
}

/// DELETE /preferences/blocked-words/:word - Remove a blocked word
pub async fn remove_blocked_word(
    State(app): State<AppState>,
    Path(word): Path<String>,
) -> Json<EditResponse> {
    let changed = app
        .state
        .edit_preferences(|p| p.remove_blocked_word(&word))
        .await;
    edit_response(changed)
}

/// POST /preferences/preferred-songs - Add a preferred song
pub async fn add_preferred_song(
    State(app): State<AppState>,
    Json(body): Json<SongBody>,
) -> Json<EditResponse> {
    let changed = app
        .state
        .edit_preferences(|p| p.add_preferred_song(&body.song))
        .await;
    edit_response(changed)
}

/// DELETE /preferences/preferred-songs/:song - Remove a preferred song
pub async fn remove_preferred_song(
    State(app): State<AppState>,
    Path(song): Path<String>,
) -> Json<EditResponse> {
    let changed = app
        .state
        .edit_preferences(|p| p.remove_preferred_song(&song))
        .await;
    edit_response(changed)
}

/// POST /preferences/blocked-songs - Add a blocked song
pub async fn add_blocked_song(
    State(app): State<AppState>,
    Json(body): Json<SongBody>,
) -> Json<EditResponse> {
    let changed = app
        .state
        .edit_preferences(|p| p.add_blocked_song(&body.song))
        .await;
    edit_response(changed)
}

/// DELETE /preferences/blocked-songs/:song - Remove a blocked song
pub async fn remove_blocked_song(
    State(app): State<AppState>,
    Path(song): Path<String>,
) -> Json<EditResponse> {
    let changed = app
        .state
        .edit_preferences(|p| p.remove_blocked_song(&song))
        .await;
    edit_response(changed)
}

fn edit_response(changed: bool) -> Json<EditResponse> {
    Json(EditResponse {
        status: "ok".to_string(),
        changed,
    })
}
