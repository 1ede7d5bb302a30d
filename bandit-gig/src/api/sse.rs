//! Server-Sent Events (SSE) stream of gig activity
//!
//! A client connecting while a gig is running first receives a `GigSnapshot`
//! (gig with live totals, capped feed, current preferences), then the live
//! broadcast: tips, admitted requests, status changes, preference edits, and
//! session lifecycle. Between gigs the stream stays open and picks up at the
//! next `GigStarted`.

use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use bandit_common::events::BanditEvent;

use crate::api::AppState;

/// GET /events - SSE event stream
pub async fn event_stream(
    State(app): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // Subscribe before snapshotting so nothing lands in the gap between the
    // snapshot and the first received broadcast
    let mut rx = app.state.subscribe_events();
    let snapshot = app.state.live_snapshot().await;
    debug!(
        "New SSE client connected ({})",
        if snapshot.is_some() {
            "gig in progress"
        } else {
            "no active gig"
        }
    );

    let stream = async_stream::stream! {
        if let Some(snapshot) = snapshot {
            if let Some(event) = to_sse_event(&snapshot) {
                yield Ok(event);
            }
        }

        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(event) = to_sse_event(&event) {
                        yield Ok(event);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // Slow client fell behind the broadcast buffer; the gap
                    // is unrecoverable feed-wise, so note it and keep going
                    warn!("SSE client lagged, {} gig events skipped", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Serialize a gig event for the wire, tagged for client-side dispatch
fn to_sse_event(event: &BanditEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Event::default().event(event.event_type()).data(json)),
        Err(e) => {
            warn!("Failed to serialize {} event: {}", event.event_type(), e);
            None
        }
    }
}
