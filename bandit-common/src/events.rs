//! Event types for the Bandit event system
//!
//! Events are broadcast by the gig service and can be serialized for SSE
//! transmission to connected clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::feed::FeedItem;
use crate::model::{Gig, GigTotals, RequestStatus};
use crate::prefs::RequestPreferences;

/// Bandit event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BanditEvent {
    /// A new gig session started
    GigStarted {
        gig_id: Uuid,
        title: String,
        venue: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The active gig ended; carries the final session totals
    GigEnded {
        gig_id: Uuid,
        totals: GigTotals,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A tip was recorded for the active gig
    TipReceived {
        tip_id: Uuid,
        gig_id: Uuid,
        amount: f64,
        fan_name: Option<String>,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A song request passed admission and was recorded
    RequestReceived {
        request_id: Uuid,
        gig_id: Uuid,
        title: String,
        status: RequestStatus,
        /// True when the title matched a preferred song
        preferred: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// An operator action changed a request's status
    RequestUpdated {
        request_id: Uuid,
        gig_id: Uuid,
        status: RequestStatus,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The artist's request preferences changed
    PreferencesChanged {
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Snapshot of the live session, sent to an SSE client that connects
    /// while a gig is running so it can render the feed without a second
    /// fetch
    GigSnapshot {
        gig: Gig,
        feed: Vec<FeedItem>,
        preferences: RequestPreferences,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl BanditEvent {
    /// Event type string for the SSE `event:` field
    pub fn event_type(&self) -> &'static str {
        match self {
            BanditEvent::GigStarted { .. } => "GigStarted",
            BanditEvent::GigEnded { .. } => "GigEnded",
            BanditEvent::TipReceived { .. } => "TipReceived",
            BanditEvent::RequestReceived { .. } => "RequestReceived",
            BanditEvent::RequestUpdated { .. } => "RequestUpdated",
            BanditEvent::PreferencesChanged { .. } => "PreferencesChanged",
            BanditEvent::GigSnapshot { .. } => "GigSnapshot",
        }
    }
}
