//! Domain models for the Bandit gig service
//!
//! Tips are immutable once recorded. Requests mutate only their `status`
//! field, and only through operator actions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sync state of a record relative to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Synced,
    Pending,
    Offline,
}

impl Default for SyncStatus {
    fn default() -> Self {
        SyncStatus::Synced
    }
}

/// Status of a song request
///
/// Created as `Queued` or `Pinned` at admission time. Operator actions move
/// a request to `Pinned`, `Done`, or `Refunded` by unconditional overwrite;
/// there is no transition back to `Queued`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Queued,
    Pinned,
    Done,
    Refunded,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Queued => write!(f, "queued"),
            RequestStatus::Pinned => write!(f, "pinned"),
            RequestStatus::Done => write!(f, "done"),
            RequestStatus::Refunded => write!(f, "refunded"),
        }
    }
}

/// Operator action on an existing request
///
/// Closed set, matched exhaustively by the lifecycle controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    Pin,
    Done,
    Refund,
}

impl RequestAction {
    /// The status this action writes, overwriting any prior status
    pub fn applied_status(&self) -> RequestStatus {
        match self {
            RequestAction::Pin => RequestStatus::Pinned,
            RequestAction::Done => RequestStatus::Done,
            RequestAction::Refund => RequestStatus::Refunded,
        }
    }
}

/// A tip received during a gig
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    pub id: Uuid,
    pub gig_id: Uuid,
    /// Event timestamp, milliseconds since the Unix epoch
    pub ts_ms: i64,
    /// Positive amount in the gig currency
    pub amount: f64,
    pub currency: String,
    pub fan_name: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub sync_status: SyncStatus,
}

/// A song request admitted during a gig
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub id: Uuid,
    pub gig_id: Uuid,
    /// Event timestamp, milliseconds since the Unix epoch
    pub ts_ms: i64,
    pub title: String,
    pub note: Option<String>,
    /// Present only when a tip accompanied the request
    pub tip_amount: Option<f64>,
    pub status: RequestStatus,
    #[serde(default)]
    pub sync_status: SyncStatus,
}

/// An incoming song request candidate, before admission
///
/// Admission decides whether a `Request` record is created from this at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCandidate {
    pub title: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub tip_amount: Option<f64>,
    #[serde(default)]
    pub fan_name: Option<String>,
}

/// Aggregate totals for a gig
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GigTotals {
    /// Sum of tip amounts
    pub tips: f64,
    pub tip_count: usize,
    pub request_count: usize,
    pub avg_tip: f64,
}

/// One live-performance session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gig {
    pub id: Uuid,
    pub title: String,
    pub venue: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub start_ts_ms: i64,
    pub end_ts_ms: Option<i64>,
    pub totals: GigTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Pinned).unwrap(),
            "\"pinned\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::Refunded).unwrap(),
            "\"refunded\""
        );
    }

    #[test]
    fn test_candidate_optional_fields_default() {
        let candidate: RequestCandidate =
            serde_json::from_str(r#"{"title": "Fast Car"}"#).unwrap();
        assert_eq!(candidate.title, "Fast Car");
        assert!(candidate.note.is_none());
        assert!(candidate.tip_amount.is_none());
        assert!(candidate.fan_name.is_none());
    }
}
