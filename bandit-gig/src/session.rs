//! Active gig session
//!
//! A `GigSession` exclusively owns the tip and request lists for one live
//! performance. Both lists are append-only, except for the `status` field
//! of a request, which only operator actions mutate.

use tracing::{debug, info};
use uuid::Uuid;

use bandit_common::admission::{self, Admission};
use bandit_common::feed::{self, FeedItem, FEED_DISPLAY_LIMIT};
use bandit_common::model::{
    Gig, GigTotals, Request, RequestAction, RequestCandidate, SyncStatus, Tip,
};
use bandit_common::prefs::RequestPreferences;
use bandit_common::time;

/// Stored tips are capped to this many most-recent entries
///
/// Note the asymmetry with the feed: the rendered feed shows at most 10
/// items, tip storage keeps 20, and request storage is uncapped. Existing
/// clients depend on these exact bounds.
pub const TIP_STORAGE_LIMIT: usize = 20;

/// One live-performance session and the records it owns
#[derive(Debug, Clone)]
pub struct GigSession {
    gig: Gig,
    tips: Vec<Tip>,
    requests: Vec<Request>,
}

impl GigSession {
    /// Start a new session with empty tip and request lists
    pub fn start(title: String, venue: String, lat: Option<f64>, lng: Option<f64>) -> Self {
        let gig = Gig {
            id: Uuid::new_v4(),
            title,
            venue,
            lat,
            lng,
            start_ts_ms: time::now_ms(),
            end_ts_ms: None,
            totals: GigTotals::default(),
        };
        info!("Started gig {} at {}", gig.id, gig.venue);
        Self {
            gig,
            tips: Vec::new(),
            requests: Vec::new(),
        }
    }

    pub fn gig(&self) -> &Gig {
        &self.gig
    }

    pub fn tips(&self) -> &[Tip] {
        &self.tips
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Record a tip for this gig
    ///
    /// Storage keeps only the `TIP_STORAGE_LIMIT` most recent tips; older
    /// entries are dropped from the front.
    pub fn record_tip(
        &mut self,
        amount: f64,
        currency: String,
        fan_name: Option<String>,
        message: Option<String>,
        sync_status: SyncStatus,
    ) -> Tip {
        let tip = Tip {
            id: Uuid::new_v4(),
            gig_id: self.gig.id,
            ts_ms: time::now_ms(),
            amount,
            currency,
            fan_name,
            message,
            sync_status,
        };
        self.tips.push(tip.clone());
        if self.tips.len() > TIP_STORAGE_LIMIT {
            let excess = self.tips.len() - TIP_STORAGE_LIMIT;
            self.tips.drain(..excess);
        }
        debug!("Recorded tip {} of {}", tip.id, tip.amount);
        tip
    }

    /// Run admission for a candidate and record the request if admitted
    ///
    /// Returns `None` when the candidate is rejected: no record is created
    /// and nothing is surfaced to the fan.
    pub fn submit_request(
        &mut self,
        candidate: &RequestCandidate,
        prefs: &RequestPreferences,
        sync_status: SyncStatus,
    ) -> Option<Request> {
        match admission::evaluate(candidate, prefs) {
            Admission::Rejected => {
                debug!("Rejected request candidate \"{}\"", candidate.title);
                None
            }
            Admission::Admitted(status) => {
                let request = Request {
                    id: Uuid::new_v4(),
                    gig_id: self.gig.id,
                    ts_ms: time::now_ms(),
                    title: candidate.title.clone(),
                    note: candidate.note.clone(),
                    tip_amount: candidate.tip_amount,
                    status,
                    sync_status,
                };
                info!(
                    "Admitted request {} \"{}\" as {}",
                    request.id, request.title, request.status
                );
                self.requests.push(request.clone());
                Some(request)
            }
        }
    }

    /// Apply an operator action to an existing request
    ///
    /// The new status overwrites any prior status, so repeating an action is
    /// idempotent. An unknown id is a silent no-op and returns `None`;
    /// otherwise returns the updated request and a confirmation line for the
    /// UI.
    pub fn apply_request_action(
        &mut self,
        request_id: Uuid,
        action: RequestAction,
    ) -> Option<(Request, &'static str)> {
        let request = self.requests.iter_mut().find(|r| r.id == request_id)?;
        request.status = action.applied_status();
        let message = match action {
            RequestAction::Pin => "Request pinned to top",
            RequestAction::Done => "Request marked as done",
            RequestAction::Refund => "Request refunded",
        };
        info!("Request {} -> {}", request_id, request.status);
        Some((request.clone(), message))
    }

    /// The merged live feed, most recent first, capped for display
    pub fn feed(&self) -> Vec<FeedItem> {
        feed::merge_feed(&self.tips, &self.requests, FEED_DISPLAY_LIMIT)
    }

    /// Current session totals over the stored lists
    pub fn totals(&self) -> GigTotals {
        let tips: f64 = self.tips.iter().map(|t| t.amount).sum();
        let tip_count = self.tips.len();
        let avg_tip = if tip_count > 0 {
            tips / tip_count as f64
        } else {
            0.0
        };
        GigTotals {
            tips,
            tip_count,
            request_count: self.requests.len(),
            avg_tip,
        }
    }

    /// End the session, finalizing totals and the end timestamp
    pub fn end(mut self) -> Gig {
        self.gig.totals = self.totals();
        self.gig.end_ts_ms = Some(time::now_ms());
        info!(
            "Ended gig {}: {} tips totaling {:.2}",
            self.gig.id, self.gig.totals.tip_count, self.gig.totals.tips
        );
        self.gig
    }
}
