//! Shared service state
//!
//! Thread-safe shared state for the gig service. The active session, the
//! artist's request preferences, and the completed-gig history live behind
//! RwLocks; all mutation goes through the operations here, one at a time.

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use bandit_common::events::BanditEvent;
use bandit_common::feed::FeedItem;
use bandit_common::model::{Gig, Request, RequestAction, RequestCandidate, SyncStatus, Tip};
use bandit_common::prefs::RequestPreferences;
use bandit_common::time;

use crate::error::{Error, Result};
use crate::session::GigSession;

/// Shared state accessible by all handlers
///
/// Uses RwLock for concurrent read access with serialized writes. Exactly
/// one gig session is active at a time.
pub struct SharedState {
    /// Active gig session (None between gigs)
    pub session: RwLock<Option<GigSession>>,

    /// Artist request preferences, mutable at any time
    pub prefs: RwLock<RequestPreferences>,

    /// Summaries of completed gigs, most recent last
    pub history: RwLock<Vec<Gig>>,

    /// Event broadcaster for SSE events
    pub event_tx: broadcast::Sender<BanditEvent>,
}

impl SharedState {
    /// Create new shared state with default values
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100); // Buffer up to 100 events
        Self {
            session: RwLock::new(None),
            prefs: RwLock::new(RequestPreferences::default()),
            history: RwLock::new(Vec::new()),
            event_tx,
        }
    }

    /// Broadcast an event to all SSE listeners
    pub fn broadcast_event(&self, event: BanditEvent) {
        // Ignore send errors (no receivers is OK)
        let _ = self.event_tx.send(event);
    }

    /// Subscribe to event stream for SSE
    pub fn subscribe_events(&self) -> broadcast::Receiver<BanditEvent> {
        self.event_tx.subscribe()
    }

    /// Start a new gig session
    ///
    /// Fails when a session is already active; the service supports exactly
    /// one live gig at a time.
    pub async fn start_gig(
        &self,
        title: String,
        venue: String,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> Result<Gig> {
        let mut session = self.session.write().await;
        if session.is_some() {
            return Err(Error::GigAlreadyActive);
        }
        let new_session = GigSession::start(title, venue, lat, lng);
        let gig = new_session.gig().clone();
        *session = Some(new_session);

        self.broadcast_event(BanditEvent::GigStarted {
            gig_id: gig.id,
            title: gig.title.clone(),
            venue: gig.venue.clone(),
            timestamp: time::now(),
        });
        Ok(gig)
    }

    /// End the active gig, finalize totals, and archive the summary
    pub async fn end_gig(&self) -> Result<Gig> {
        let mut session = self.session.write().await;
        let active = session.take().ok_or(Error::NoActiveGig)?;
        let gig = active.end();

        self.history.write().await.push(gig.clone());
        self.broadcast_event(BanditEvent::GigEnded {
            gig_id: gig.id,
            totals: gig.totals,
            timestamp: time::now(),
        });
        Ok(gig)
    }

    /// Snapshot of the active gig with live totals
    pub async fn current_gig(&self) -> Result<Gig> {
        let session = self.session.read().await;
        let active = session.as_ref().ok_or(Error::NoActiveGig)?;
        let mut gig = active.gig().clone();
        gig.totals = active.totals();
        Ok(gig)
    }

    /// Completed-gig summaries, oldest first
    pub async fn gig_history(&self) -> Vec<Gig> {
        self.history.read().await.clone()
    }

    /// Record a tip against the active gig
    pub async fn record_tip(
        &self,
        amount: f64,
        currency: String,
        fan_name: Option<String>,
        message: Option<String>,
    ) -> Result<Tip> {
        if amount <= 0.0 || !amount.is_finite() {
            return Err(Error::BadRequest("Tip amount must be positive".to_string()));
        }
        let mut session = self.session.write().await;
        let active = session.as_mut().ok_or(Error::NoActiveGig)?;
        let tip = active.record_tip(amount, currency, fan_name, message, SyncStatus::Synced);

        self.broadcast_event(BanditEvent::TipReceived {
            tip_id: tip.id,
            gig_id: tip.gig_id,
            amount: tip.amount,
            fan_name: tip.fan_name.clone(),
            timestamp: time::now(),
        });
        Ok(tip)
    }

    /// Submit a request candidate to admission
    ///
    /// Returns `Ok(None)` when the candidate was rejected: rejection is a
    /// valid outcome and produces no record and no event.
    pub async fn submit_request(&self, candidate: RequestCandidate) -> Result<Option<Request>> {
        if candidate.title.trim().is_empty() {
            return Err(Error::BadRequest("Request title must be nonempty".to_string()));
        }
        let prefs = self.prefs.read().await.clone();
        let mut session = self.session.write().await;
        let active = session.as_mut().ok_or(Error::NoActiveGig)?;

        let admitted = active.submit_request(&candidate, &prefs, SyncStatus::Synced);
        if let Some(ref request) = admitted {
            self.broadcast_event(BanditEvent::RequestReceived {
                request_id: request.id,
                gig_id: request.gig_id,
                title: request.title.clone(),
                status: request.status,
                preferred: bandit_common::admission::is_preferred(&request.title, &prefs),
                timestamp: time::now(),
            });
        }
        Ok(admitted)
    }

    /// Apply an operator action to a request in the active gig
    ///
    /// Unknown ids are a silent no-op (`Ok(None)`); callers are expected to
    /// only reference ids they previously observed in the feed.
    pub async fn apply_request_action(
        &self,
        request_id: Uuid,
        action: RequestAction,
    ) -> Result<Option<&'static str>> {
        let mut session = self.session.write().await;
        let active = session.as_mut().ok_or(Error::NoActiveGig)?;

        match active.apply_request_action(request_id, action) {
            Some((request, message)) => {
                self.broadcast_event(BanditEvent::RequestUpdated {
                    request_id: request.id,
                    gig_id: request.gig_id,
                    status: request.status,
                    timestamp: time::now(),
                });
                Ok(Some(message))
            }
            None => Ok(None),
        }
    }

    /// The merged live feed of the active gig
    pub async fn feed(&self) -> Result<Vec<FeedItem>> {
        let session = self.session.read().await;
        let active = session.as_ref().ok_or(Error::NoActiveGig)?;
        Ok(active.feed())
    }

    /// Snapshot of the live session for a client joining mid-gig
    ///
    /// Bundles the gig (with live totals), the capped feed, and the current
    /// preferences into one event. `None` between gigs; the SSE stream then
    /// opens with whatever broadcasts next.
    pub async fn live_snapshot(&self) -> Option<BanditEvent> {
        let session = self.session.read().await;
        let active = session.as_ref()?;
        let mut gig = active.gig().clone();
        gig.totals = active.totals();
        Some(BanditEvent::GigSnapshot {
            gig,
            feed: active.feed(),
            preferences: self.prefs.read().await.clone(),
            timestamp: time::now(),
        })
    }

    /// Current request preferences
    pub async fn preferences(&self) -> RequestPreferences {
        self.prefs.read().await.clone()
    }

    /// Replace the request preferences wholesale
    pub async fn set_preferences(&self, prefs: RequestPreferences) {
        *self.prefs.write().await = prefs;
        self.broadcast_event(BanditEvent::PreferencesChanged {
            timestamp: time::now(),
        });
    }

    /// Edit the preference string sets in place
    ///
    /// The closure returns whether anything changed; a change broadcasts
    /// `PreferencesChanged`.
    pub async fn edit_preferences<F>(&self, edit: F) -> bool
    where
        F: FnOnce(&mut RequestPreferences) -> bool,
    {
        let changed = {
            let mut prefs = self.prefs.write().await;
            edit(&mut prefs)
        };
        if changed {
            self.broadcast_event(BanditEvent::PreferencesChanged {
                timestamp: time::now(),
            });
        }
        changed
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
