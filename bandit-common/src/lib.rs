//! # Bandit Common Library
//!
//! Shared code for the Bandit gig service including:
//! - Domain models (tips, requests, gigs)
//! - Request admission evaluation
//! - Live feed merging
//! - Request preference management
//! - Event types (BanditEvent enum)
//! - Configuration loading
//! - Utility functions

pub mod admission;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod model;
pub mod prefs;
pub mod time;

pub use admission::{evaluate, Admission};
pub use error::{Error, Result};
pub use model::{
    Gig, GigTotals, Request, RequestAction, RequestCandidate, RequestStatus, SyncStatus, Tip,
};
pub use prefs::RequestPreferences;
