//! Gig service library
//!
//! Owns the active gig session: request admission, the request lifecycle,
//! the merged live feed, and the HTTP/SSE surface the mobile client talks
//! to. One gig is active at a time; all state is in memory for the session.

pub mod api;
pub mod error;
pub mod session;
pub mod simulator;
pub mod state;

pub use api::{create_router, AppState};
pub use error::{Error, Result};
pub use state::SharedState;
