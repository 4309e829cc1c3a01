//! Scout API - HTTP server
//!
//! Provides the search and follow-up endpoints over the upstream chat
//! model, plus a liveness probe.

pub mod error;
pub mod format;
pub mod handlers;
pub mod routes;
pub mod sessions;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
