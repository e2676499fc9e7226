//! HTTP surface for Skycast.
//!
//! Thin plumbing over the weather pipeline and the history store: an
//! axum router, request handlers, and the single place where pipeline
//! error kinds become HTTP statuses.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use routes::{create_router, AppState};
