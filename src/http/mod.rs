//! HTTP server module.
//!
//! An axum-based REST API over the analysis core. The layer owns request
//! parsing, JSON serialization, and error mapping; all analysis work happens
//! in the service layer behind [`Analyzer`](crate::services::Analyzer).

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
