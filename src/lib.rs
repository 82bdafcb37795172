//! # Redirector
//!
//! A small HTTP service that maps short keys to resource URLs and redirects
//! to them, built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The redirection entity and the store trait
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory and Redis stores
//! - **API Layer** ([`api`]) - Handlers, body decoding and middleware
//!
//! ## Endpoints
//!
//! - `POST /api/new` with `{"ShortKey": "/docs", "Resource": "https://..."}`
//!   registers a redirection (last write wins)
//! - Any other path is looked up as a short key and answered with
//!   `303 See Other`, or `Not found`
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run
//! curl -H 'Content-Type: application/json' \
//!      -d '{"ShortKey":"/docs","Resource":"https://example.com/docs"}' \
//!      localhost:8080/api/new
//! curl -i localhost:8080/docs
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`].

pub mod api;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for integration tests and embedders.
pub mod prelude {
    pub use crate::domain::entities::Redirection;
    pub use crate::domain::store::{RedirectionStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryStore, RedisStore};
    pub use crate::routes::app_router;
    pub use crate::state::AppState;
}
