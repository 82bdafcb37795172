//! HTTP layer: translates requests into store operations.
//!
//! # Modules
//!
//! - [`dto`] - Request body decoding
//! - [`handlers`] - Creation and redirect handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - `/api` route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
