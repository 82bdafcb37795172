//! Infrastructure layer: concrete [`crate::domain::store::RedirectionStore`]
//! backends.
//!
//! # Modules
//!
//! - [`store`] - In-memory and Redis implementations

pub mod store;
