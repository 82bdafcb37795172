//! Domain layer: the redirection entity and the storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - The [`entities::Redirection`] pair
//! - [`store`] - The [`store::RedirectionStore`] trait implemented by
//!   [`crate::infrastructure::store`]
//!
//! The domain layer has no dependency on HTTP or on any concrete backend.

pub mod entities;
pub mod store;
