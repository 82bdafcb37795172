//! Redirection store backends.
//!
//! - [`MemoryStore`] - Default, process-local
//! - [`RedisStore`] - Durable, selected when Redis is configured

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
