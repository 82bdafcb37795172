//! In-memory store backed by a sharded concurrent map.

use crate::domain::store::{RedirectionStore, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

/// Process-local redirection table.
///
/// `DashMap` shards its locks, so puts and gets on different keys do not
/// contend and a put never observes a half-written entry for another key.
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered short keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl RedirectionStore for MemoryStore {
    async fn put(&self, short_key: &str, resource: &str) -> StoreResult<()> {
        if let Some(previous) = self
            .entries
            .insert(short_key.to_owned(), resource.to_owned())
        {
            debug!("Overwrote {} (was {})", short_key, previous);
        }
        Ok(())
    }

    async fn get(&self, short_key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(short_key).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn put_then_get() {
        let store = MemoryStore::new();

        store.put("/docs", "https://example.com/docs").await.unwrap();

        let resource = store.get("/docs").await.unwrap();
        assert_eq!(resource.as_deref(), Some("https://example.com/docs"));
    }

    #[tokio::test]
    async fn get_missing_key() {
        let store = MemoryStore::new();

        assert_eq!(store.get("/nothing").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn later_put_overwrites() {
        let store = MemoryStore::new();

        store.put("/a", "http://first").await.unwrap();
        store.put("/a", "http://second").await.unwrap();

        assert_eq!(store.get("/a").await.unwrap().as_deref(), Some("http://second"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn keys_are_matched_exactly() {
        let store = MemoryStore::new();

        store.put("/a", "http://x").await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("/a/").await.unwrap(), None);
        assert_eq!(store.get("/A").await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_puts_keep_unrelated_entries() {
        let store = Arc::new(MemoryStore::new());
        store.put("/stable", "http://stable").await.unwrap();

        let mut handles = Vec::new();
        for i in 0..64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for j in 0..50 {
                    let key = format!("/k{i}-{j}");
                    store.put(&key, &format!("http://t/{i}/{j}")).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len(), 64 * 50 + 1);
        assert_eq!(
            store.get("/stable").await.unwrap().as_deref(),
            Some("http://stable")
        );
        assert_eq!(
            store.get("/k17-42").await.unwrap().as_deref(),
            Some("http://t/17/42")
        );
    }
}
