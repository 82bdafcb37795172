#![allow(dead_code)]

use axum::body::Bytes;
use axum_test::{TestResponse, TestServer};
use redirector::prelude::*;
use serde_json::json;
use std::sync::Arc;

/// Builds a server over a fresh in-memory store and hands back the store
/// for direct inspection.
pub fn create_test_server(strict_not_found: bool) -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), strict_not_found);
    let server = TestServer::new(app_router(state)).unwrap();
    (server, store)
}

pub async fn register(server: &TestServer, short_key: &str, resource: &str) -> TestResponse {
    server
        .post("/api/new")
        .json(&json!({ "ShortKey": short_key, "Resource": resource }))
        .await
}

pub async fn post_raw(
    server: &TestServer,
    content_type: Option<&str>,
    body: &'static str,
) -> TestResponse {
    let request = server
        .post("/api/new")
        .bytes(Bytes::from_static(body.as_bytes()));

    match content_type {
        Some(content_type) => request.content_type(content_type).await,
        None => request.await,
    }
}
