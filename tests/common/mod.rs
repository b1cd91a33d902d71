//! Test helpers for web tests.
//!
//! Builds an in-process router over a chosen store, ready for `axum_test`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use corkboard::board::BoardService;
use corkboard::store::{MemoryStore, SharedStore};
use corkboard::template::PageTemplates;
use corkboard::web::create_router;
use corkboard::AppState;

/// Create a test server over the given store.
pub fn create_test_server_with_store(store: SharedStore) -> TestServer {
    let templates = PageTemplates::builtin().expect("built-in templates must parse");
    let app_state = Arc::new(AppState::new(
        BoardService::new(store),
        Arc::new(templates),
        "UTC",
    ));

    TestServer::new(create_router(app_state)).expect("Failed to create test server")
}

/// Create a test server over a fresh in-memory store.
pub fn create_test_server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let server = create_test_server_with_store(store.clone());
    (server, store)
}

/// Post the board creation form and return the `Location` header.
pub async fn create_board(server: &TestServer, creator: &str, name: &str) -> String {
    let response = server
        .post("/")
        .form(&[("creator", creator), ("board_name", name)])
        .await;
    assert_eq!(
        response.status_code(),
        StatusCode::SEE_OTHER,
        "{}",
        response.text()
    );

    response
        .header("location")
        .to_str()
        .expect("location header is ASCII")
        .to_string()
}
