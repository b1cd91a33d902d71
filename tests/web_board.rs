//! Web Board Tests
//!
//! Integration tests for the board list and board pages.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{create_board, create_test_server, create_test_server_with_store};
use corkboard::store::KeyValueStore;
use corkboard::{CorkboardError, Result};

#[tokio::test]
async fn test_list_boards_empty() {
    let (server, _) = create_test_server();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("No boards yet."));
    assert!(html.contains(r#"name="board_name""#));
}

#[tokio::test]
async fn test_create_board_redirects_to_board() {
    let (server, _) = create_test_server();

    let location = create_board(&server, "alice", "Puppies").await;
    assert_eq!(location, "/1");

    let response = server.get(&location).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("<h1>Puppies</h1>"));
    assert!(html.contains("Created by alice"));
    assert!(html.contains("No comments yet."));
}

#[tokio::test]
async fn test_list_boards_shows_created_boards_in_order() {
    let (server, _) = create_test_server();
    create_board(&server, "alice", "Puppies").await;
    create_board(&server, "bob", "Kittens").await;

    let html = server.get("/").await.text();

    let puppies = html.find(r#"<a href="/1">Puppies</a>"#).unwrap();
    let kittens = html.find(r#"<a href="/2">Kittens</a>"#).unwrap();
    assert!(puppies < kittens);
    assert!(html.contains("<td>bob</td>"));
}

#[tokio::test]
async fn test_create_board_invalid_form_rerenders() {
    let (server, store) = create_test_server();

    let response = server
        .post("/")
        .form(&[("creator", ""), ("board_name", "Puppies")])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text();
    assert!(html.contains(r#"<p class="error">Please enter a name</p>"#));
    // Submitted value is kept in the form
    assert!(html.contains(r#"value="Puppies""#));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_create_board_too_long_fields() {
    let (server, _) = create_test_server();

    let long_creator = "a".repeat(31);
    let response = server
        .post("/")
        .form(&[("creator", long_creator.as_str()), ("board_name", "x")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response
        .text()
        .contains("The name must be at most 30 characters"));

    let long_name = "n".repeat(51);
    let response = server
        .post("/")
        .form(&[("creator", "alice"), ("board_name", long_name.as_str())])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response
        .text()
        .contains("The board name must be at most 50 characters"));
}

#[tokio::test]
async fn test_create_board_missing_fields() {
    let (server, _) = create_test_server();

    let response = server.post("/").form(&[("creator", "alice")]).await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("Please enter a board name"));
}

#[tokio::test]
async fn test_get_unknown_board_is_404() {
    let (server, _) = create_test_server();

    let response = server.get("/42").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains("The board does not exist."));
}

#[tokio::test]
async fn test_non_numeric_board_id_is_404() {
    let (server, _) = create_test_server();
    create_board(&server, "alice", "Puppies").await;

    for path in ["/abc", "/0", "/01", "/-1", "/1.0"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{path}");
    }

    let response = server
        .post("/abc")
        .form(&[("creator", "bob"), ("comment", "hi")])
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_comment_redirects_back() {
    let (server, _) = create_test_server();
    let location = create_board(&server, "alice", "Puppies").await;

    let response = server
        .post(&location)
        .form(&[("creator", "bob"), ("comment", "Cute!")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), location.as_str());

    server
        .post(&location)
        .form(&[("creator", "carol"), ("comment", "Very cute")])
        .await;

    let html = server.get(&location).await.text();
    let first = html.find("Cute!").unwrap();
    let second = html.find("Very cute").unwrap();
    assert!(first < second);
    assert!(html.contains("<p class=\"meta\">bob, "));
}

#[tokio::test]
async fn test_add_comment_invalid_form_rerenders() {
    let (server, _) = create_test_server();
    let location = create_board(&server, "alice", "Puppies").await;

    let long_creator = "b".repeat(31);
    let response = server
        .post(&location)
        .form(&[("creator", long_creator.as_str()), ("comment", "Cute!")])
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text();
    assert!(html.contains("The name must be at most 30 characters"));
    assert!(html.contains("<h1>Puppies</h1>"));
    assert!(html.contains(">Cute!</textarea>"));
    assert!(html.contains("No comments yet."));
}

#[tokio::test]
async fn test_add_comment_to_unknown_board() {
    let (server, store) = create_test_server();

    // Valid comments are stored even without a board
    let response = server
        .post("/9")
        .form(&[("creator", "bob"), ("comment", "Hello?")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        store.get("comment:1:board:9").await.unwrap(),
        Some("Hello?".to_string())
    );

    // The board page itself still does not exist
    assert_eq!(server.get("/9").await.status_code(), StatusCode::NOT_FOUND);

    // Invalid input on an unknown board cannot re-render a board page
    let response = server
        .post("/9")
        .form(&[("creator", ""), ("comment", "Hello?")])
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_text_is_escaped() {
    let (server, _) = create_test_server();
    let location = create_board(&server, "<b>mallory</b>", "<script>alert(1)</script>").await;
    server
        .post(&location)
        .form(&[("creator", "eve"), ("comment", r#""><img src=x onerror=alert(1)>"#)])
        .await;

    let list = server.get("/").await.text();
    assert!(!list.contains("<script>alert(1)</script>"));
    assert!(list.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(list.contains("&lt;b&gt;mallory&lt;/b&gt;"));

    let page = server.get(&location).await.text();
    assert!(!page.contains("<img src=x"));
    assert!(page.contains("&quot;&gt;&lt;img src=x onerror=alert(1)&gt;"));
}

#[tokio::test]
async fn test_invalid_form_values_are_escaped() {
    let (server, _) = create_test_server();

    let response = server
        .post("/")
        .form(&[("creator", ""), ("board_name", r#""><script>x</script>"#)])
        .await;

    let html = response.text();
    assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;x&lt;/script&gt;""#));
}

/// Store whose every operation fails, standing in for a lost connection.
struct UnavailableStore;

#[async_trait]
impl KeyValueStore for UnavailableStore {
    fn backend_name(&self) -> &'static str {
        "unavailable"
    }

    async fn allocate_id(&self, _counter: &str) -> Result<i64> {
        Err(CorkboardError::Store("connection refused".to_string()))
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<()> {
        Err(CorkboardError::Store("connection refused".to_string()))
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(CorkboardError::Store("connection refused".to_string()))
    }

    async fn scan(&self, _prefix: &str) -> Result<Vec<String>> {
        Err(CorkboardError::Store("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_store_failure_is_500() {
    let server = create_test_server_with_store(Arc::new(UnavailableStore));

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text().contains("connection refused"));

    let response = server
        .post("/")
        .form(&[("creator", "alice"), ("board_name", "Puppies")])
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = server.get("/1").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
