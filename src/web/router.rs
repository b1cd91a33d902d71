//! Router configuration for the web UI.

use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{add_comment, create_board, get_board, list_boards, AppState};

/// Create the page router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_boards).post(create_board))
        .route("/:board_id", get(get_board).post(add_comment))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create a router serving files under `/static`.
///
/// Returns `None` if the directory does not exist.
pub fn create_static_router<P: AsRef<Path>>(static_path: P) -> Option<Router> {
    let static_path = static_path.as_ref();
    if !static_path.is_dir() {
        tracing::warn!(
            "Static directory {:?} not found, static files disabled",
            static_path
        );
        return None;
    }

    Some(Router::new().nest_service("/static", ServeDir::new(static_path)))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_static_router() {
        let dir = TempDir::new().unwrap();
        assert!(create_static_router(dir.path()).is_some());
        assert!(create_static_router(dir.path().join("missing")).is_none());
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "OK");
    }
}
