//! Web UI module for Corkboard.
//!
//! Serves the board list and board pages as server-rendered HTML, with
//! form posts for creating boards and adding comments.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::PageError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
