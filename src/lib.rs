//! Corkboard - a minimal web message board
//!
//! Boards and their comments live in a flat key-value store and are served
//! as server-rendered HTML pages.

pub mod board;
pub mod config;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod store;
pub mod template;
pub mod web;

pub use board::{Board, BoardDetail, BoardService, Comment};
pub use config::{Config, StoreBackend};
pub use error::{CorkboardError, Result};
pub use store::{KeyValueStore, MemoryStore, SharedStore};
pub use template::PageTemplates;
pub use web::{AppState, WebServer};
