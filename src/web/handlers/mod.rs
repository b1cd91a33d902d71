//! Page handlers for the Corkboard web UI.

pub mod board;

pub use board::*;

use std::sync::Arc;

use crate::board::BoardService;
use crate::template::PageTemplates;

/// Application state shared by all handlers.
pub struct AppState {
    /// Board operations over the configured store.
    pub service: BoardService,
    /// Parsed page templates.
    pub templates: Arc<PageTemplates>,
    /// IANA timezone name used when displaying timestamps.
    pub timezone: String,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        service: BoardService,
        templates: Arc<PageTemplates>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            service,
            templates,
            timezone: timezone.into(),
        }
    }
}
