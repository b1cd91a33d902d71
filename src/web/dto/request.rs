//! Form DTOs for the web pages.

use serde::Deserialize;

/// Board creation form posted to `/`.
///
/// Missing fields decode as empty strings and are then rejected by
/// validation like any other blank input.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBoardForm {
    /// Creator name.
    #[serde(default)]
    pub creator: String,
    /// Board name.
    #[serde(default)]
    pub board_name: String,
}

/// Comment form posted to `/<board_id>`.
#[derive(Debug, Default, Deserialize)]
pub struct AddCommentForm {
    /// Creator name.
    #[serde(default)]
    pub creator: String,
    /// Comment text.
    #[serde(default)]
    pub comment: String,
}
