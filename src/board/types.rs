//! Board and comment types.

/// Maximum creator name length in characters.
pub const MAX_CREATOR_LENGTH: usize = 30;

/// Maximum board name length in characters.
pub const MAX_BOARD_NAME_LENGTH: usize = 50;

/// Maximum comment text length in characters.
pub const MAX_COMMENT_LENGTH: usize = 255;

/// A board as shown in the board list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Board ID.
    pub id: i64,
    /// Board name.
    pub name: String,
    /// Name of whoever created the board.
    pub creator: String,
    /// Creation timestamp (UTC, `YYYY-MM-DD HH:MM:SS`).
    pub created_at: String,
}

/// A comment on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment ID.
    pub id: i64,
    /// ID of the board the comment was posted to.
    pub board_id: i64,
    /// Comment text.
    pub text: String,
    /// Name of whoever posted the comment.
    pub creator: String,
    /// Creation timestamp (UTC, `YYYY-MM-DD HH:MM:SS`).
    pub created_at: String,
}

/// A board together with its comments, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDetail {
    /// The board itself.
    pub board: Board,
    /// Comments posted to the board.
    pub comments: Vec<Comment>,
}

/// Data for creating a new board.
#[derive(Debug, Clone)]
pub struct NewBoard {
    /// Board name.
    pub name: String,
    /// Creator name.
    pub creator: String,
}

impl NewBoard {
    /// Create a new board request.
    pub fn new(creator: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creator: creator.into(),
        }
    }
}

/// Data for adding a comment to a board.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Target board ID.
    pub board_id: i64,
    /// Creator name.
    pub creator: String,
    /// Comment text.
    pub text: String,
}

impl NewComment {
    /// Create a new comment request.
    pub fn new(board_id: i64, creator: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            board_id,
            creator: creator.into(),
            text: text.into(),
        }
    }
}
