//! Board service for Corkboard.
//!
//! Validates user input and assembles list/detail views from the
//! repositories. All four operations behind the web pages live here.

use tracing::{debug, info};

use super::comment_repository::CommentRepository;
use super::repository::BoardRepository;
use super::types::{
    Board, BoardDetail, NewBoard, NewComment, MAX_BOARD_NAME_LENGTH, MAX_COMMENT_LENGTH,
    MAX_CREATOR_LENGTH,
};
use crate::datetime::now_timestamp;
use crate::store::SharedStore;
use crate::{CorkboardError, Result};

/// Check that a field is non-blank and at most `max` characters.
fn validate_field(label: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CorkboardError::Validation(format!("Please enter a {label}")));
    }
    if value.chars().count() > max {
        return Err(CorkboardError::Validation(format!(
            "The {label} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate a creator name.
fn validate_creator(creator: &str) -> Result<()> {
    validate_field("name", creator, MAX_CREATOR_LENGTH)
}

/// Validate a board name.
fn validate_board_name(name: &str) -> Result<()> {
    validate_field("board name", name, MAX_BOARD_NAME_LENGTH)
}

/// Validate comment text.
fn validate_comment(text: &str) -> Result<()> {
    validate_field("comment", text, MAX_COMMENT_LENGTH)
}

/// Service for board operations.
///
/// Holds the injected store handle; clones share it.
#[derive(Clone)]
pub struct BoardService {
    store: SharedStore,
}

impl BoardService {
    /// Create a new BoardService over the given store.
    pub fn new(store: SharedStore) -> Self {
        debug!("Board service using {} store", store.backend_name());
        Self { store }
    }

    /// List all boards, ordered by id.
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        BoardRepository::new(self.store.as_ref()).list_all().await
    }

    /// Create a board and return its id.
    ///
    /// Fails with a validation error if the creator is blank or longer than
    /// 30 characters, or the name is blank or longer than 50 characters.
    /// Nothing is written in that case.
    pub async fn create_board(&self, creator: &str, name: &str) -> Result<i64> {
        validate_creator(creator)?;
        validate_board_name(name)?;

        let repo = BoardRepository::new(self.store.as_ref());
        let id = repo
            .create(&NewBoard::new(creator, name), &now_timestamp())
            .await?;

        info!("Board {} created by {}", id, creator);
        Ok(id)
    }

    /// Get a board with its comments.
    ///
    /// Fails with `NotFound` if no board record exists for the id.
    pub async fn get_board(&self, board_id: i64) -> Result<BoardDetail> {
        let board = BoardRepository::new(self.store.as_ref())
            .get_by_id(board_id)
            .await?
            .ok_or_else(|| CorkboardError::NotFound("board".to_string()))?;

        let comments = CommentRepository::new(self.store.as_ref())
            .list_by_board(board_id)
            .await?;

        Ok(BoardDetail { board, comments })
    }

    /// Add a comment to a board and return the comment id.
    ///
    /// Fails with a validation error if the creator is blank or longer than
    /// 30 characters, or the text is blank or longer than 255 characters.
    /// The board is not required to exist.
    pub async fn add_comment(&self, board_id: i64, creator: &str, text: &str) -> Result<i64> {
        validate_creator(creator)?;
        validate_comment(text)?;

        let repo = CommentRepository::new(self.store.as_ref());
        let id = repo
            .create(&NewComment::new(board_id, creator, text), &now_timestamp())
            .await?;

        info!("Comment {} added to board {} by {}", id, board_id, creator);
        Ok(id)
    }
}
