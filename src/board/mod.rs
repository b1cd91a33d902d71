//! Board module for Corkboard.
//!
//! This module provides the message board itself:
//! - Key layout of board and comment records in the flat store
//! - Repositories that read and write those records
//! - A service that validates input and assembles list/detail views

mod comment_repository;
pub mod keys;
mod repository;
mod service;
mod types;

pub use comment_repository::CommentRepository;
pub use repository::BoardRepository;
pub use service::BoardService;
pub use types::{
    Board, BoardDetail, Comment, NewBoard, NewComment, MAX_BOARD_NAME_LENGTH,
    MAX_COMMENT_LENGTH, MAX_CREATOR_LENGTH,
};
