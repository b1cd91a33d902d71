//! Template values for the web pages.

use crate::board::{Board, Comment};
use crate::datetime::format_timestamp_default;
use crate::template::Value;

/// Board as shown on a page, with its timestamp in the display timezone.
pub fn board_value(board: &Board, timezone: &str) -> Value {
    Value::object([
        ("id", Value::from(board.id)),
        ("name", Value::from(board.name.as_str())),
        ("creator", Value::from(board.creator.as_str())),
        (
            "created_at",
            Value::from(format_timestamp_default(&board.created_at, timezone)),
        ),
    ])
}

/// Comment as shown on a board page.
pub fn comment_value(comment: &Comment, timezone: &str) -> Value {
    Value::object([
        ("id", Value::from(comment.id)),
        ("text", Value::from(comment.text.as_str())),
        ("creator", Value::from(comment.creator.as_str())),
        (
            "created_at",
            Value::from(format_timestamp_default(&comment.created_at, timezone)),
        ),
    ])
}

/// List of boards for the board list page.
pub fn boards_value(boards: &[Board], timezone: &str) -> Value {
    Value::List(boards.iter().map(|b| board_value(b, timezone)).collect())
}

/// List of comments for the board page.
pub fn comments_value(comments: &[Comment], timezone: &str) -> Value {
    Value::List(comments.iter().map(|c| comment_value(c, timezone)).collect())
}
