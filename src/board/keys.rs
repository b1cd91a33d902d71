//! Key layout for board and comment records.
//!
//! Every key the board layer reads or writes is built here. Ids are
//! integers, so the rendered keys cannot collide across namespaces.
//!
//! | Key | Value |
//! |---|---|
//! | `board:<id>` | board name |
//! | `creator:board:<id>` | board creator |
//! | `creation_date:board:<id>` | board timestamp |
//! | `comment:<id>:board:<board_id>` | comment text |
//! | `creator:comment:<id>` | comment creator |
//! | `creation_date:comment:<id>` | comment timestamp |

/// Prefix of board name records.
pub const BOARD_PREFIX: &str = "board:";

/// Prefix of comment text records.
pub const COMMENT_PREFIX: &str = "comment:";

/// Id counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// Board ids.
    Board,
    /// Comment ids.
    Comment,
}

impl Counter {
    /// Store key of the counter.
    pub fn key(&self) -> &'static str {
        match self {
            Counter::Board => "last-desk-id",
            Counter::Comment => "last-comment-id",
        }
    }
}

/// `board:<id>`
pub fn board_name(board_id: i64) -> String {
    format!("{BOARD_PREFIX}{board_id}")
}

/// `creator:board:<id>`
pub fn board_creator(board_id: i64) -> String {
    format!("creator:{BOARD_PREFIX}{board_id}")
}

/// `creation_date:board:<id>`
pub fn board_created_at(board_id: i64) -> String {
    format!("creation_date:{BOARD_PREFIX}{board_id}")
}

/// `comment:<id>:board:<board_id>`
pub fn comment_text(comment_id: i64, board_id: i64) -> String {
    format!("{COMMENT_PREFIX}{comment_id}:{BOARD_PREFIX}{board_id}")
}

/// `creator:comment:<id>`
pub fn comment_creator(comment_id: i64) -> String {
    format!("creator:{COMMENT_PREFIX}{comment_id}")
}

/// `creation_date:comment:<id>`
pub fn comment_created_at(comment_id: i64) -> String {
    format!("creation_date:{COMMENT_PREFIX}{comment_id}")
}

/// Parse a board id from a `board:<id>` key.
///
/// Returns `None` for anything that [`board_name`] would not have produced.
pub fn parse_board_key(key: &str) -> Option<i64> {
    key.strip_prefix(BOARD_PREFIX).and_then(parse_id)
}

/// Parse `(comment_id, board_id)` from a `comment:<id>:board:<board_id>` key.
pub fn parse_comment_key(key: &str) -> Option<(i64, i64)> {
    let rest = key.strip_prefix(COMMENT_PREFIX)?;
    let (comment_id, board_part) = rest.split_once(':')?;
    let board_id = board_part.strip_prefix(BOARD_PREFIX)?;
    Some((parse_id(comment_id)?, parse_id(board_id)?))
}

/// Parse a record id: plain ASCII digits, positive, no sign or padding.
///
/// Also used for ids taken from URLs.
pub fn parse_id(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) || s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}
