//! Comment repository for Corkboard.
//!
//! A comment is a text record whose key carries both the comment id and the
//! board id, plus creator and date side-records keyed by the comment id.

use tracing::debug;

use super::keys::{self, Counter};
use super::repository::side_record;
use super::types::{Comment, NewComment};
use crate::store::KeyValueStore;
use crate::Result;

/// Repository for comment records.
pub struct CommentRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository over the given store.
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Allocate an id and write the comment's records.
    ///
    /// Does not check that the board exists.
    pub async fn create(&self, new_comment: &NewComment, created_at: &str) -> Result<i64> {
        let id = self.store.allocate_id(Counter::Comment.key()).await?;

        self.store
            .put_all(&[
                (
                    keys::comment_text(id, new_comment.board_id),
                    new_comment.text.clone(),
                ),
                (keys::comment_creator(id), new_comment.creator.clone()),
                (keys::comment_created_at(id), created_at.to_string()),
            ])
            .await?;

        debug!("Stored comment {} on board {}", id, new_comment.board_id);
        Ok(id)
    }

    /// List the comments of a board, oldest first.
    ///
    /// The store cannot scan by board, so this walks the whole comment
    /// namespace and keeps the keys naming `board_id`.
    pub async fn list_by_board(&self, board_id: i64) -> Result<Vec<Comment>> {
        let mut matching: Vec<(i64, String)> = self
            .store
            .scan(keys::COMMENT_PREFIX)
            .await?
            .into_iter()
            .filter_map(|key| match keys::parse_comment_key(&key) {
                Some((comment_id, b)) if b == board_id => Some((comment_id, key)),
                _ => None,
            })
            .collect();
        matching.sort_unstable_by_key(|(comment_id, _)| *comment_id);

        let mut comments = Vec::with_capacity(matching.len());
        for (id, key) in matching {
            let text = match self.store.get(&key).await? {
                Some(text) => text,
                None => continue,
            };
            let creator = side_record(self.store, &keys::comment_creator(id)).await?;
            let created_at = side_record(self.store, &keys::comment_created_at(id)).await?;

            comments.push(Comment {
                id,
                board_id,
                text,
                creator,
                created_at,
            });
        }

        Ok(comments)
    }
}
