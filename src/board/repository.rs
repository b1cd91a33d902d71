//! Board repository for Corkboard.
//!
//! Reads and writes board records in the key-value store. A board is one
//! name record plus two side-records (creator, creation date), all keyed by
//! the board id.

use tracing::{debug, warn};

use super::keys::{self, Counter};
use super::types::{Board, NewBoard};
use crate::store::KeyValueStore;
use crate::Result;

/// Repository for board records.
pub struct BoardRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> BoardRepository<'a> {
    /// Create a new BoardRepository over the given store.
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Allocate an id and write the board's records.
    ///
    /// The three records go out as one batch. Id allocation is a separate
    /// store call, so a failed write leaves a gap in the id sequence.
    pub async fn create(&self, new_board: &NewBoard, created_at: &str) -> Result<i64> {
        let id = self.store.allocate_id(Counter::Board.key()).await?;

        self.store
            .put_all(&[
                (keys::board_name(id), new_board.name.clone()),
                (keys::board_creator(id), new_board.creator.clone()),
                (keys::board_created_at(id), created_at.to_string()),
            ])
            .await?;

        debug!("Stored board {}", id);
        Ok(id)
    }

    /// Get a board by ID.
    ///
    /// Returns `None` when no name record exists for the id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Board>> {
        let name = match self.store.get(&keys::board_name(id)).await? {
            Some(name) => name,
            None => return Ok(None),
        };

        let creator = side_record(self.store, &keys::board_creator(id)).await?;
        let created_at = side_record(self.store, &keys::board_created_at(id)).await?;

        Ok(Some(Board {
            id,
            name,
            creator,
            created_at,
        }))
    }

    /// List the ids of all boards, ascending.
    ///
    /// Keys in the board namespace that do not parse are skipped.
    pub async fn list_ids(&self) -> Result<Vec<i64>> {
        let mut ids: Vec<i64> = self
            .store
            .scan(keys::BOARD_PREFIX)
            .await?
            .iter()
            .filter_map(|key| keys::parse_board_key(key))
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// List all boards, ordered by id.
    pub async fn list_all(&self) -> Result<Vec<Board>> {
        let mut boards = Vec::new();
        for id in self.list_ids().await? {
            if let Some(board) = self.get_by_id(id).await? {
                boards.push(board);
            }
        }
        Ok(boards)
    }
}

/// Read a side-record, substituting an empty string when it is missing.
///
/// Missing side-records only arise from partial writes, so they are logged.
pub(super) async fn side_record(store: &dyn KeyValueStore, key: &str) -> Result<String> {
    match store.get(key).await? {
        Some(value) => Ok(value),
        None => {
            warn!("Missing side-record {}", key);
            Ok(String::new())
        }
    }
}
