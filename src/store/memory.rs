//! In-memory key-value store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{parse_counter, KeyValueStore};
use crate::{CorkboardError, Result};

/// Key-value store backed by a `HashMap` behind an async lock.
///
/// Counters live in the same map as ordinary keys, stored as decimal
/// strings, like Redis `INCR`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held, counters included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn allocate_id(&self, counter: &str) -> Result<i64> {
        let mut entries = self.entries.write().await;
        let current = match entries.get(counter) {
            Some(raw) => parse_counter(counter, raw)?,
            None => 0,
        };
        let next = current.checked_add(1).ok_or_else(|| {
            CorkboardError::Store(format!("counter {counter} is exhausted"))
        })?;
        entries.insert(counter.to_string(), next.to_string());
        Ok(next)
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn put_all(&self, batch: &[(String, String)]) -> Result<()> {
        let mut entries = self.entries.write().await;
        for (key, value) in batch {
            entries.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_allocate_id_starts_at_one() {
        let store = MemoryStore::new();
        assert_eq!(store.allocate_id("last-desk-id").await.unwrap(), 1);
        assert_eq!(store.allocate_id("last-desk-id").await.unwrap(), 2);
        assert_eq!(store.allocate_id("last-desk-id").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_allocate_id_counters_are_independent() {
        let store = MemoryStore::new();
        store.allocate_id("a").await.unwrap();
        store.allocate_id("a").await.unwrap();
        assert_eq!(store.allocate_id("b").await.unwrap(), 1);
        assert_eq!(store.get("a").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_allocate_id_non_integer_counter() {
        let store = MemoryStore::new();
        store.put("counter", "abc").await.unwrap();
        let result = store.allocate_id("counter").await;
        assert!(matches!(result, Err(CorkboardError::Store(_))));
    }

    #[tokio::test]
    async fn test_allocate_id_at_i64_max() {
        let store = MemoryStore::new();
        store
            .put("counter", &(i64::MAX - 1).to_string())
            .await
            .unwrap();

        assert_eq!(store.allocate_id("counter").await.unwrap(), i64::MAX);
        let result = store.allocate_id("counter").await;
        assert!(matches!(result, Err(CorkboardError::Store(_))));
        // Exhausted counter is left at its last value
        assert_eq!(
            store.get("counter").await.unwrap(),
            Some(i64::MAX.to_string())
        );
    }

    #[tokio::test]
    async fn test_allocate_id_out_of_range_counter() {
        let store = MemoryStore::new();
        store.put("counter", "99999999999999999999").await.unwrap();

        let result = store.allocate_id("counter").await;
        assert!(matches!(result, Err(CorkboardError::Store(_))));
    }

    #[tokio::test]
    async fn test_allocate_id_concurrent_unique() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(
                async move { store.allocate_id("c").await.unwrap() },
            ));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            assert!(seen.insert(handle.await.unwrap()));
        }
        assert_eq!(seen.len(), 50);
    }

    #[tokio::test]
    async fn test_put_get_overwrite() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.put("k", "v1").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v1".to_string()));

        store.put("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_put_all() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store
            .put_all(&[
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ])
            .await
            .unwrap();

        assert_eq!(store.get("a").await.unwrap(), Some("1".to_string()));
        assert_eq!(store.get("b").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_scan_prefix() {
        let store = MemoryStore::new();
        store.put("board:1", "one").await.unwrap();
        store.put("board:2", "two").await.unwrap();
        store.put("creator:board:1", "alice").await.unwrap();
        store.put("boardroom", "x").await.unwrap();

        let mut keys = store.scan("board:").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["board:1", "board:2"]);

        assert!(store.scan("comment:").await.unwrap().is_empty());
    }
}
