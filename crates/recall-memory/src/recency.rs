use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use recall_core::{MemoryEntry, MemoryError, MemoryStore, Result};

/// Fixed-capacity ordered log of turns: append-only with oldest-eviction.
///
/// Keys are turn roles (`"user"` / `"assistant"` / `"system"`). `query`
/// ignores the query text and returns the newest `top_k` entries in
/// chronological order. Clones share the underlying buffer.
pub struct RecencyBuffer {
    entries: Arc<RwLock<VecDeque<MemoryEntry>>>,
    capacity: usize,
}

impl RecencyBuffer {
    /// Creates a buffer holding at most `capacity` entries.
    ///
    /// A zero capacity can never hold an entry and is rejected at
    /// construction.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MemoryError::InvalidCapacity(capacity));
        }
        Ok(Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Clone for RecencyBuffer {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            capacity: self.capacity,
        }
    }
}

#[async_trait]
impl MemoryStore for RecencyBuffer {
    async fn add(&self, entry: MemoryEntry) -> Result<()> {
        let mut entries = self.entries.write();
        while entries.len() >= self.capacity {
            let evicted = entries.pop_front();
            if let Some(evicted) = evicted {
                tracing::debug!(key = %evicted.key, "recency buffer full, evicting oldest entry");
            }
        }
        entries.push_back(entry);
        Ok(())
    }

    async fn query(&self, _query: &str, top_k: usize) -> Result<Vec<MemoryEntry>> {
        let entries = self.entries.read();
        let start = entries.len().saturating_sub(top_k);
        Ok(entries.iter().skip(start).cloned().collect())
    }

    async fn remove_oldest(&self, count: usize) -> Result<Vec<MemoryEntry>> {
        let mut entries = self.entries.write();
        let count = count.min(entries.len());
        Ok(entries.drain(..count).collect())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            RecencyBuffer::new(0),
            Err(MemoryError::InvalidCapacity(0))
        ));
    }

    #[tokio::test]
    async fn test_add_and_query() {
        let buffer = RecencyBuffer::new(10).unwrap();

        buffer.add(MemoryEntry::user("hello")).await.unwrap();
        buffer.add(MemoryEntry::assistant("hi")).await.unwrap();

        let entries = buffer.query("", 5).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "hello");
        assert_eq!(entries[1].content, "hi");
    }

    #[tokio::test]
    async fn test_overflow_evicts_oldest_first() {
        let buffer = RecencyBuffer::new(3).unwrap();

        for i in 0..5 {
            buffer
                .add(MemoryEntry::user(format!("msg{}", i)))
                .await
                .unwrap();
        }

        let entries = buffer.query("", 10).await.unwrap();
        assert_eq!(buffer.len(), 3);
        assert_eq!(entries[0].content, "msg2");
        assert_eq!(entries[1].content, "msg3");
        assert_eq!(entries[2].content, "msg4");
    }

    #[tokio::test]
    async fn test_query_returns_newest_window_oldest_first() {
        let buffer = RecencyBuffer::new(10).unwrap();
        for i in 0..6 {
            buffer
                .add(MemoryEntry::user(format!("msg{}", i)))
                .await
                .unwrap();
        }

        let entries = buffer.query("ignored", 2).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "msg4");
        assert_eq!(entries[1].content, "msg5");
    }

    #[tokio::test]
    async fn test_query_is_idempotent() {
        let buffer = RecencyBuffer::new(5).unwrap();
        for i in 0..3 {
            buffer
                .add(MemoryEntry::user(format!("msg{}", i)))
                .await
                .unwrap();
        }

        let first = buffer.query("", 2).await.unwrap();
        let second = buffer.query("", 2).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(buffer.len(), 3);
    }

    #[tokio::test]
    async fn test_query_zero_and_empty() {
        let buffer = RecencyBuffer::new(5).unwrap();
        assert!(buffer.query("", 5).await.unwrap().is_empty());

        buffer.add(MemoryEntry::user("hello")).await.unwrap();
        assert!(buffer.query("", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_oldest() {
        let buffer = RecencyBuffer::new(10).unwrap();
        for i in 0..5 {
            buffer
                .add(MemoryEntry::user(format!("msg{}", i)))
                .await
                .unwrap();
        }

        let removed = buffer.remove_oldest(2).await.unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].content, "msg0");
        assert_eq!(removed[1].content, "msg1");

        let remaining = buffer.query("", 10).await.unwrap();
        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining[0].content, "msg2");
    }

    #[tokio::test]
    async fn test_remove_oldest_beyond_len() {
        let buffer = RecencyBuffer::new(5).unwrap();
        buffer.add(MemoryEntry::user("only")).await.unwrap();

        let removed = buffer.remove_oldest(10).await.unwrap();
        assert_eq!(removed.len(), 1);
        assert!(buffer.is_empty());
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let buffer = RecencyBuffer::new(5).unwrap();
        let other = buffer.clone();

        buffer.add(MemoryEntry::user("shared")).await.unwrap();

        let entries = other.query("", 5).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "shared");
    }

    #[tokio::test]
    async fn test_clear() {
        let buffer = RecencyBuffer::new(5).unwrap();
        buffer.add(MemoryEntry::user("x")).await.unwrap();
        buffer.clear().await.unwrap();
        assert!(buffer.is_empty());
    }
}
