//! In-memory payload store implementation

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::hash::QueryHash;
use crate::domain::payload::{PayloadStore, ResponseRecord};
use crate::domain::DomainError;

const STORE_NAME: &str = "memory";

/// Thread-safe in-memory payload store.
///
/// Useful for testing and development. Data is lost when the process
/// terminates. Mirrors the durable store's semantics: appends only, first
/// match wins on read.
#[derive(Debug, Default)]
pub struct InMemoryPayloadStore {
    records: RwLock<Vec<ResponseRecord>>,
}

impl InMemoryPayloadStore {
    /// Creates a new empty payload store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with records
    pub fn with_records(records: Vec<ResponseRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of stored records, duplicates included
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PayloadStore for InMemoryPayloadStore {
    async fn put(&self, record: ResponseRecord) -> Result<(), DomainError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| DomainError::payload_write(STORE_NAME, e.to_string()))?;

        records.push(record);

        Ok(())
    }

    async fn get(&self, hash: &QueryHash) -> Result<Option<ResponseRecord>, DomainError> {
        let records = self
            .records
            .read()
            .map_err(|e| DomainError::payload_read(STORE_NAME, e.to_string()))?;

        Ok(records
            .iter()
            .find(|record| record.query_hash() == hash)
            .cloned())
    }

    fn store_name(&self) -> &str {
        STORE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hash::hash_query;

    #[tokio::test]
    async fn test_get_missing_hash_is_none() {
        let store = InMemoryPayloadStore::new();

        let record = store.get(&hash_query("absent")).await.unwrap();

        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryPayloadStore::new();
        let hash = hash_query("What is the capital of France?");
        store
            .put(ResponseRecord::new(
                hash.clone(),
                "What is the capital of France?",
                "Paris",
            ))
            .await
            .unwrap();

        let record = store.get(&hash).await.unwrap().unwrap();

        assert_eq!(record.query(), "What is the capital of France?");
        assert_eq!(record.response(), "Paris");
    }

    #[tokio::test]
    async fn test_duplicate_hashes_accumulate_first_match_wins() {
        let store = InMemoryPayloadStore::new();
        let hash = hash_query("q");
        store
            .put(ResponseRecord::new(hash.clone(), "q", "first"))
            .await
            .unwrap();
        store
            .put(ResponseRecord::new(hash.clone(), "q", "second"))
            .await
            .unwrap();

        let record = store.get(&hash).await.unwrap().unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(record.response(), "first");
    }
}
