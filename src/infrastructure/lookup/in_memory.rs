//! In-memory lookup store implementation

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::hash::QueryHash;
use crate::domain::lookup::{LookupStore, NearestQuery};
use crate::domain::DomainError;

const STORE_NAME: &str = "memory";

/// In-memory lookup store using linear search.
///
/// Suitable for development and tests. Semantic similarity is approximated
/// by token-set overlap (Jaccard) over lowercased alphanumeric tokens:
/// identical token sets score 1.0, disjoint sets 0.0. A real deployment
/// uses the embedding-backed Weaviate store.
#[derive(Debug, Default)]
pub struct InMemoryLookupStore {
    entries: RwLock<Vec<IndexedEntry>>,
}

#[derive(Debug)]
struct IndexedEntry {
    tokens: HashSet<String>,
    query_hash: QueryHash,
}

impl InMemoryLookupStore {
    /// Create a new empty lookup store
    pub fn new() -> Self {
        Self::default()
    }

    fn tokenize(text: &str) -> HashSet<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
        let union = a.union(b).count();

        if union == 0 {
            // both texts tokenize to nothing; treat as identical
            return 1.0;
        }

        let intersection = a.intersection(b).count();
        intersection as f32 / union as f32
    }
}

#[async_trait]
impl LookupStore for InMemoryLookupStore {
    async fn index(&self, text: &str, hash: &QueryHash) -> Result<(), DomainError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| DomainError::index_write(STORE_NAME, e.to_string()))?;

        entries.push(IndexedEntry {
            tokens: Self::tokenize(text),
            query_hash: hash.clone(),
        });

        Ok(())
    }

    async fn find_nearest(&self, text: &str) -> Result<Option<NearestQuery>, DomainError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| DomainError::index_read(STORE_NAME, e.to_string()))?;

        let tokens = Self::tokenize(text);

        let nearest = entries
            .iter()
            .map(|entry| (entry, Self::jaccard(&tokens, &entry.tokens)))
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(entry, similarity)| NearestQuery::new(entry.query_hash.clone(), similarity));

        Ok(nearest)
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
    async fn test_empty_store_has_no_nearest() {
        let store = InMemoryLookupStore::new();

        let nearest = store.find_nearest("anything").await.unwrap();

        assert!(nearest.is_none());
    }

    #[tokio::test]
    async fn test_identical_text_scores_full_similarity() {
        let store = InMemoryLookupStore::new();
        let hash = hash_query("What is the capital of France?");
        store
            .index("What is the capital of France?", &hash)
            .await
            .unwrap();

        let nearest = store
            .find_nearest("What is the capital of France?")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(nearest.query_hash, hash);
        assert!((nearest.similarity - 1.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_unrelated_text_scores_zero() {
        let store = InMemoryLookupStore::new();
        store
            .index("What is the capital of France?", &hash_query("a"))
            .await
            .unwrap();

        let nearest = store.find_nearest("quantum entanglement").await.unwrap().unwrap();

        assert!(nearest.similarity.abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_returns_closest_of_many() {
        let store = InMemoryLookupStore::new();
        let france = hash_query("What is the capital of France?");
        let spain = hash_query("What is the capital of Spain?");
        store
            .index("What is the capital of France?", &france)
            .await
            .unwrap();
        store
            .index("What is the capital of Spain?", &spain)
            .await
            .unwrap();

        let nearest = store
            .find_nearest("the capital of France")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(nearest.query_hash, france);
    }

    #[tokio::test]
    async fn test_tokenization_ignores_case_and_punctuation() {
        let store = InMemoryLookupStore::new();
        let hash = hash_query("What is the capital of France?");
        store
            .index("What is the capital of France?", &hash)
            .await
            .unwrap();

        let nearest = store
            .find_nearest("what IS the capital of france")
            .await
            .unwrap()
            .unwrap();

        assert!((nearest.similarity - 1.0).abs() < f32::EPSILON);
    }
}
