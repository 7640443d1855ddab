//! Semantic response cache service
//!
//! The core cache protocol: writes fan out to the lookup index and the
//! payload store under one content hash, reads run a similarity search and
//! gate the payload fetch on the policy threshold.
//!
//! Each call is an independent transaction over the two stores; the service
//! holds no state between calls beyond the injected store handles. There is
//! no cross-store transaction: if the index write succeeds and the payload
//! write fails, the orphan index entry stays behind and is detected on a
//! later read as `PayloadMissing`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::cache::{CachePolicy, LookupOutcome, WriteReceipt};
use crate::domain::hash::hash_query;
use crate::domain::lookup::LookupStore;
use crate::domain::payload::{PayloadStore, ResponseRecord};
use crate::domain::DomainError;

/// Orchestrates the two stores behind the cache protocol
pub struct CacheService {
    lookup_store: Arc<dyn LookupStore>,
    payload_store: Arc<dyn PayloadStore>,
    policy: CachePolicy,
}

impl std::fmt::Debug for CacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheService")
            .field("policy", &self.policy)
            .finish()
    }
}

impl CacheService {
    /// Create a service with the default policy
    pub fn new(lookup_store: Arc<dyn LookupStore>, payload_store: Arc<dyn PayloadStore>) -> Self {
        Self::with_policy(lookup_store, payload_store, CachePolicy::default())
    }

    /// Create a service with a custom policy
    pub fn with_policy(
        lookup_store: Arc<dyn LookupStore>,
        payload_store: Arc<dyn PayloadStore>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            lookup_store,
            payload_store,
            policy,
        }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Store a (query, response) pair under the query's content hash.
    ///
    /// The index write is sequenced strictly before the payload write: an
    /// index failure aborts the call before the payload store is touched,
    /// so no payload row can exist without a searchable entry. The converse
    /// orphan (index entry without payload) is possible when the payload
    /// write fails; the index entry is left in place, not rolled back.
    pub async fn store(&self, query: &str, response: &str) -> Result<WriteReceipt, DomainError> {
        let hash = hash_query(query);

        self.lookup_store.index(query, &hash).await?;

        self.payload_store
            .put(ResponseRecord::new(hash.clone(), query, response))
            .await?;

        debug!(query_hash = %hash, "Stored query and response");

        Ok(WriteReceipt::new(hash))
    }

    /// Look up a response for a semantically similar query.
    ///
    /// A miss (empty index or best match at or below the threshold) is a
    /// normal outcome. A similarity match whose payload is absent is a
    /// consistency violation and surfaces as `PayloadMissing`.
    pub async fn lookup(&self, query: &str) -> Result<LookupOutcome, DomainError> {
        let Some(nearest) = self.lookup_store.find_nearest(query).await? else {
            debug!("No indexed query to match against");
            return Ok(LookupOutcome::Miss);
        };

        if !self.policy.is_hit(nearest.similarity) {
            debug!(
                similarity = nearest.similarity,
                threshold = self.policy.similarity_threshold,
                "Best match below similarity threshold"
            );
            return Ok(LookupOutcome::Miss);
        }

        let record = self.payload_store.get(&nearest.query_hash).await?;

        match record {
            Some(record) => {
                debug!(
                    query_hash = %nearest.query_hash,
                    similarity = nearest.similarity,
                    "Semantic cache hit"
                );

                Ok(LookupOutcome::Hit {
                    query: record.query().to_string(),
                    response: record.response().to_string(),
                })
            }
            None => {
                warn!(
                    query_hash = %nearest.query_hash,
                    "Index entry has no payload record; likely a prior partial write"
                );

                Err(DomainError::payload_missing(
                    self.payload_store.store_name(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hash::QueryHash;
    use crate::domain::lookup::{MockLookupStore, NearestQuery};
    use crate::domain::payload::MockPayloadStore;
    use crate::infrastructure::lookup::InMemoryLookupStore;
    use crate::infrastructure::payload::InMemoryPayloadStore;

    fn in_memory_service() -> CacheService {
        CacheService::new(
            Arc::new(InMemoryLookupStore::new()),
            Arc::new(InMemoryPayloadStore::new()),
        )
    }

    #[tokio::test]
    async fn test_write_then_exact_read() {
        let service = in_memory_service();

        let receipt = service
            .store("What is the capital of France?", "Paris")
            .await
            .unwrap();
        let outcome = service
            .lookup("What is the capital of France?")
            .await
            .unwrap();

        assert_eq!(receipt.query_hash, hash_query("What is the capital of France?"));
        assert_eq!(
            outcome,
            LookupOutcome::Hit {
                query: "What is the capital of France?".to_string(),
                response: "Paris".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_empty_index_is_miss() {
        let service = in_memory_service();

        let outcome = service.lookup("anything at all").await.unwrap();

        assert_eq!(outcome, LookupOutcome::Miss);
    }

    #[tokio::test]
    async fn test_similarity_at_threshold_is_miss() {
        let mut lookup = MockLookupStore::new();
        lookup.expect_find_nearest().returning(|_| {
            Ok(Some(NearestQuery::new(hash_query("stored"), 0.75)))
        });

        let mut payload = MockPayloadStore::new();
        payload.expect_get().times(0);

        let service = CacheService::new(Arc::new(lookup), Arc::new(payload));

        let outcome = service.lookup("similar query").await.unwrap();

        assert_eq!(outcome, LookupOutcome::Miss);
    }

    #[tokio::test]
    async fn test_similarity_just_above_threshold_fetches_payload() {
        let hash = hash_query("stored");

        let mut lookup = MockLookupStore::new();
        lookup.expect_find_nearest().returning(|_| {
            Ok(Some(NearestQuery::new(hash_query("stored"), 0.750001)))
        });

        let mut payload = MockPayloadStore::new();
        let expected = hash.clone();
        payload
            .expect_get()
            .withf(move |h| *h == expected)
            .times(1)
            .returning(|h| Ok(Some(ResponseRecord::new(h.clone(), "stored", "answer"))));

        let service = CacheService::new(Arc::new(lookup), Arc::new(payload));

        let outcome = service.lookup("similar query").await.unwrap();

        assert!(outcome.is_hit());
    }

    #[tokio::test]
    async fn test_hit_returns_stored_query_not_input() {
        let mut lookup = MockLookupStore::new();
        lookup.expect_find_nearest().returning(|_| {
            Ok(Some(NearestQuery::new(
                hash_query("What is the capital of France?"),
                0.9,
            )))
        });

        let mut payload = MockPayloadStore::new();
        payload.expect_get().returning(|h| {
            Ok(Some(ResponseRecord::new(
                h.clone(),
                "What is the capital of France?",
                "Paris",
            )))
        });

        let service = CacheService::new(Arc::new(lookup), Arc::new(payload));

        let outcome = service.lookup("capital of France").await.unwrap();

        assert_eq!(
            outcome,
            LookupOutcome::Hit {
                query: "What is the capital of France?".to_string(),
                response: "Paris".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_orphan_index_entry_is_payload_missing() {
        let mut lookup = MockLookupStore::new();
        lookup
            .expect_find_nearest()
            .returning(|_| Ok(Some(NearestQuery::new(hash_query("orphan"), 0.9))));

        let mut payload = MockPayloadStore::new();
        payload.expect_get().returning(|_| Ok(None));
        payload
            .expect_store_name()
            .return_const("PostgreSQL".to_string());

        let service = CacheService::new(Arc::new(lookup), Arc::new(payload));

        let err = service.lookup("orphan").await.unwrap_err();

        assert!(matches!(err, DomainError::PayloadMissing { .. }));
        assert_eq!(err.to_string(), "Response not found in PostgreSQL");
    }

    #[tokio::test]
    async fn test_index_write_failure_skips_payload_write() {
        let mut lookup = MockLookupStore::new();
        lookup
            .expect_index()
            .returning(|_, _| Err(DomainError::index_write("Weaviate", "index down")));

        let mut payload = MockPayloadStore::new();
        payload.expect_put().times(0);

        let service = CacheService::new(Arc::new(lookup), Arc::new(payload));

        let err = service.store("q", "r").await.unwrap_err();

        assert!(matches!(err, DomainError::IndexWrite { .. }));
    }

    #[tokio::test]
    async fn test_payload_write_failure_surfaces_after_index_write() {
        let mut lookup = MockLookupStore::new();
        lookup.expect_index().times(1).returning(|_, _| Ok(()));

        let mut payload = MockPayloadStore::new();
        payload
            .expect_put()
            .returning(|_| Err(DomainError::payload_write("PostgreSQL", "disk full")));

        let service = CacheService::new(Arc::new(lookup), Arc::new(payload));

        let err = service.store("q", "r").await.unwrap_err();

        assert!(matches!(err, DomainError::PayloadWrite { .. }));
    }

    #[tokio::test]
    async fn test_index_read_failure_propagates() {
        let mut lookup = MockLookupStore::new();
        lookup
            .expect_find_nearest()
            .returning(|_| Err(DomainError::index_read("Weaviate", "timeout")));

        let service = CacheService::new(Arc::new(lookup), Arc::new(MockPayloadStore::new()));

        let err = service.lookup("q").await.unwrap_err();

        assert!(matches!(err, DomainError::IndexRead { .. }));
    }

    #[tokio::test]
    async fn test_write_records_both_stores_under_same_hash() {
        let lookup = Arc::new(InMemoryLookupStore::new());
        let payload = Arc::new(InMemoryPayloadStore::new());
        let service = CacheService::new(lookup.clone(), payload.clone());

        let receipt = service.store("some query", "some response").await.unwrap();

        let nearest = lookup.find_nearest("some query").await.unwrap().unwrap();
        let record = payload.get(&receipt.query_hash).await.unwrap().unwrap();

        assert_eq!(nearest.query_hash, receipt.query_hash);
        assert_eq!(record.query_hash(), &receipt.query_hash);
    }

    #[tokio::test]
    async fn test_custom_threshold_policy() {
        let mut lookup = MockLookupStore::new();
        lookup
            .expect_find_nearest()
            .returning(|_| Ok(Some(NearestQuery::new(hash_query("stored"), 0.5))));

        let mut payload = MockPayloadStore::new();
        payload
            .expect_get()
            .returning(|h: &QueryHash| Ok(Some(ResponseRecord::new(h.clone(), "stored", "r"))));

        let service = CacheService::with_policy(
            Arc::new(lookup),
            Arc::new(payload),
            CachePolicy::new().with_similarity_threshold(0.4),
        );

        let outcome = service.lookup("q").await.unwrap();

        assert!(outcome.is_hit());
    }
}
