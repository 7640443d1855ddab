//! Payload store trait and the response record entity

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::hash::QueryHash;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// A stored (query, response) pair, keyed by the query's content hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    query_hash: QueryHash,
    query: String,
    response: String,
    created_at: DateTime<Utc>,
}

impl ResponseRecord {
    /// Create a record stamped with the current time
    pub fn new(
        query_hash: QueryHash,
        query: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self::with_created_at(query_hash, query, response, Utc::now())
    }

    /// Create a record with an explicit creation time
    pub fn with_created_at(
        query_hash: QueryHash,
        query: impl Into<String>,
        response: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            query_hash,
            query: query.into(),
            response: response.into(),
            created_at,
        }
    }

    pub fn query_hash(&self) -> &QueryHash {
        &self.query_hash
    }

    /// The original query text this response was stored against
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Store of response records, fetched by content hash.
///
/// Writes are plain inserts: records with the same hash accumulate, and
/// reads return the first match (oldest record wins). The store has no
/// awareness of the lookup index; the cache protocol owns the invariant
/// linking the two.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PayloadStore: Send + Sync {
    /// Insert a record. Duplicate hashes are allowed to accumulate.
    async fn put(&self, record: ResponseRecord) -> Result<(), DomainError>;

    /// Fetch the first record stored under `hash`, or `None` if absent.
    /// Absence is not an error.
    async fn get(&self, hash: &QueryHash) -> Result<Option<ResponseRecord>, DomainError>;

    /// Name of the underlying store, used in error reporting.
    fn store_name(&self) -> &str;
}
