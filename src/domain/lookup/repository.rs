//! Lookup store trait and search result types

use async_trait::async_trait;

use crate::domain::hash::QueryHash;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// The nearest previously indexed query, as reported by a similarity search
#[derive(Debug, Clone, PartialEq)]
pub struct NearestQuery {
    /// Content hash the matching entry was indexed under
    pub query_hash: QueryHash,
    /// Normalized similarity score: 1.0 = identical meaning, 0.0 = unrelated
    pub similarity: f32,
}

impl NearestQuery {
    pub fn new(query_hash: QueryHash, similarity: f32) -> Self {
        Self {
            query_hash,
            similarity,
        }
    }
}

/// Store of indexed query text, searchable by semantic similarity.
///
/// Entries are append-only from the cache's perspective: the protocol never
/// updates or deletes what it has indexed, and the store has no awareness of
/// the payload side.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LookupStore: Send + Sync {
    /// Index query text under its content hash, making it discoverable by
    /// future similarity searches.
    async fn index(&self, text: &str, hash: &QueryHash) -> Result<(), DomainError>;

    /// Find the single closest previously indexed entry, or `None` if the
    /// index has no candidate. Top-1 only; the protocol does no
    /// multi-candidate re-ranking.
    async fn find_nearest(&self, text: &str) -> Result<Option<NearestQuery>, DomainError>;

    /// Name of the underlying index, used in error reporting.
    fn store_name(&self) -> &str;
}
