//! Application state for shared services

use std::sync::Arc;

use crate::domain::{DomainError, LookupOutcome, WriteReceipt};
use crate::infrastructure::services::CacheService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub cache_service: Arc<dyn CacheServiceTrait>,
}

impl AppState {
    pub fn new(cache_service: Arc<dyn CacheServiceTrait>) -> Self {
        Self { cache_service }
    }
}

/// Trait for cache service operations
#[async_trait::async_trait]
pub trait CacheServiceTrait: Send + Sync {
    /// Store a (query, response) pair; returns the receipt with the hash
    async fn store(&self, query: &str, response: &str) -> Result<WriteReceipt, DomainError>;

    /// Look up a response for a semantically similar query
    async fn lookup(&self, query: &str) -> Result<LookupOutcome, DomainError>;
}

#[async_trait::async_trait]
impl CacheServiceTrait for CacheService {
    async fn store(&self, query: &str, response: &str) -> Result<WriteReceipt, DomainError> {
        CacheService::store(self, query, response).await
    }

    async fn lookup(&self, query: &str) -> Result<LookupOutcome, DomainError> {
        CacheService::lookup(self, query).await
    }
}
