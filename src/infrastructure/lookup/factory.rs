//! Lookup store factory for runtime backend selection

use std::sync::Arc;
use std::time::Duration;

use crate::config::{LookupBackend, LookupConfig};
use crate::domain::lookup::LookupStore;
use crate::domain::DomainError;

use super::http_client::HttpClient;
use super::in_memory::InMemoryLookupStore;
use super::weaviate::WeaviateLookupStore;

/// Creates a lookup store instance based on the configuration
pub fn create_lookup_store(config: &LookupConfig) -> Result<Arc<dyn LookupStore>, DomainError> {
    match config.backend {
        LookupBackend::Memory => Ok(Arc::new(InMemoryLookupStore::new())),
        LookupBackend::Weaviate => {
            let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs));
            let mut store = WeaviateLookupStore::with_base_url(client, &config.base_url)
                .with_class_name(&config.class_name);

            if let Some(ref key) = config.embedding_api_key {
                store = store.with_embedding_api_key(key);
            }

            Ok(Arc::new(store))
        }
    }
}
