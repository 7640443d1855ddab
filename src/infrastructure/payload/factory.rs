//! Payload store factory for runtime backend selection

use std::sync::Arc;

use crate::config::{PayloadBackend, PayloadConfig};
use crate::domain::payload::PayloadStore;
use crate::domain::DomainError;

use super::in_memory::InMemoryPayloadStore;
use super::postgres::{PostgresConfig, PostgresPayloadStore};

/// Creates a payload store instance based on the configuration.
///
/// The PostgreSQL backend connects eagerly and bootstraps its table, so a
/// bad connection string fails at startup rather than on the first request.
pub async fn create_payload_store(
    config: &PayloadConfig,
) -> Result<Arc<dyn PayloadStore>, DomainError> {
    match config.backend {
        PayloadBackend::Memory => Ok(Arc::new(InMemoryPayloadStore::new())),
        PayloadBackend::Postgres => {
            let pg_config = PostgresConfig::new(&config.url)
                .with_max_connections(config.max_connections)
                .with_min_connections(config.min_connections)
                .with_connect_timeout(config.connect_timeout_secs)
                .with_idle_timeout(config.idle_timeout_secs);

            let store = PostgresPayloadStore::connect(&pg_config, &config.table_name).await?;
            store.ensure_table().await?;

            Ok(Arc::new(store))
        }
    }
}
