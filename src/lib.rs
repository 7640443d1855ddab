//! Semantic response cache API
//!
//! Stores (query, response) pairs keyed by a content hash and serves the
//! stored response back for semantically similar queries. Queries are
//! indexed in a vector store for similarity search; responses live in a
//! durable payload store; a similarity threshold decides what counts as a
//! hit.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::lookup::create_lookup_store;
use infrastructure::payload::create_payload_store;
use infrastructure::services::CacheService;

/// Build application state from configuration.
///
/// Store connections are established once here and shared by all in-flight
/// requests; nothing reconfigures them per-request.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let lookup_store = create_lookup_store(&config.lookup)?;
    let payload_store = create_payload_store(&config.payload).await?;

    let cache_service = CacheService::with_policy(
        lookup_store,
        payload_store,
        config.cache.clone(),
    );

    Ok(AppState::new(Arc::new(cache_service)))
}
