//! Lookup store implementations

mod factory;
mod http_client;
mod in_memory;
mod weaviate;

pub use factory::create_lookup_store;
pub use http_client::{HttpClient, HttpClientError, HttpClientTrait};
pub use in_memory::InMemoryLookupStore;
pub use weaviate::WeaviateLookupStore;

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
