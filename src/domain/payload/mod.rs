//! Payload store domain models and traits
//!
//! The payload store is the durable side of the cache: full response
//! records keyed by the query's content hash.

mod repository;

pub use repository::{PayloadStore, ResponseRecord};

#[cfg(test)]
pub use repository::MockPayloadStore;
