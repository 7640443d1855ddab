//! Lookup store domain models and traits
//!
//! The lookup store is the embedding-indexed side of the cache: query text
//! goes in tagged with its content hash, and comes back out of similarity
//! searches as a hash plus a score.

mod repository;

pub use repository::{LookupStore, NearestQuery};

#[cfg(test)]
pub use repository::MockLookupStore;
