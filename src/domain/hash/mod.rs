//! Content addressing for query text
//!
//! Queries are joined across the lookup and payload stores by a
//! deterministic digest of their raw text.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest of a query's text, lowercase hex encoded.
///
/// The hash is a pure function of the byte content: identical text always
/// produces the same hash, and distinct text collides only with
/// cryptographically negligible probability. It is the join key between an
/// indexed query and its stored response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryHash(String);

impl QueryHash {
    /// Wrap an already-computed hex digest.
    ///
    /// Used when a hash comes back from a store rather than from
    /// [`hash_query`]; no validation is performed beyond ownership.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash query text into its content address.
pub fn hash_query(text: &str) -> QueryHash {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    QueryHash(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let a = hash_query("What is the capital of France?");
        let b = hash_query("What is the capital of France?");

        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_text_distinct_hash() {
        let a = hash_query("What is the capital of France?");
        let b = hash_query("What is the capital of Spain?");

        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_shape() {
        let hash = hash_query("hello");

        assert_eq!(hash.as_str().len(), 64);
        assert!(hash.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        // known SHA-256 vector for "hello"
        assert_eq!(
            hash.as_str(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_empty_text_hashes() {
        let hash = hash_query("");

        assert_eq!(hash.as_str().len(), 64);
    }

    #[test]
    fn test_from_hex_round_trip() {
        let hash = hash_query("query");
        let restored = QueryHash::from_hex(hash.as_str());

        assert_eq!(hash, restored);
    }
}
