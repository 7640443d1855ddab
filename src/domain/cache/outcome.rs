//! Cache call outcomes

use crate::domain::hash::QueryHash;

/// Receipt for a successful write: both stores accepted the entry
#[derive(Debug, Clone, PartialEq)]
pub struct WriteReceipt {
    pub query_hash: QueryHash,
}

impl WriteReceipt {
    pub fn new(query_hash: QueryHash) -> Self {
        Self { query_hash }
    }
}

/// Outcome of a semantic lookup.
///
/// A miss is a normal outcome, not an error: it covers both an empty index
/// and a best match that failed the similarity threshold. Store failures
/// and consistency violations are reported as `DomainError` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// A sufficiently similar query was found and its payload retrieved.
    /// `query` is the stored text, not the caller's input; the two are only
    /// semantically similar.
    Hit { query: String, response: String },
    /// No indexed query was similar enough
    Miss,
}

impl LookupOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}
