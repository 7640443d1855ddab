//! Cache protocol policy

use serde::{Deserialize, Serialize};

/// Policy constants for the cache protocol.
///
/// The threshold and the duplicate-accumulation write behavior are product
/// tuning knobs rather than invariants, so they are carried as
/// configuration instead of being hard-coded in the protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachePolicy {
    /// Similarity a match must *exceed* to count as a hit (0.0 to 1.0).
    /// The comparison is strict: a score exactly at the threshold is a miss.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
}

fn default_similarity_threshold() -> f32 {
    0.75
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

impl CachePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold, clamped to [0.0, 1.0]
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Whether a reported similarity counts as a hit under this policy
    pub fn is_hit(&self, similarity: f32) -> bool {
        similarity > self.similarity_threshold
    }
}
