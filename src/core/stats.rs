use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

/// Point-in-time statistics for one search index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub name: String,

    // Applied version
    pub document_count: usize,
    pub term_count: usize,
    pub generation: u64,
    pub ready: bool,
    pub last_applied_at: Option<DateTime<Utc>>,

    // Mutation pipeline
    pub pending_mutations: usize,
    pub applied_mutations: u64,
    pub discarded_mutations: u64,
    pub skipped_documents: u64,

    // Query cache
    pub cache_hits: usize,
    pub cache_misses: usize,
}

impl IndexStats {
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}
