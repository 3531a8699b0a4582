use std::collections::BinaryHeap;
use std::cmp::Ordering;
use serde::{Serialize, Deserialize};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocumentId;

/// Outcome of a query that ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    Success,
    EmptyResult,      // Valid query, nothing matched
    IndexNotReady,    // No build has completed yet
}

/// Search results container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub status: SearchStatus,
    pub hits: Vec<ScoredDocument>,   // Score descending, then id ascending
    pub total_hits: usize,           // Matches before truncation
    pub max_score: f32,
}

impl SearchResults {
    pub fn empty() -> Self {
        SearchResults {
            status: SearchStatus::EmptyResult,
            hits: Vec::new(),
            total_hits: 0,
            max_score: 0.0,
        }
    }

    pub fn not_ready() -> Self {
        SearchResults {
            status: SearchStatus::IndexNotReady,
            ..SearchResults::empty()
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Success
    }

    pub fn ids(&self) -> Vec<&str> {
        self.hits.iter().map(|h| h.doc_id.as_str()).collect()
    }

    /// Turn `IndexNotReady` into an error for callers that prefer `?`
    pub fn ensure_ready(self) -> Result<Self> {
        match self.status {
            SearchStatus::IndexNotReady => Err(Error::new(
                ErrorKind::IndexNotReady,
                "index has not completed its first build",
            )),
            _ => Ok(self),
        }
    }
}

/// What a search UI should show for a query outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayHint {
    Results,
    NoResults,
    RetryLater,   // "search temporarily unavailable"
}

impl DisplayHint {
    pub fn for_outcome(outcome: &Result<SearchResults>) -> Self {
        match outcome {
            Ok(results) => match results.status {
                SearchStatus::Success => DisplayHint::Results,
                SearchStatus::EmptyResult => DisplayHint::NoResults,
                SearchStatus::IndexNotReady => DisplayHint::RetryLater,
            },
            Err(err) if err.is(ErrorKind::IndexNotReady) => DisplayHint::RetryLater,
            Err(_) => DisplayHint::NoResults,
        }
    }
}

/// Document with relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub doc_id: DocumentId,
    pub score: f32,
}

impl ScoredDocument {
    pub fn new(doc_id: DocumentId, score: f32) -> Self {
        ScoredDocument { doc_id, score }
    }

    /// Result order: higher score first, ties broken by ascending id
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other.score
            .total_cmp(&self.score)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

// Heap entry ordered so the worst-ranked hit sits on top
struct Ranked(ScoredDocument);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.rank_cmp(&other.0)
    }
}

/// Top-K collector for efficient result collection
pub struct TopKCollector {
    heap: BinaryHeap<Ranked>,
    pub k: usize,
    pub total_collected: usize,  // Track total documents offered
    max_score: f32,
}

impl TopKCollector {
    pub fn new(k: usize) -> Self {
        TopKCollector {
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
            k,
            total_collected: 0,
            max_score: 0.0,
        }
    }

    pub fn collect(&mut self, scored_doc: ScoredDocument) {
        self.total_collected += 1;
        self.max_score = self.max_score.max(scored_doc.score);

        if self.heap.len() < self.k {
            self.heap.push(Ranked(scored_doc));
            return;
        }

        let beats_worst = self.heap
            .peek()
            .is_some_and(|worst| scored_doc.rank_cmp(&worst.0) == Ordering::Less);
        if beats_worst {
            self.heap.pop();
            self.heap.push(Ranked(scored_doc));
        }
    }

    pub fn into_results(self) -> SearchResults {
        if self.total_collected == 0 {
            return SearchResults::empty();
        }

        let total_hits = self.total_collected;
        let max_score = self.max_score;
        let hits = self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|ranked| ranked.0)
            .collect();

        SearchResults {
            status: SearchStatus::Success,
            hits,
            total_hits,
            max_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, score: f32) -> ScoredDocument {
        ScoredDocument::new(DocumentId::from(id), score)
    }

    #[test]
    fn test_keeps_best_k_in_rank_order() {
        let mut collector = TopKCollector::new(3);
        for (id, score) in [("a", 0.1), ("b", 0.9), ("c", 0.5), ("d", 0.7), ("e", 0.2)] {
            collector.collect(doc(id, score));
        }
        let results = collector.into_results();
        assert_eq!(results.ids(), vec!["b", "d", "c"]);
        assert_eq!(results.total_hits, 5);
        assert_eq!(results.max_score, 0.9);
        assert_eq!(results.status, SearchStatus::Success);
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        let mut collector = TopKCollector::new(2);
        for id in ["z", "m", "a", "q"] {
            collector.collect(doc(id, 1.0));
        }
        assert_eq!(collector.into_results().ids(), vec!["a", "m"]);
    }

    #[test]
    fn test_empty_collector_reports_empty_result() {
        let results = TopKCollector::new(5).into_results();
        assert_eq!(results.status, SearchStatus::EmptyResult);
        assert!(results.hits.is_empty());
    }

    #[test]
    fn test_display_hint_degrades_errors() {
        assert_eq!(DisplayHint::for_outcome(&Ok(SearchResults::not_ready())), DisplayHint::RetryLater);
        assert_eq!(DisplayHint::for_outcome(&Ok(SearchResults::empty())), DisplayHint::NoResults);
        let internal: Result<SearchResults> = Err(Error::inconsistency("boom"));
        assert_eq!(DisplayHint::for_outcome(&internal), DisplayHint::NoResults);
        let not_ready = SearchResults::not_ready().ensure_ready();
        assert_eq!(DisplayHint::for_outcome(&not_ready), DisplayHint::RetryLater);
    }
}
