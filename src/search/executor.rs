use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use crate::analysis::analyzer::Analyzer;
use crate::core::error::{Error, Result};
use crate::core::types::DocumentId;
use crate::index::inverted::InvertedIndex;
use crate::scoring::scorer::{DocStats, Scorer, TfIdfScorer};
use crate::search::results::{ScoredDocument, SearchResults, TopKCollector};

/// Evaluates free-text queries against one index version
pub struct QueryExecutor {
    pub analyzer: Arc<Analyzer>,
    pub scorer: Box<dyn Scorer>,
}

impl QueryExecutor {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        QueryExecutor {
            analyzer,
            scorer: Box::new(TfIdfScorer::new()),
        }
    }

    /// Score every document sharing a term with `query`
    ///
    /// Query terms missing from the index contribute nothing; a query with
    /// no usable term, or no match at all, yields `EmptyResult`.
    pub fn execute(&self, index: &InvertedIndex, query: &str, limit: usize) -> Result<SearchResults> {
        if limit == 0 {
            return Err(Error::invalid_argument("max_results must be greater than zero"));
        }

        let query_terms: BTreeSet<String> = self.analyzer
            .analyze(query)
            .into_iter()
            .map(|token| token.text)
            .collect();
        if query_terms.is_empty() {
            return Ok(SearchResults::empty());
        }

        let total_docs = index.size();
        let mut scores: HashMap<&DocumentId, f32> = HashMap::new();

        for term in &query_terms {
            let Some(entry) = index.term(term) else {
                continue;
            };

            for posting in entry.postings.iter() {
                let doc = index.document(posting.doc_id.as_str()).ok_or_else(|| {
                    Error::inconsistency(format!(
                        "posting for '{}' references missing document '{}'",
                        term, posting.doc_id
                    ))
                })?;
                let doc_stats = DocStats {
                    weighted_length: doc.weighted_length,
                    total_docs,
                };
                *scores.entry(&posting.doc_id).or_insert(0.0) +=
                    self.scorer.score(posting, &entry.info, &doc_stats);
            }
        }

        let mut collector = TopKCollector::new(limit);
        for (doc_id, score) in scores {
            if score > 0.0 && score.is_finite() {
                collector.collect(ScoredDocument::new(doc_id.clone(), score));
            }
        }

        Ok(collector.into_results())
    }
}
