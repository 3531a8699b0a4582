use rayon::prelude::*;
use crate::analysis::analyzer::Analyzer;
use crate::core::types::DocumentItem;
use crate::index::inverted::AnalyzedDocument;

/// Turns submitted documents into `AnalyzedDocument`s
///
/// Small batches are analyzed inline on the calling thread; batches of at
/// least `parallel_threshold` documents fan out over the rayon pool.
/// Output order always matches input order.
#[derive(Debug, Clone)]
pub struct ParallelIndexer {
    pub parallel_threshold: usize,
}

impl ParallelIndexer {
    pub fn new(parallel_threshold: usize) -> Self {
        ParallelIndexer {
            parallel_threshold: parallel_threshold.max(1),
        }
    }

    pub fn analyze_batch(&self, documents: Vec<DocumentItem>, analyzer: &Analyzer) -> Vec<AnalyzedDocument> {
        if documents.len() >= self.parallel_threshold {
            tracing::debug!(
                target: "localdex::indexer",
                documents = documents.len(),
                threads = rayon::current_num_threads(),
                "analyzing batch in parallel"
            );
            documents
                .into_par_iter()
                .map(|doc| AnalyzedDocument::from_fields(doc.id, &doc.fields, analyzer))
                .collect()
        } else {
            documents
                .into_iter()
                .map(|doc| AnalyzedDocument::from_fields(doc.id, &doc.fields, analyzer))
                .collect()
        }
    }
}
