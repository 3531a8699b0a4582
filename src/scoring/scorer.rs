use crate::index::inverted::TermInfo;
use crate::index::posting::Posting;

/// Scorer trait
pub trait Scorer: Send + Sync {
    fn score(&self, posting: &Posting, term_info: &TermInfo, doc_stats: &DocStats) -> f32;

    fn name(&self) -> &str;
}

/// Document statistics for scoring
#[derive(Debug, Clone)]
pub struct DocStats {
    pub weighted_length: f32,   // Total weighted tokens in the document
    pub total_docs: usize,      // Total number of documents
}

/// TF-IDF with length-normalized tf and smoothed idf
///
/// `tf = term_freq / weighted_length`, `idf = ln(1 + N / df)`. The smoothing
/// keeps idf strictly positive even when every document contains the term.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScorer;

impl TfIdfScorer {
    pub fn new() -> Self {
        TfIdfScorer
    }

    pub fn idf(doc_freq: u32, total_docs: usize) -> f32 {
        if doc_freq == 0 || total_docs == 0 {
            return 0.0;
        }
        (1.0 + total_docs as f32 / doc_freq as f32).ln()
    }
}

impl Scorer for TfIdfScorer {
    fn score(&self, posting: &Posting, term_info: &TermInfo, doc_stats: &DocStats) -> f32 {
        if doc_stats.weighted_length <= 0.0 {
            return 0.0;
        }

        let tf = posting.term_freq / doc_stats.weighted_length;
        tf * Self::idf(term_info.doc_freq, doc_stats.total_docs)
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}
