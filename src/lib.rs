pub mod core;
pub mod analysis;
pub mod index;
pub mod scoring;
pub mod search;
pub mod parallel;
pub mod writer;
pub mod engine;

pub use crate::core::config::{AnalyzerConfig, IndexConfig, StemmerLanguage};
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::stats::IndexStats;
pub use crate::core::types::{DocumentId, DocumentItem, Field};
pub use crate::engine::{IndexRegistry, SearchIndex, SharedIndex};
pub use crate::search::results::{DisplayHint, ScoredDocument, SearchResults, SearchStatus};
pub use crate::writer::mutation::{Completion, MutationHandle, MutationKind, MutationReport};

/*
┌──────────────────────────────────── LOCALDEX ARCHITECTURE ────────────────────────────────────┐

  caller thread                                         worker thread (localdex-<name>)
  ─────────────                                         ───────────────────────────────

  IndexRegistry ──► SearchIndex
                     │
                     ├─ add_or_update / delete ──► Job{seq, generation} ──► BackgroundWorker
                     │        (validate, return                              │
                     │         MutationHandle)                               ├─ generation stale? → skip
                     │                                                       └─ ParallelIndexer
                     │                                                            Analyzer (rayon for big batches)
                     │                                                            → AnalyzedDocument
                     │
                     ├─ process_completions / wait / wait_idle ◄── WorkerOutput{seq, generation, Delta}
                     │        settle(): generation == current ? apply : discard
                     │        apply():  InvertedIndex.remove + insert_analyzed
                     │        → Completion into the MutationHandle slot
                     │
                     ├─ clear_index ──► generation += 1, InvertedIndex.clear()
                     │
                     └─ find ──► QueryCache ──► QueryExecutor
                                                  Analyzer (same pipeline as documents)
                                                  InvertedIndex.term() → PostingList
                                                  TfIdfScorer: tf = freq / weighted_len, idf = ln(1 + N/df)
                                                  TopKCollector: score desc, id asc

  InvertedIndex
  ├─ terms:    HashMap<Term, TermEntry{ TermInfo{doc_freq}, PostingList (sorted by id) }>
  └─ registry: DocumentRegistry  HashMap<DocumentId, DocumentEntry{ weighted_length, terms }>

└───────────────────────────────────────────────────────────────────────────────────────────────┘
*/
