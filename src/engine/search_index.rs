use std::collections::{BTreeSet, HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use chrono::{DateTime, Utc};
use crossbeam::channel::{bounded, Sender};
use crate::analysis::analyzer::Analyzer;
use crate::core::config::IndexConfig;
use crate::core::error::{Error, Result};
use crate::core::stats::IndexStats;
use crate::core::types::{DocumentId, DocumentItem};
use crate::index::inverted::InvertedIndex;
use crate::parallel::indexer::ParallelIndexer;
use crate::search::cache::{QueryCache, QueryKey};
use crate::search::executor::QueryExecutor;
use crate::search::results::SearchResults;
use crate::writer::mutation::{
    Completion, Delta, Job, JobPayload, MutationHandle, MutationKind, MutationReport, WorkerOutput,
};
use crate::writer::worker::BackgroundWorker;

static NEXT_INDEX_ID: AtomicU64 = AtomicU64::new(1);

struct PendingMutation {
    sequence: u64,
    slot: Sender<Completion>,
}

#[derive(Debug, Default)]
struct Counters {
    applied: u64,
    discarded: u64,
    skipped_documents: u64,
}

/// Embedded full-text index with background indexing
///
/// All calls come from one owner. `add_or_update` and `delete` validate,
/// queue work for the background worker and return at once. The worker's
/// results are applied, in submission order, when the owner pumps them with
/// [`process_completions`](Self::process_completions),
/// [`wait`](Self::wait) or [`wait_idle`](Self::wait_idle); only then do
/// `find` and `size` observe them. Both always read the same applied
/// version.
///
/// Only tokenization and term counting run on the worker. Linking the
/// resulting postings happens on the owner's thread while pumping and costs
/// O(distinct terms) per document.
///
/// `clear_index` empties the index immediately and bumps the generation;
/// anything submitted before it is discarded when it comes back.
pub struct SearchIndex {
    id: u64,
    name: String,
    config: IndexConfig,
    index: InvertedIndex,
    executor: QueryExecutor,
    cache: QueryCache,
    worker: BackgroundWorker,
    generation: Arc<AtomicU64>,
    next_sequence: u64,
    pending: VecDeque<PendingMutation>,
    ready: bool,
    counters: Counters,
    last_applied_at: Option<DateTime<Utc>>,
}

impl SearchIndex {
    pub fn new(name: impl Into<String>, config: IndexConfig) -> Result<Self> {
        let name = name.into();
        config.validate()?;

        let analyzer = Arc::new(Analyzer::from_config(&config.analyzer));
        let generation = Arc::new(AtomicU64::new(0));
        let worker = BackgroundWorker::spawn(
            &name,
            analyzer.clone(),
            ParallelIndexer::new(config.parallel_batch_threshold),
            generation.clone(),
        )?;

        tracing::info!(
            target: "localdex::index",
            index = %name,
            pipeline = ?analyzer.pipeline(),
            "search index created"
        );

        Ok(SearchIndex {
            id: NEXT_INDEX_ID.fetch_add(1, Ordering::Relaxed),
            executor: QueryExecutor::new(analyzer),
            cache: QueryCache::new(config.query_cache_capacity),
            index: InvertedIndex::new(),
            worker,
            generation,
            next_sequence: 0,
            pending: VecDeque::new(),
            ready: false,
            counters: Counters::default(),
            last_applied_at: None,
            name,
            config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Queue documents for (re)indexing
    ///
    /// Rejects the whole call with `InvalidArgument` on an empty id, an id
    /// repeated within `items`, or a weight that is not finite and positive.
    /// An existing document with the same id is replaced wholesale.
    pub fn add_or_update(&mut self, items: Vec<DocumentItem>) -> Result<MutationHandle> {
        Self::validate_items(&items)?;
        self.submit(MutationKind::AddOrUpdate, JobPayload::AddOrUpdate(items))
    }

    /// Queue removal of `ids`; unknown ids are ignored
    ///
    /// The number of documents actually removed is reported through the
    /// handle's completion.
    pub fn delete<I, T>(&mut self, ids: I) -> Result<MutationHandle>
    where
        I: IntoIterator<Item = T>,
        T: Into<DocumentId>,
    {
        let ids: BTreeSet<DocumentId> = ids.into_iter().map(Into::into).collect();
        self.submit(MutationKind::Delete, JobPayload::Delete(ids.into_iter().collect()))
    }

    /// Rank documents against `query` using the latest applied version
    pub fn find(&self, query: &str, max_results: usize) -> Result<SearchResults> {
        if max_results == 0 {
            return Err(Error::invalid_argument("max_results must be greater than zero"));
        }
        if !self.ready {
            return Ok(SearchResults::not_ready());
        }

        let key = QueryKey::new(query, max_results);
        if let Some(results) = self.cache.get(&key) {
            return Ok(results);
        }

        let results = self.executor.execute(&self.index, query, max_results)?;
        self.cache.put(key, results.clone());
        Ok(results)
    }

    /// Empty the index now and invalidate everything submitted before
    pub fn clear_index(&mut self) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let dropped = self.index.size();
        self.index.clear();
        self.cache.clear();
        self.ready = true;

        tracing::info!(
            target: "localdex::index",
            index = %self.name,
            generation,
            dropped_documents = dropped,
            invalidated_mutations = self.pending.len(),
            "index cleared"
        );
    }

    /// Document count of the latest applied version
    pub fn size(&self) -> usize {
        self.index.size()
    }

    /// Postings of one already-normalized term, ascending by document id
    pub fn find_term_for_testing(&self, term: &str) -> Vec<(DocumentId, f32)> {
        self.index.postings_for(term)
    }

    /// Apply every background result that has already arrived
    ///
    /// Never blocks. Returns how many mutations were settled.
    pub fn process_completions(&mut self) -> Result<usize> {
        let mut settled = 0;
        while !self.pending.is_empty() {
            match self.worker.try_next()? {
                Some(output) => {
                    self.settle(output)?;
                    settled += 1;
                }
                None => break,
            }
        }
        Ok(settled)
    }

    /// Block until `handle`'s mutation has been applied or discarded
    pub fn wait(&mut self, handle: &mut MutationHandle) -> Result<Completion> {
        if handle.index_id() != self.id {
            return Err(Error::invalid_argument(format!(
                "mutation {} was not issued by index '{}'",
                handle.sequence(),
                self.name
            )));
        }

        loop {
            if let Some(completion) = handle.poll() {
                return Ok(completion.clone());
            }
            if !self.pending.iter().any(|p| p.sequence == handle.sequence()) {
                return Err(Error::invalid_argument(format!(
                    "mutation {} is not pending on index '{}'",
                    handle.sequence(),
                    self.name
                )));
            }
            let output = self.worker.next_blocking()?;
            self.settle(output)?;
        }
    }

    /// Block until every submitted mutation has settled
    pub fn wait_idle(&mut self) -> Result<()> {
        while !self.pending.is_empty() {
            let output = self.worker.next_blocking()?;
            self.settle(output)?;
        }
        Ok(())
    }

    /// Mutations submitted but not yet applied or discarded
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Whether a first build (or a clear) has completed
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn stats(&self) -> IndexStats {
        let cache = self.cache.stats();
        IndexStats {
            name: self.name.clone(),
            document_count: self.index.size(),
            term_count: self.index.term_count(),
            generation: self.generation(),
            ready: self.ready,
            last_applied_at: self.last_applied_at,
            pending_mutations: self.pending.len(),
            applied_mutations: self.counters.applied,
            discarded_mutations: self.counters.discarded,
            skipped_documents: self.counters.skipped_documents,
            cache_hits: cache.hit_count,
            cache_misses: cache.miss_count,
        }
    }

    fn validate_items(items: &[DocumentItem]) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
        for item in items {
            if item.id.is_empty() {
                return Err(Error::invalid_argument("document id must not be empty"));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(Error::invalid_argument(format!(
                    "document id '{}' appears more than once in one call",
                    item.id
                )));
            }
            for field in &item.fields {
                if !(field.weight.is_finite() && field.weight > 0.0) {
                    return Err(Error::invalid_argument(format!(
                        "field '{}' of document '{}' has weight {}; weights must be finite and positive",
                        field.tag, item.id, field.weight
                    )));
                }
            }
        }
        Ok(())
    }

    fn submit(&mut self, kind: MutationKind, payload: JobPayload) -> Result<MutationHandle> {
        let sequence = self.next_sequence + 1;
        let generation = self.generation();

        self.worker.submit(Job {
            sequence,
            generation,
            payload,
        })?;
        self.next_sequence = sequence;

        let (slot, receiver) = bounded(1);
        self.pending.push_back(PendingMutation { sequence, slot });

        tracing::trace!(
            target: "localdex::index",
            index = %self.name,
            sequence,
            generation,
            kind = ?kind,
            "mutation queued"
        );

        Ok(MutationHandle::new(self.id, sequence, generation, kind, receiver))
    }

    /// Apply or discard one worker output; the completion signal for its handle
    fn settle(&mut self, output: WorkerOutput) -> Result<()> {
        let pending = match self.pending.pop_front() {
            Some(pending) if pending.sequence == output.sequence => pending,
            other => {
                let expected = other.map(|p| p.sequence);
                tracing::error!(
                    target: "localdex::index",
                    index = %self.name,
                    expected = ?expected,
                    received = output.sequence,
                    "worker output out of order"
                );
                return Err(Error::inconsistency(format!(
                    "worker delivered mutation {} while {:?} was expected",
                    output.sequence, expected
                )));
            }
        };

        let current = self.generation();
        let completion = match output.delta {
            Some(delta) if output.generation == current => {
                Completion::Applied(self.apply(output.sequence, output.generation, delta))
            }
            _ => {
                self.counters.discarded += 1;
                tracing::debug!(
                    target: "localdex::index",
                    index = %self.name,
                    sequence = output.sequence,
                    generation = output.generation,
                    current,
                    "discarding stale mutation"
                );
                Completion::Discarded {
                    sequence: output.sequence,
                    generation: output.generation,
                }
            }
        };

        // The handle may have been dropped; nobody is waiting then
        let _ = pending.slot.send(completion);
        Ok(())
    }

    fn apply(&mut self, sequence: u64, generation: u64, delta: Delta) -> MutationReport {
        let mut report = MutationReport {
            sequence,
            generation,
            inserted: 0,
            replaced: 0,
            removed: 0,
            skipped: 0,
            document_count: 0,
        };

        match delta {
            Delta::AddOrUpdate(docs) => {
                for doc in docs {
                    if let Err(e) = doc.validate() {
                        report.skipped += 1;
                        tracing::warn!(
                            target: "localdex::index",
                            index = %self.name,
                            document = %doc.id,
                            error = %e,
                            "skipping document"
                        );
                        continue;
                    }

                    let replaced = self.index.remove(doc.id.as_str());
                    let doc_id = doc.id.clone();
                    match self.index.insert_analyzed(doc) {
                        Ok(()) if replaced => report.replaced += 1,
                        Ok(()) => report.inserted += 1,
                        Err(e) => {
                            report.skipped += 1;
                            tracing::warn!(
                                target: "localdex::index",
                                index = %self.name,
                                document = %doc_id,
                                error = %e,
                                "skipping document"
                            );
                        }
                    }
                }
            }
            Delta::Delete(ids) => {
                report.removed = ids
                    .iter()
                    .filter(|id| self.index.remove(id.as_str()))
                    .count();
            }
        }

        report.document_count = self.index.size();
        self.counters.applied += 1;
        self.counters.skipped_documents += report.skipped as u64;
        self.last_applied_at = Some(Utc::now());
        self.ready = true;
        self.cache.clear();

        #[cfg(debug_assertions)]
        self.verify_consistency();

        tracing::debug!(
            target: "localdex::index",
            index = %self.name,
            sequence,
            inserted = report.inserted,
            replaced = report.replaced,
            removed = report.removed,
            skipped = report.skipped,
            documents = report.document_count,
            "mutation applied"
        );

        report
    }

    #[cfg(debug_assertions)]
    fn verify_consistency(&self) {
        if let Err(e) = self.index.check_consistency() {
            tracing::error!(target: "localdex::index", index = %self.name, error = %e, "index invariant violated");
            debug_assert!(false, "index invariant violated: {}", e);
        }
    }
}

impl Drop for SearchIndex {
    fn drop(&mut self) {
        // Mark every queued job stale so the worker drains without analyzing
        self.generation.fetch_add(1, Ordering::AcqRel);
        tracing::debug!(
            target: "localdex::index",
            index = %self.name,
            abandoned_mutations = self.pending.len(),
            "search index dropped"
        );
    }
}
