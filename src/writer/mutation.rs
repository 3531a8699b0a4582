use crossbeam::channel::{Receiver, TryRecvError};
use serde::{Serialize, Deserialize};
use crate::core::types::{DocumentId, DocumentItem};
use crate::index::inverted::AnalyzedDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationKind {
    AddOrUpdate,
    Delete,
}

/// Work item shipped to the background worker
#[derive(Debug)]
pub(crate) struct Job {
    pub sequence: u64,
    pub generation: u64,   // Generation current when the job was submitted
    pub payload: JobPayload,
}

#[derive(Debug)]
pub(crate) enum JobPayload {
    AddOrUpdate(Vec<DocumentItem>),
    Delete(Vec<DocumentId>),
}

/// What the worker hands back for one job
#[derive(Debug)]
pub(crate) struct WorkerOutput {
    pub sequence: u64,
    pub generation: u64,
    pub delta: Option<Delta>,   // None when the worker saw the job was already stale
}

#[derive(Debug)]
pub(crate) enum Delta {
    AddOrUpdate(Vec<AnalyzedDocument>),
    Delete(Vec<DocumentId>),
}

/// Counts from a mutation that reached the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationReport {
    pub sequence: u64,
    pub generation: u64,
    pub inserted: usize,         // New documents
    pub replaced: usize,         // Existing documents rewritten
    pub removed: usize,          // Documents deleted
    pub skipped: usize,          // Documents rejected during indexing
    pub document_count: usize,   // Index size right after applying
}

/// Final state of a submitted mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    Applied(MutationReport),
    Discarded { sequence: u64, generation: u64 },   // Invalidated by a clear
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied(_))
    }

    pub fn report(&self) -> Option<&MutationReport> {
        match self {
            Completion::Applied(report) => Some(report),
            Completion::Discarded { .. } => None,
        }
    }

    /// Documents removed by a delete; 0 for discarded mutations
    pub fn removed(&self) -> usize {
        self.report().map(|r| r.removed).unwrap_or(0)
    }
}

/// Returned by every submission; receives the `Completion` once the owning
/// `SearchIndex` has applied or discarded the mutation.
#[derive(Debug)]
pub struct MutationHandle {
    index_id: u64,   // Issuing SearchIndex instance
    sequence: u64,
    generation: u64,
    kind: MutationKind,
    slot: Receiver<Completion>,
    completion: Option<Completion>,
}

impl MutationHandle {
    pub(crate) fn new(
        index_id: u64,
        sequence: u64,
        generation: u64,
        kind: MutationKind,
        slot: Receiver<Completion>,
    ) -> Self {
        MutationHandle {
            index_id,
            sequence,
            generation,
            kind,
            slot,
            completion: None,
        }
    }

    pub(crate) fn index_id(&self) -> u64 {
        self.index_id
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    /// Non-blocking check for the completion
    pub fn poll(&mut self) -> Option<&Completion> {
        if self.completion.is_none() {
            match self.slot.try_recv() {
                Ok(completion) => self.completion = Some(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {}
            }
        }
        self.completion.as_ref()
    }

    pub fn is_complete(&mut self) -> bool {
        self.poll().is_some()
    }
}
