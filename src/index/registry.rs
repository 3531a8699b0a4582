use std::collections::HashMap;
use crate::core::types::DocumentId;
use crate::index::inverted::Term;

/// Per-document bookkeeping kept alongside the postings
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEntry {
    pub weighted_length: f32,   // Sum of field weights over every token
    pub terms: Vec<Term>,       // Distinct terms, used to unlink postings on removal
}

/// Document id -> normalization stats
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    docs: HashMap<DocumentId, DocumentEntry>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        DocumentRegistry {
            docs: HashMap::new(),
        }
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.docs.contains_key(doc_id)
    }

    pub fn get(&self, doc_id: &str) -> Option<&DocumentEntry> {
        self.docs.get(doc_id)
    }

    /// Returns false (and leaves the registry untouched) if the id is taken
    pub fn register(&mut self, doc_id: DocumentId, entry: DocumentEntry) -> bool {
        if self.docs.contains_key(&doc_id) {
            return false;
        }
        self.docs.insert(doc_id, entry);
        true
    }

    pub fn unregister(&mut self, doc_id: &str) -> Option<DocumentEntry> {
        self.docs.remove(doc_id)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn clear(&mut self) {
        self.docs.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DocumentId, &DocumentEntry)> {
        self.docs.iter()
    }
}
