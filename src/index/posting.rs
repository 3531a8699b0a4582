use crate::core::types::DocumentId;

#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    pub doc_id: DocumentId,
    pub term_freq: f32,       // Weighted occurrences of the term in the document
}

/// Posting list for a term
/// Note: Sorted by doc_id so introspection and merging are deterministic
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            postings: Vec::new(),
        }
    }

    /// Insert or replace the posting for `posting.doc_id`
    pub fn add_posting(&mut self, posting: Posting) {
        match self.postings.binary_search_by(|p| p.doc_id.cmp(&posting.doc_id)) {
            Ok(pos) => {
                self.postings[pos] = posting;
            }
            Err(pos) => {
                self.postings.insert(pos, posting);
            }
        }
    }

    pub fn remove(&mut self, doc_id: &str) -> bool {
        match self.postings.binary_search_by(|p| p.doc_id.as_str().cmp(doc_id)) {
            Ok(pos) => {
                self.postings.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn get(&self, doc_id: &str) -> Option<&Posting> {
        self.postings
            .binary_search_by(|p| p.doc_id.as_str().cmp(doc_id))
            .ok()
            .map(|pos| &self.postings[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Posting> {
        self.postings.iter()
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn doc_freq(&self) -> u32 {
        self.postings.len() as u32
    }

    pub fn is_sorted(&self) -> bool {
        self.postings.windows(2).all(|w| w[0].doc_id < w[1].doc_id)
    }
}
