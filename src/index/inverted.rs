use std::borrow::Borrow;
use std::collections::HashMap;
use crate::analysis::analyzer::Analyzer;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocumentId, Field};
use crate::index::posting::{Posting, PostingList};
use crate::index::registry::{DocumentEntry, DocumentRegistry};

/// Term representation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term(String);

impl Term {
    pub fn new(text: &str) -> Self {
        Term(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Term {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Term statistics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TermInfo {
    pub doc_freq: u32,        // Number of documents containing term
}

/// Postings plus the cached statistics for one term
#[derive(Debug, Clone, Default)]
pub struct TermEntry {
    pub info: TermInfo,
    pub postings: PostingList,
}

/// A document reduced to weighted term counts, ready to be linked in
///
/// Building this is the expensive part of indexing, so it happens on the
/// background worker; linking it into the index is proportional to the
/// number of distinct terms.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedDocument {
    pub id: DocumentId,
    pub term_freqs: Vec<(Term, f32)>,   // Sorted by term, one entry per distinct term
    pub weighted_length: f32,
}

impl AnalyzedDocument {
    pub fn from_fields(id: DocumentId, fields: &[Field], analyzer: &Analyzer) -> Self {
        let mut weights: HashMap<String, f32> = HashMap::new();
        let mut weighted_length = 0.0f32;

        for field in fields {
            for token in analyzer.analyze(&field.text) {
                *weights.entry(token.text).or_insert(0.0) += field.weight;
                weighted_length += field.weight;
            }
        }

        let mut term_freqs: Vec<(Term, f32)> = weights
            .into_iter()
            .map(|(text, weight)| (Term(text), weight))
            .collect();
        term_freqs.sort_by(|a, b| a.0.cmp(&b.0));

        AnalyzedDocument {
            id,
            term_freqs,
            weighted_length,
        }
    }

    /// Reject documents whose weighted counts overflowed
    pub fn validate(&self) -> Result<()> {
        if !self.weighted_length.is_finite() || self.term_freqs.iter().any(|(_, w)| !w.is_finite()) {
            return Err(Error::invalid_argument(format!(
                "document '{}' has a non-finite weighted length",
                self.id
            )));
        }
        Ok(())
    }
}

/// Inverted index structure
///
/// Plain data, no locking: the owning `SearchIndex` guarantees a single
/// accessor at a time.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    terms: HashMap<Term, TermEntry>,
    registry: DocumentRegistry,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            terms: HashMap::new(),
            registry: DocumentRegistry::new(),
        }
    }

    /// Analyze `fields` and add the document
    ///
    /// Fails with `InvalidArgument` if the id is already indexed; callers
    /// replacing a document remove it first.
    pub fn insert(&mut self, doc_id: DocumentId, fields: &[Field], analyzer: &Analyzer) -> Result<()> {
        if self.registry.contains(doc_id.as_str()) {
            return Err(Self::duplicate(&doc_id));
        }
        self.insert_analyzed(AnalyzedDocument::from_fields(doc_id, fields, analyzer))
    }

    pub fn insert_analyzed(&mut self, doc: AnalyzedDocument) -> Result<()> {
        doc.validate()?;
        if self.registry.contains(doc.id.as_str()) {
            return Err(Self::duplicate(&doc.id));
        }

        let mut terms = Vec::with_capacity(doc.term_freqs.len());
        for (term, term_freq) in doc.term_freqs {
            let entry = self.terms.entry(term.clone()).or_default();
            entry.postings.add_posting(Posting {
                doc_id: doc.id.clone(),
                term_freq,
            });
            entry.info.doc_freq = entry.postings.doc_freq();
            terms.push(term);
        }

        self.registry.register(doc.id, DocumentEntry {
            weighted_length: doc.weighted_length,
            terms,
        });

        Ok(())
    }

    /// Unlink every posting of `doc_id`; returns whether it was indexed
    pub fn remove(&mut self, doc_id: &str) -> bool {
        let Some(entry) = self.registry.unregister(doc_id) else {
            return false;
        };

        for term in entry.terms {
            let now_empty = match self.terms.get_mut(&term) {
                Some(term_entry) => {
                    term_entry.postings.remove(doc_id);
                    term_entry.info.doc_freq = term_entry.postings.doc_freq();
                    term_entry.postings.is_empty()
                }
                None => false,
            };

            if now_empty {
                self.terms.remove(&term);
            }
        }

        true
    }

    pub fn clear(&mut self) {
        self.terms.clear();
        self.registry.clear();
    }

    /// Number of indexed documents
    pub fn size(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.registry.contains(doc_id)
    }

    pub fn document(&self, doc_id: &str) -> Option<&DocumentEntry> {
        self.registry.get(doc_id)
    }

    pub fn term(&self, term: &str) -> Option<&TermEntry> {
        self.terms.get(term)
    }

    pub fn doc_freq(&self, term: &str) -> u32 {
        self.terms.get(term).map(|e| e.info.doc_freq).unwrap_or(0)
    }

    /// `(document_id, raw_term_frequency)` for `term`, ascending by id
    pub fn postings_for(&self, term: &str) -> Vec<(DocumentId, f32)> {
        self.terms
            .get(term)
            .map(|entry| {
                entry.postings
                    .iter()
                    .map(|p| (p.doc_id.clone(), p.term_freq))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Verify the structural invariants; cost is linear in the index size
    pub fn check_consistency(&self) -> Result<()> {
        let mut postings_per_doc: HashMap<&str, usize> = HashMap::new();

        for (term, entry) in &self.terms {
            if entry.postings.is_empty() {
                return Err(Error::inconsistency(format!("term '{}' has no postings", term.as_str())));
            }
            if entry.info.doc_freq != entry.postings.doc_freq() {
                return Err(Error::inconsistency(format!(
                    "term '{}' caches doc_freq {} but holds {} postings",
                    term.as_str(),
                    entry.info.doc_freq,
                    entry.postings.len()
                )));
            }
            if !entry.postings.is_sorted() {
                return Err(Error::inconsistency(format!("postings of '{}' are out of order", term.as_str())));
            }
            for posting in entry.postings.iter() {
                if !self.registry.contains(posting.doc_id.as_str()) {
                    return Err(Error::inconsistency(format!(
                        "term '{}' references unregistered document '{}'",
                        term.as_str(),
                        posting.doc_id
                    )));
                }
                *postings_per_doc.entry(posting.doc_id.as_str()).or_insert(0) += 1;
            }
        }

        for (doc_id, entry) in self.registry.iter() {
            let linked = postings_per_doc.get(doc_id.as_str()).copied().unwrap_or(0);
            if linked != entry.terms.len() {
                return Err(Error::inconsistency(format!(
                    "document '{}' lists {} terms but is linked from {}",
                    doc_id,
                    entry.terms.len(),
                    linked
                )));
            }
        }

        Ok(())
    }

    fn duplicate(doc_id: &DocumentId) -> Error {
        Error::new(
            ErrorKind::InvalidArgument,
            format!("document '{}' is already indexed; remove it before inserting", doc_id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_text(index: &mut InvertedIndex, analyzer: &Analyzer, id: &str, text: &str) {
        index.insert(DocumentId::from(id), &[Field::text("body", text)], analyzer).unwrap();
    }

    #[test]
    fn test_insert_builds_postings_and_registry() {
        let analyzer = Analyzer::default();
        let mut index = InvertedIndex::new();
        insert_text(&mut index, &analyzer, "d2", "apple banana apple");
        insert_text(&mut index, &analyzer, "d1", "Apple");

        assert_eq!(index.size(), 2);
        assert_eq!(index.term_count(), 2);
        assert_eq!(
            index.postings_for("apple"),
            vec![(DocumentId::from("d1"), 1.0), (DocumentId::from("d2"), 2.0)]
        );
        assert_eq!(index.doc_freq("apple"), 2);
        assert_eq!(index.document("d2").map(|d| d.weighted_length), Some(3.0));
        index.check_consistency().unwrap();
    }

    #[test]
    fn test_term_in_several_fields_counts_one_document() {
        let analyzer = Analyzer::default();
        let mut index = InvertedIndex::new();
        let fields = [
            Field::new("title", "rust guide", 3.0),
            Field::new("body", "a guide to rust", 1.0),
        ];
        index.insert(DocumentId::from("d1"), &fields, &analyzer).unwrap();

        assert_eq!(index.doc_freq("rust"), 1);
        assert_eq!(index.postings_for("rust"), vec![(DocumentId::from("d1"), 4.0)]);
        assert_eq!(index.document("d1").map(|d| d.weighted_length), Some(10.0));
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let analyzer = Analyzer::default();
        let mut index = InvertedIndex::new();
        insert_text(&mut index, &analyzer, "d1", "one");
        let err = index
            .insert(DocumentId::from("d1"), &[Field::text("body", "two")], &analyzer)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert_eq!(index.postings_for("one").len(), 1);
        assert!(index.postings_for("two").is_empty());
    }

    #[test]
    fn test_remove_drops_orphan_terms() {
        let analyzer = Analyzer::default();
        let mut index = InvertedIndex::new();
        insert_text(&mut index, &analyzer, "d1", "shared only1");
        insert_text(&mut index, &analyzer, "d2", "shared");

        assert!(index.remove("d1"));
        assert!(!index.remove("d1"));
        assert!(index.term("only1").is_none());
        assert_eq!(index.postings_for("shared"), vec![(DocumentId::from("d2"), 1.0)]);
        assert_eq!(index.size(), 1);
        index.check_consistency().unwrap();
    }

    #[test]
    fn test_reinsert_after_remove_matches_fresh_insert() {
        let analyzer = Analyzer::default();
        let mut once = InvertedIndex::new();
        insert_text(&mut once, &analyzer, "d1", "red green red");

        let mut twice = InvertedIndex::new();
        insert_text(&mut twice, &analyzer, "d1", "red green red");
        twice.remove("d1");
        insert_text(&mut twice, &analyzer, "d1", "red green red");

        for term in ["red", "green"] {
            assert_eq!(once.postings_for(term), twice.postings_for(term));
        }
        assert_eq!(once.term_count(), twice.term_count());
    }

    #[test]
    fn test_document_without_terms_is_still_registered() {
        let analyzer = Analyzer::default();
        let mut index = InvertedIndex::new();
        insert_text(&mut index, &analyzer, "blank", "  ...  ");
        assert_eq!(index.size(), 1);
        assert_eq!(index.term_count(), 0);
        assert!(index.remove("blank"));
        index.check_consistency().unwrap();
    }

    #[test]
    fn test_overflowing_weights_are_rejected() {
        let analyzer = Analyzer::default();
        let mut index = InvertedIndex::new();
        let fields = [Field::new("body", "loud loud loud", f32::MAX)];
        let err = index.insert(DocumentId::from("d1"), &fields, &analyzer).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert!(index.is_empty());
    }

    #[test]
    fn test_clear_resets_everything() {
        let analyzer = Analyzer::default();
        let mut index = InvertedIndex::new();
        insert_text(&mut index, &analyzer, "d1", "alpha beta");
        index.clear();
        assert_eq!(index.size(), 0);
        assert_eq!(index.term_count(), 0);
        assert!(index.postings_for("alpha").is_empty());
    }

    #[test]
    fn test_term_info_follows_postings_through_churn() {
        let analyzer = Analyzer::default();
        let mut index = InvertedIndex::new();
        for round in 0..20 {
            for id in ["a", "b", "c"] {
                index.remove(id);
                insert_text(&mut index, &analyzer, id, &format!("common w{}", round % 3));
            }
            index.remove("b");
        }

        let common = index.term("common").unwrap();
        assert_eq!(common.info, TermInfo { doc_freq: 2 });
        assert_eq!(common.info.doc_freq as usize, common.postings.len());
        index.check_consistency().unwrap();
    }
}
