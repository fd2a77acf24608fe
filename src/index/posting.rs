use std::collections::BTreeMap;
use std::collections::btree_map;
use crate::core::types::DocId;

/// Posting list for a word: document id → term frequency.
/// Note: Ordered by doc_id so relevance accumulation visits documents deterministically
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingList {
    pub postings: BTreeMap<DocId, f64>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            postings: BTreeMap::new(),
        }
    }

    /// Adds `term_freq` to the document's frequency, creating the posting if absent.
    pub fn add_posting(&mut self, doc_id: DocId, term_freq: f64) {
        *self.postings.entry(doc_id).or_insert(0.0) += term_freq;
    }

    pub fn remove(&mut self, doc_id: DocId) -> Option<f64> {
        self.postings.remove(&doc_id)
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Number of documents containing the word.
    pub fn doc_freq(&self) -> usize {
        self.postings.len()
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.postings.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, f64)> + '_ {
        self.postings.iter().map(|(&doc_id, &tf)| (doc_id, tf))
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = (&'a DocId, &'a f64);
    type IntoIter = btree_map::Iter<'a, DocId, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}
