use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use rayon::prelude::*;
use tracing::debug;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, DocumentMeta};
use crate::index::posting::PostingList;

/// Canonical word storage. The word index owns one allocation per distinct
/// word; the per-document index holds clones of the same `Arc`.
pub type Word = Arc<str>;

/// Word → term frequency for one document.
pub type WordFrequencies = BTreeMap<Word, f64>;

static NO_FREQUENCIES: WordFrequencies = BTreeMap::new();

/// Inverted index structure
///
/// Membership of a document id is all-or-nothing across `doc_order`,
/// `doc_to_words` and `documents`, and every (word, doc) posting is mirrored
/// in `doc_to_words` with the same frequency. A word stays in `word_to_docs`
/// only while its posting list is non-empty.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_docs: BTreeMap<Word, PostingList>,
    doc_to_words: BTreeMap<DocId, WordFrequencies>,
    documents: BTreeMap<DocId, DocumentMeta>,
    doc_order: Vec<DocId>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Fails unless `id` is non-negative and not yet indexed.
    pub fn check_new_id(&self, id: DocId) -> Result<()> {
        if id.value() < 0 {
            return Err(Error::invalid_argument(format!("Document id {} is negative", id)));
        }
        if self.documents.contains_key(&id) {
            return Err(Error::invalid_argument(format!("Document id {} is already indexed", id)));
        }
        Ok(())
    }

    /// Indexes a document from its already validated, stop-word free words.
    pub fn add_document(&mut self, id: DocId, words: &[&str], meta: DocumentMeta) -> Result<()> {
        self.check_new_id(id)?;

        let inv_word_count = 1.0 / words.len() as f64;
        let mut frequencies = WordFrequencies::new();

        for &raw in words {
            let word = self.canonical_word(raw);
            self.word_to_docs.entry(Arc::clone(&word))
                .or_default()
                .add_posting(id, inv_word_count);
            *frequencies.entry(word).or_insert(0.0) += inv_word_count;
        }

        debug!(doc_id = id.value(), words = words.len(), distinct = frequencies.len(), "indexed document");

        self.doc_to_words.insert(id, frequencies);
        self.documents.insert(id, meta);
        self.doc_order.push(id);

        Ok(())
    }

    fn canonical_word(&self, raw: &str) -> Word {
        match self.word_to_docs.get_key_value(raw) {
            Some((word, _)) => Arc::clone(word),
            None => Arc::from(raw),
        }
    }

    /// Removes a document, cleaning each of its posting lists in turn.
    /// Returns false when the id was not indexed.
    pub fn remove_document(&mut self, id: DocId) -> bool {
        if !self.detach_from_order(id) {
            return false;
        }

        let words = self.doc_to_words.remove(&id).unwrap_or_default();
        for word in words.keys() {
            if let Some(postings) = self.word_to_docs.get_mut(&**word) {
                postings.remove(id);
                if postings.is_empty() {
                    self.word_to_docs.remove(&**word);
                }
            }
        }
        self.documents.remove(&id);

        debug!(doc_id = id.value(), words = words.len(), "removed document");
        true
    }

    /// Same net effect as [`remove_document`](Self::remove_document), but the
    /// document's posting lists are detached from the word index and cleaned on
    /// the current rayon pool, one word per task. Every task owns a distinct
    /// posting list, so no locking is involved.
    pub fn remove_document_parallel(&mut self, id: DocId) -> bool {
        if !self.detach_from_order(id) {
            return false;
        }

        let words = self.doc_to_words.remove(&id).unwrap_or_default();
        let mut detached: Vec<(Word, PostingList)> = words.keys()
            .filter_map(|word| self.word_to_docs.remove_entry(&**word))
            .collect();

        detached.par_iter_mut().for_each(|(_, postings)| {
            postings.remove(id);
        });

        for (word, postings) in detached {
            if !postings.is_empty() {
                self.word_to_docs.insert(word, postings);
            }
        }
        self.documents.remove(&id);

        debug!(doc_id = id.value(), words = words.len(), "removed document (parallel)");
        true
    }

    fn detach_from_order(&mut self, id: DocId) -> bool {
        match self.doc_order.iter().position(|&doc_id| doc_id == id) {
            Some(pos) => {
                self.doc_order.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct indexed words.
    pub fn word_count(&self) -> usize {
        self.word_to_docs.len()
    }

    /// Document ids in insertion order.
    pub fn document_ids(&self) -> &[DocId] {
        &self.doc_order
    }

    pub fn meta(&self, id: DocId) -> Option<DocumentMeta> {
        self.documents.get(&id).copied()
    }

    pub fn postings(&self, word: &str) -> Option<&PostingList> {
        self.word_to_docs.get(word)
    }

    pub fn document_words(&self, id: DocId) -> Option<&WordFrequencies> {
        self.doc_to_words.get(&id)
    }

    /// Word frequencies of a document; an empty map for unknown ids.
    pub fn word_frequencies(&self, id: DocId) -> &WordFrequencies {
        self.doc_to_words.get(&id).unwrap_or(&NO_FREQUENCIES)
    }

    /// Walks every structure and checks the cross-index invariants.
    /// Linear in the size of the index; meant for tests and debugging.
    pub fn is_consistent(&self) -> bool {
        let doc_count = self.doc_order.len();
        if self.doc_to_words.len() != doc_count || self.documents.len() != doc_count {
            return false;
        }

        let mut seen = BTreeSet::new();
        for id in &self.doc_order {
            if !seen.insert(*id) || !self.doc_to_words.contains_key(id) || !self.documents.contains_key(id) {
                return false;
            }
        }

        let mut mirrored = 0usize;
        for (word, postings) in &self.word_to_docs {
            if postings.is_empty() {
                return false;
            }
            for (doc_id, &tf) in postings {
                match self.doc_to_words.get(doc_id).and_then(|words| words.get_key_value(&**word)) {
                    Some((doc_word, &doc_tf)) if Arc::ptr_eq(doc_word, word) && doc_tf == tf => mirrored += 1,
                    _ => return false,
                }
            }
        }

        let doc_word_pairs: usize = self.doc_to_words.values().map(|words| words.len()).sum();
        if mirrored != doc_word_pairs {
            return false;
        }

        self.doc_to_words.values()
            .all(|words| words.is_empty() || (words.values().sum::<f64>() - 1.0).abs() < 1e-9)
    }
}
