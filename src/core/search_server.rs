use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, DocumentMeta, DocumentStatus, Execution};
use crate::index::inverted::{InvertedIndex, WordFrequencies};
use crate::query::matcher::DocumentMatcher;
use crate::query::parser::QueryParser;
use crate::search::executor::QueryExecutor;
use crate::search::predicate::DocumentPredicate;
use crate::search::results::{ScoredDocument, TopKCollector};

/// In-memory full-text search server
///
/// Writes (`add_document`, `remove_document*`) take `&mut self`, reads take
/// `&self`, so the borrow checker enforces the single-writer discipline.
/// Parallel strategies run on a private rayon pool sized by
/// `Config::worker_threads`; every call joins its workers before returning.
pub struct SearchServer {
    config: Config,
    parser: QueryParser,
    index: InvertedIndex,
    pool: ThreadPool,
}

impl SearchServer {
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(stop_words, Config::default())
    }

    /// Builds a server from a space-separated stop word list.
    pub fn from_stop_words_text(stop_words_text: &str) -> Result<Self> {
        Self::new(split_into_words(stop_words_text))
    }

    pub fn with_config<I, S>(stop_words: I, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        config.validate()?;
        let stop_words = StopWordFilter::new(stop_words)?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(|i| format!("tfidx-worker-{}", i))
            .build()?;

        debug!(stop_words = stop_words.len(), workers = config.worker_threads, "search server created");

        Ok(SearchServer {
            config,
            parser: QueryParser::new(stop_words),
            index: InvertedIndex::new(),
            pool,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Runs `op` inside the server's worker pool.
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Indexes a document. Nothing is written unless the id is new and
    /// non-negative and every word is free of control characters.
    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        self.index.check_new_id(id)?;
        let words = self.split_into_words_no_stop(text)?;
        let meta = DocumentMeta {
            rating: average_rating(ratings),
            status,
        };
        self.index.add_document(id, &words, meta)
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let words = split_into_words(text);
        if let Some(word) = words.iter().find(|word| !is_valid_word(word)) {
            return Err(Error::invalid_argument(format!("Word {:?} is invalid", word)));
        }
        Ok(self.parser.stop_words().filter(words))
    }

    /// Top documents with status `Actual`, sequentially ranked.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(Execution::Sequential, raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with(Execution::Sequential, raw_query, status)
    }

    pub fn find_top_documents_by<F>(&self, raw_query: &str, predicate: F) -> Result<Vec<ScoredDocument>>
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(Execution::Sequential, raw_query, predicate)
    }

    /// Ranks documents accepted by `predicate` (a [`DocumentStatus`] or a
    /// closure) by TF-IDF relevance, ties within `relevance_epsilon` broken by
    /// rating, capped at `max_result_count`.
    pub fn find_top_documents_with<P>(&self, execution: Execution, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: DocumentPredicate,
    {
        let query = self.parser.parse(raw_query)?;
        let collector = TopKCollector::new(self.config.max_result_count, self.config.relevance_epsilon);
        let executor = QueryExecutor::new(&self.index, collector, self.config.shard_count);

        let found = match execution {
            Execution::Sequential => executor.find_top(&query, &predicate, execution),
            Execution::Parallel => self.pool.install(|| executor.find_top(&query, &predicate, execution)),
        };
        Ok(found)
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Document ids in insertion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.index.document_ids().iter().copied()
    }

    /// Word frequencies of a document; empty when the id is unknown.
    pub fn word_frequencies(&self, id: DocId) -> &WordFrequencies {
        self.index.word_frequencies(id)
    }

    /// Removes a document. Unknown ids are ignored.
    pub fn remove_document(&mut self, id: DocId) {
        self.remove_document_with(Execution::Sequential, id);
    }

    pub fn remove_document_with(&mut self, execution: Execution, id: DocId) {
        let index = &mut self.index;
        let removed = match execution {
            Execution::Sequential => index.remove_document(id),
            Execution::Parallel => self.pool.install(|| index.remove_document_parallel(id)),
        };
        if !removed {
            debug!(doc_id = id.value(), "remove of unknown document ignored");
        }
    }

    /// Plus words of the query present in the document (ascending, no
    /// duplicates), or none if a minus word is present, plus the document's
    /// status. Fails with `NotFound` for unknown ids.
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<&str>, DocumentStatus)> {
        self.match_document_with(Execution::Sequential, raw_query, id)
    }

    pub fn match_document_with(&self, execution: Execution, raw_query: &str, id: DocId) -> Result<(Vec<&str>, DocumentStatus)> {
        let matcher = DocumentMatcher::new(&self.index, &self.parser);
        match execution {
            Execution::Sequential => matcher.match_document(raw_query, id, execution),
            Execution::Parallel => self.pool.install(|| matcher.match_document(raw_query, id, execution)),
        }
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.index.document_ids().iter().copied()
    }
}

/// Truncating mean of the ratings, 0 when there are none.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&rating| rating as i64).sum();
    (sum / ratings.len() as i64) as i32
}
