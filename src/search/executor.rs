use std::collections::BTreeMap;
use rayon::prelude::*;
use tracing::trace;
use crate::core::types::{DocId, Execution};
use crate::index::inverted::InvertedIndex;
use crate::parallel::concurrent_map::ConcurrentMap;
use crate::query::parser::Query;
use crate::scoring::scorer::{Scorer, TfIdfScorer};
use crate::search::predicate::DocumentPredicate;
use crate::search::results::{ScoredDocument, TopKCollector};

/// Ranks documents of one index against parsed queries
pub struct QueryExecutor<'i, S: Scorer = TfIdfScorer> {
    index: &'i InvertedIndex,
    scorer: S,
    collector: TopKCollector,
    shard_count: usize,
}

impl<'i> QueryExecutor<'i> {
    pub fn new(index: &'i InvertedIndex, collector: TopKCollector, shard_count: usize) -> Self {
        QueryExecutor::with_scorer(index, TfIdfScorer, collector, shard_count)
    }
}

impl<'i, S: Scorer> QueryExecutor<'i, S> {
    pub fn with_scorer(index: &'i InvertedIndex, scorer: S, collector: TopKCollector, shard_count: usize) -> Self {
        QueryExecutor {
            index,
            scorer,
            collector,
            shard_count,
        }
    }

    /// Best documents for the query, ranked and capped. A query without plus
    /// words matches nothing.
    pub fn find_top<P>(&self, query: &Query<'_>, predicate: &P, execution: Execution) -> Vec<ScoredDocument>
    where
        P: DocumentPredicate + ?Sized,
    {
        if query.plus_words.is_empty() {
            return Vec::new();
        }

        let candidates = self.find_all(query, predicate, execution);
        trace!(candidates = candidates.len(), scorer = self.scorer.name(), ?execution, "ranked query");
        self.collector.select(candidates)
    }

    /// Every candidate with its accumulated relevance, ordered by document id.
    pub fn find_all<P>(&self, query: &Query<'_>, predicate: &P, execution: Execution) -> Vec<ScoredDocument>
    where
        P: DocumentPredicate + ?Sized,
    {
        let relevance = match execution {
            Execution::Sequential => self.accumulate_sequential(query, predicate),
            Execution::Parallel => self.accumulate_parallel(query, predicate),
        };

        relevance.into_iter()
            .filter_map(|(id, relevance)| {
                self.index.meta(id).map(|meta| ScoredDocument::new(id, relevance, meta.rating))
            })
            .collect()
    }

    fn accumulate_sequential<P>(&self, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: DocumentPredicate + ?Sized,
    {
        let mut relevance = BTreeMap::new();

        for word in &query.plus_words {
            self.for_each_weighted_posting(word, predicate, |id, score| {
                *relevance.entry(id).or_insert(0.0) += score;
            });
        }

        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for id in postings.doc_ids() {
                    relevance.remove(&id);
                }
            }
        }

        relevance
    }

    // Plus words fan out over the current rayon pool; per-document sums go
    // through the sharded accumulator. Minus words run only after every plus
    // word has been folded in.
    fn accumulate_parallel<P>(&self, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: DocumentPredicate + ?Sized,
    {
        let relevance: ConcurrentMap<DocId, f64> = ConcurrentMap::new(self.shard_count);

        query.plus_words.par_iter().for_each(|word| {
            self.for_each_weighted_posting(word, predicate, |id, score| {
                relevance.update(id, |value| *value += score);
            });
        });

        query.minus_words.par_iter().for_each(|word| {
            if let Some(postings) = self.index.postings(word) {
                for id in postings.doc_ids() {
                    relevance.remove(&id);
                }
            }
        });

        relevance.into_ordinary_map()
    }

    fn for_each_weighted_posting<P>(&self, word: &str, predicate: &P, mut sink: impl FnMut(DocId, f64))
    where
        P: DocumentPredicate + ?Sized,
    {
        let Some(postings) = self.index.postings(word) else {
            return;
        };

        let weight = self.scorer.word_weight(self.index.document_count(), postings.doc_freq());
        for (id, term_freq) in postings.iter() {
            let Some(meta) = self.index.meta(id) else {
                continue;
            };
            if predicate.matches(id, meta.status, meta.rating) {
                sink(id, self.scorer.score(term_freq, weight));
            }
        }
    }
}
