use std::cmp::Ordering;
use std::fmt;
use serde::{Serialize, Deserialize};
use crate::core::types::DocId;

/// Document with relevance score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl ScoredDocument {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        ScoredDocument { id, relevance, rating }
    }
}

impl fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Higher relevance first, then higher rating. A total order.
pub fn relevance_order(lhs: &ScoredDocument, rhs: &ScoredDocument) -> Ordering {
    rhs.relevance.total_cmp(&lhs.relevance)
        .then_with(|| rhs.rating.cmp(&lhs.rating))
}

/// Higher rating first, then lower id.
pub fn rating_order(lhs: &ScoredDocument, rhs: &ScoredDocument) -> Ordering {
    rhs.rating.cmp(&lhs.rating)
        .then_with(|| lhs.id.cmp(&rhs.id))
}

/// Top-K collector: ranks candidates and keeps the best `k`
///
/// Candidates are sorted by relevance, then every run of neighbours whose
/// relevances differ by less than `epsilon` is reordered by rating. Runs
/// chain, so a run may span more than `epsilon` overall.
#[derive(Debug, Clone, Copy)]
pub struct TopKCollector {
    k: usize,
    epsilon: f64,
}

impl TopKCollector {
    pub fn new(k: usize, epsilon: f64) -> Self {
        TopKCollector { k, epsilon }
    }

    pub fn select(&self, mut candidates: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
        candidates.sort_by(relevance_order);
        for run in candidates.chunk_by_mut(|lhs, rhs| lhs.relevance - rhs.relevance < self.epsilon) {
            run.sort_by(rating_order);
        }
        candidates.truncate(self.k);
        candidates
    }
}
