/// Scorer trait
pub trait Scorer: Send + Sync {
    /// Weight of a word given how many documents contain it.
    fn word_weight(&self, total_docs: usize, doc_freq: usize) -> f64;

    /// Contribution of one posting to a document's relevance.
    fn score(&self, term_freq: f64, word_weight: f64) -> f64;

    fn name(&self) -> &str;
}

/// TF-IDF Scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScorer;

impl Scorer for TfIdfScorer {
    fn word_weight(&self, total_docs: usize, doc_freq: usize) -> f64 {
        // IDF = ln(N / df)
        (total_docs as f64 / doc_freq as f64).ln()
    }

    fn score(&self, term_freq: f64, word_weight: f64) -> f64 {
        term_freq * word_weight
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}
