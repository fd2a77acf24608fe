use rayon::prelude::*;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, DocumentStatus, Execution};
use crate::index::inverted::{InvertedIndex, WordFrequencies};
use crate::query::parser::{Query, QueryParser};

/// Document matcher - reports which query words a single document contains
pub struct DocumentMatcher<'i> {
    index: &'i InvertedIndex,
    parser: &'i QueryParser,
}

impl<'i> DocumentMatcher<'i> {
    pub fn new(index: &'i InvertedIndex, parser: &'i QueryParser) -> Self {
        DocumentMatcher { index, parser }
    }

    /// Returns the plus words present in the document, or nothing at all when
    /// any minus word is present. Words are returned in ascending order,
    /// without duplicates, borrowed from the index's own word storage.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocId,
        execution: Execution,
    ) -> Result<(Vec<&'i str>, DocumentStatus)> {
        let (words, status) = match (self.index.document_words(id), self.index.meta(id)) {
            (Some(words), Some(meta)) => (words, meta.status),
            _ => return Err(Error::not_found(format!("Document id {} is not indexed", id))),
        };

        let matched = match execution {
            Execution::Sequential => {
                let query = self.parser.parse(raw_query)?;
                Self::match_sequential(&query, words)
            }
            Execution::Parallel => {
                let query = self.parser.parse_unordered(raw_query)?;
                Self::match_parallel(&query, words)
            }
        };

        Ok((matched, status))
    }

    // Relies on the parser having sorted and deduplicated the plus words.
    fn match_sequential(query: &Query<'_>, words: &'i WordFrequencies) -> Vec<&'i str> {
        if query.minus_words.iter().any(|word| words.contains_key(*word)) {
            return Vec::new();
        }

        query.plus_words.iter()
            .filter_map(|word| words.get_key_value(*word).map(|(owned, _)| &**owned))
            .collect()
    }

    fn match_parallel(query: &Query<'_>, words: &'i WordFrequencies) -> Vec<&'i str> {
        if query.minus_words.par_iter().any(|word| words.contains_key(*word)) {
            return Vec::new();
        }

        let mut matched: Vec<&'i str> = query.plus_words.par_iter()
            .filter_map(|word| words.get_key_value(*word).map(|(owned, _)| &**owned))
            .collect();

        matched.sort_unstable();
        matched.dedup();
        matched
    }
}
