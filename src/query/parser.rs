use tracing::trace;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::core::error::{Error, Result};

/// Parsed query. Words borrow from the raw query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_words: Vec<&'a str>,
    pub minus_words: Vec<&'a str>,
}

impl Query<'_> {
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

struct QueryWord<'a> {
    text: &'a str,
    is_minus: bool,
    is_stop: bool,
}

/// Query parser for converting raw query text into plus/minus word sets
/// Syntax:
/// - "fluffy cat" -> both words must contribute to relevance
/// - "cat -collar" -> documents containing "collar" are excluded
pub struct QueryParser {
    pub stop_words: StopWordFilter,
}

impl QueryParser {
    pub fn new(stop_words: StopWordFilter) -> Self {
        QueryParser { stop_words }
    }

    pub fn stop_words(&self) -> &StopWordFilter {
        &self.stop_words
    }

    /// Parses a query into sorted, duplicate-free plus and minus word lists.
    pub fn parse<'a>(&self, text: &'a str) -> Result<Query<'a>> {
        let mut query = self.parse_unordered(text)?;

        query.plus_words.sort_unstable();
        query.plus_words.dedup();
        query.minus_words.sort_unstable();
        query.minus_words.dedup();

        trace!(plus = query.plus_words.len(), minus = query.minus_words.len(), "parsed query");
        Ok(query)
    }

    /// Parses a query keeping words in query order, duplicates included.
    /// Consumers must deduplicate whatever they derive from it.
    pub fn parse_unordered<'a>(&self, text: &'a str) -> Result<Query<'a>> {
        let mut query = Query::default();

        for token in split_into_words(text) {
            let word = self.parse_word(token)?;
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.minus_words.push(word.text);
            } else {
                query.plus_words.push(word.text);
            }
        }

        Ok(query)
    }

    fn parse_word<'a>(&self, token: &'a str) -> Result<QueryWord<'a>> {
        let (text, is_minus) = match token.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (token, false),
        };

        if text.is_empty() || text.starts_with('-') || !is_valid_word(text) {
            return Err(Error::invalid_argument(format!("Query word {:?} is invalid", token)));
        }

        Ok(QueryWord {
            text,
            is_minus,
            is_stop: self.stop_words.is_stop_word(text),
        })
    }
}
