use std::collections::HashSet;
use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::core::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct StopWordFilter {
    pub stop_words: HashSet<String>,
}

impl StopWordFilter {
    /// Builds the set, rejecting any candidate with a control character.
    /// Empty strings are dropped and duplicates collapse.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if !is_valid_word(word) {
                return Err(Error::invalid_argument(format!(
                    "Stop word {:?} contains a control character",
                    word
                )));
            }
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }

        Ok(StopWordFilter { stop_words: set })
    }

    /// Builds the set from a space-separated list.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }

    pub fn filter<'a>(&self, words: Vec<&'a str>) -> Vec<&'a str> {
        words.into_iter()
            .filter(|word| !self.is_stop_word(word))
            .collect()
    }
}
