/// Splits `text` on runs of the space character. Tabs, newlines and other
/// whitespace stay inside words; the returned slices borrow from `text`.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ')
        .filter(|word| !word.is_empty())
        .collect()
}

/// A word is valid when it holds no control characters (codes below 0x20).
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|byte| byte < b' ')
}
