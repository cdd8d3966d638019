use crate::error::{SearchError, SearchResult};
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

/// Immutable set of words excluded from both documents and queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build from already split words. Empty strings are ignored.
    pub fn from_words<I, S>(words: I) -> SearchResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidStopWord(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    /// Build from space separated text, e.g. `"and in at"`.
    pub fn from_text(text: &str) -> SearchResult<Self> {
        Self::from_words(split_into_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_text_and_words() {
        let from_text = StopWords::from_text(" and in  at ").unwrap();
        let from_words = StopWords::from_words(["at", "", "in", "and", "in"]).unwrap();
        assert_eq!(from_text, from_words);
        assert_eq!(from_text.len(), 3);
        assert!(from_text.contains("in"));
        assert!(!from_text.contains("cat"));
    }

    #[test]
    fn rejects_control_characters() {
        let words = vec!["and".to_string(), "i\u{1}n".to_string()];
        let err = StopWords::from_words(words).unwrap_err();
        assert_eq!(err, SearchError::InvalidStopWord("i\u{1}n".into()));
    }

    #[test]
    fn empty_input_gives_empty_set() {
        let stop_words = StopWords::from_text("").unwrap();
        assert!(stop_words.is_empty());
        assert_eq!(stop_words.iter().count(), 0);
    }
}
