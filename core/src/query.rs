//! Query parsing: plus words, minus words and their validation.

use crate::error::{SearchError, SearchResult};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

/// Stands in for a bare `-`; never a valid query word.
const EMPTY_MINUS_PLACEHOLDER: &str = " ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(word: &str) -> QueryWord<'_> {
    match word.strip_prefix('-') {
        Some("") => QueryWord { data: EMPTY_MINUS_PLACEHOLDER, is_minus: true },
        Some(rest) => QueryWord { data: rest, is_minus: true },
        None => QueryWord { data: word, is_minus: false },
    }
}

fn is_valid_query_word(word: &str) -> bool {
    is_valid_word(word)
        && word != EMPTY_MINUS_PLACEHOLDER
        && !word.starts_with('-')
        && !word.ends_with('-')
}

impl Query {
    /// Parse `text` into plus and minus words, dropping stop words.
    ///
    /// A word may land in both sets; neither side is deduplicated against the
    /// other.
    pub fn parse(text: &str, stop_words: &StopWords) -> SearchResult<Self> {
        let mut query = Query::default();
        for word in split_into_words(text) {
            let word = parse_query_word(word);
            if stop_words.contains(word.data) {
                continue;
            }
            if !is_valid_query_word(word.data) {
                return Err(SearchError::InvalidQuery(word.data.to_string()));
            }
            if word.is_minus {
                query.minus_words.insert(word.data.to_string());
            } else {
                query.plus_words.insert(word.data.to_string());
            }
        }
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}
