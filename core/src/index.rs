use crate::error::{SearchError, SearchResult};
use crate::tokenizer::is_valid_word;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

pub type DocId = i32;
pub type Rating = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Actual => "actual",
            DocumentStatus::Irrelevant => "irrelevant",
            DocumentStatus::Banned => "banned",
            DocumentStatus::Removed => "removed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "actual" => Ok(DocumentStatus::Actual),
            "irrelevant" => Ok(DocumentStatus::Irrelevant),
            "banned" => Ok(DocumentStatus::Banned),
            "removed" => Ok(DocumentStatus::Removed),
            other => Err(format!("unknown document status {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
    pub rating: Rating,
    pub status: DocumentStatus,
}

/// Term postings plus per-document metadata.
///
/// Documents are immutable once added: their postings, rating and status never
/// change, and ids are unique.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    /// term -> (doc id -> term frequency)
    word_to_document_freqs: HashMap<String, BTreeMap<DocId, f64>>,
    /// doc id -> (term -> term frequency), mirror of the postings
    document_to_word_freqs: BTreeMap<DocId, BTreeMap<String, f64>>,
    documents: BTreeMap<DocId, DocumentData>,
    /// ids in insertion order
    document_ids: Vec<DocId>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document from its words with stop words already removed.
    ///
    /// Every check runs before the first write, so a rejected document leaves
    /// the index untouched. A document without words is still recorded.
    pub fn add_document(
        &mut self,
        id: DocId,
        words: &[&str],
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> SearchResult<()> {
        if id < 0 {
            return Err(SearchError::NegativeId(id));
        }
        if self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateId(id));
        }
        if let Some(word) = words.iter().find(|w| !is_valid_word(w)) {
            return Err(SearchError::InvalidWord(word.to_string()));
        }

        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            let word_freqs = self.document_to_word_freqs.entry(id).or_default();
            for &word in words {
                *self
                    .word_to_document_freqs
                    .entry(word.to_string())
                    .or_default()
                    .entry(id)
                    .or_insert(0.0) += inv_word_count;
                *word_freqs.entry(word.to_string()).or_insert(0.0) += inv_word_count;
            }
        }

        let rating = compute_average_rating(ratings);
        self.documents.insert(id, DocumentData { rating, status });
        self.document_ids.push(id);
        tracing::debug!(id, words = words.len(), rating, %status, "document added");
        Ok(())
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Id of the `index`-th added document; valid indices are `0..count`.
    pub fn document_id_at(&self, index: i64) -> SearchResult<DocId> {
        let count = self.document_ids.len();
        usize::try_from(index)
            .ok()
            .and_then(|i| self.document_ids.get(i).copied())
            .ok_or(SearchError::IndexOutOfRange { index, count })
    }

    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.document_ids.iter().copied()
    }

    pub fn document(&self, id: DocId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    /// Postings of `word`, or `None` if no document contains it.
    pub fn postings(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.word_to_document_freqs.get(word)
    }

    pub fn contains(&self, word: &str, id: DocId) -> bool {
        self.postings(word).is_some_and(|p| p.contains_key(&id))
    }

    /// `ln(N / df)` for a word present in the index.
    pub fn inverse_document_freq(&self, postings: &BTreeMap<DocId, f64>) -> f64 {
        (self.document_count() as f64 / postings.len() as f64).ln()
    }

    /// Term frequencies of one document; empty for unknown or wordless ids.
    pub fn word_frequencies(&self, id: DocId) -> BTreeMap<&str, f64> {
        self.document_to_word_freqs
            .get(&id)
            .map(|freqs| freqs.iter().map(|(w, &tf)| (w.as_str(), tf)).collect())
            .unwrap_or_default()
    }

    pub fn term_count(&self) -> usize {
        self.word_to_document_freqs.len()
    }
}

/// Truncating average of `ratings`, 0 when there are none.
pub fn compute_average_rating(ratings: &[Rating]) -> Rating {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum / ratings.len() as i64) as Rating
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rating_truncates_toward_zero() {
        assert_eq!(compute_average_rating(&[]), 0);
        assert_eq!(compute_average_rating(&[7, 2, 7]), 5);
        assert_eq!(compute_average_rating(&[1, 2]), 1);
        assert_eq!(compute_average_rating(&[-1, -2]), -1);
        assert_eq!(compute_average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }

    #[test]
    fn term_frequency_counts_repeats() {
        let mut idx = InvertedIndex::new();
        idx.add_document(1, &["fluffy", "cat", "fluffy", "tail"], DocumentStatus::Actual, &[1, 2])
            .unwrap();
        let fluffy = idx.postings("fluffy").unwrap();
        assert!((fluffy[&1] - 0.5).abs() < 1e-12);
        assert!((idx.postings("cat").unwrap()[&1] - 0.25).abs() < 1e-12);
        assert_eq!(idx.document(1).unwrap().rating, 1);
        assert_eq!(idx.word_frequencies(1).len(), 3);
    }

    #[test]
    fn rejected_document_leaves_index_untouched() {
        let mut idx = InvertedIndex::new();
        idx.add_document(0, &["cat"], DocumentStatus::Actual, &[]).unwrap();

        assert_eq!(
            idx.add_document(-3, &["dog"], DocumentStatus::Actual, &[]),
            Err(SearchError::NegativeId(-3))
        );
        assert_eq!(
            idx.add_document(0, &["dog"], DocumentStatus::Banned, &[9]),
            Err(SearchError::DuplicateId(0))
        );
        assert_eq!(
            idx.add_document(1, &["dog", "b\u{7}d"], DocumentStatus::Actual, &[]),
            Err(SearchError::InvalidWord("b\u{7}d".into()))
        );

        assert_eq!(idx.document_count(), 1);
        assert!(idx.postings("dog").is_none());
        assert_eq!(idx.document(0).unwrap().status, DocumentStatus::Actual);
        assert!(idx.document(1).is_none());
    }

    #[test]
    fn empty_document_is_counted_without_postings() {
        let mut idx = InvertedIndex::new();
        idx.add_document(4, &[], DocumentStatus::Removed, &[3]).unwrap();
        assert_eq!(idx.document_count(), 1);
        assert_eq!(idx.term_count(), 0);
        assert!(idx.word_frequencies(4).is_empty());
        assert_eq!(idx.document(4).unwrap().status, DocumentStatus::Removed);
    }

    #[test]
    fn positional_lookup_rejects_count() {
        let mut idx = InvertedIndex::new();
        idx.add_document(10, &["a"], DocumentStatus::Actual, &[]).unwrap();
        idx.add_document(3, &["b"], DocumentStatus::Actual, &[]).unwrap();
        assert_eq!(idx.document_id_at(0), Ok(10));
        assert_eq!(idx.document_id_at(1), Ok(3));
        assert_eq!(idx.document_id_at(2), Err(SearchError::IndexOutOfRange { index: 2, count: 2 }));
        assert_eq!(
            idx.document_id_at(-1),
            Err(SearchError::IndexOutOfRange { index: -1, count: 2 })
        );
        assert_eq!(idx.document_ids().collect::<Vec<_>>(), vec![10, 3]);
    }

    #[test]
    fn status_parses_and_serializes_lowercase() {
        assert_eq!("IRRELEVANT".parse::<DocumentStatus>(), Ok(DocumentStatus::Irrelevant));
        assert!("archived".parse::<DocumentStatus>().is_err());
        assert_eq!(serde_json::to_string(&DocumentStatus::Banned).unwrap(), "\"banned\"");
        assert_eq!(DocumentStatus::default(), DocumentStatus::Actual);
    }
}
