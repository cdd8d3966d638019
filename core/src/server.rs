use crate::config::SearchConfig;
use crate::error::{SearchError, SearchResult};
use crate::index::{DocId, DocumentData, DocumentStatus, InvertedIndex, Rating};
use crate::query::Query;
use crate::stop_words::StopWords;
use crate::tokenizer::split_into_words;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: DocId,
    pub relevance: f64,
    pub rating: Rating,
}

impl fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id,
            format_significant(self.relevance, 6),
            self.rating
        )
    }
}

/// Format with `digits` significant digits, trailing zeros trimmed, switching
/// to exponent notation for very large or small magnitudes.
fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let precision = digits.saturating_sub(1);
    let sci = format!("{value:.precision$e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// TF-IDF search over an in-memory [`InvertedIndex`].
///
/// Ingestion takes `&mut self` and queries take `&self`; the server holds no
/// locks of its own.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    config: SearchConfig,
}

impl SearchServer {
    /// Server with the given space separated stop words and default config.
    pub fn new(stop_words_text: &str) -> SearchResult<Self> {
        Ok(Self::with_stop_words(StopWords::from_text(stop_words_text)?))
    }

    pub fn with_stop_words(stop_words: StopWords) -> Self {
        Self::with_config(stop_words, SearchConfig::default())
    }

    pub fn with_config(stop_words: StopWords, config: SearchConfig) -> Self {
        Self { stop_words, index: InvertedIndex::new(), config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn add_document(
        &mut self,
        id: DocId,
        document: &str,
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> SearchResult<()> {
        let words = self.split_into_words_no_stop(document);
        self.index.add_document(id, &words, status, ratings)
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    pub fn document_id_at(&self, index: i64) -> SearchResult<DocId> {
        self.index.document_id_at(index)
    }

    /// Ids in the order their documents were added.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.index.document_ids()
    }

    /// Rating and status recorded for `id`.
    pub fn document_data(&self, id: DocId) -> Option<DocumentData> {
        self.index.document(id).copied()
    }

    pub fn word_frequencies(&self, id: DocId) -> BTreeMap<&str, f64> {
        self.index.word_frequencies(id)
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> SearchResult<Vec<ScoredDocument>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> SearchResult<Vec<ScoredDocument>> {
        self.find_top_documents_with(raw_query, |_, document_status, _| document_status == status)
    }

    /// Rank documents accepted by `predicate(id, status, rating)`.
    ///
    /// Results are ordered by relevance, then rating when relevances are within
    /// the configured epsilon, and cut to `max_result_count`.
    pub fn find_top_documents_with<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> SearchResult<Vec<ScoredDocument>>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool,
    {
        let query = self.parse_query(raw_query)?;
        let mut matched = self.find_all_documents(&query, predicate);
        let hits = matched.len();
        sort_by_relevance(&mut matched, self.config.relevance_epsilon);
        matched.truncate(self.config.max_result_count);
        tracing::debug!(
            plus = query.plus_words.len(),
            minus = query.minus_words.len(),
            hits,
            returned = matched.len(),
            "query ranked"
        );
        Ok(matched)
    }

    /// Plus words of `raw_query` found in document `id`, plus its status.
    ///
    /// The word list is empty when any minus word occurs in the document.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> SearchResult<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let status = self
            .index
            .document(id)
            .map(|data| data.status)
            .ok_or(SearchError::UnknownDocument(id))?;

        if query.minus_words.iter().any(|word| self.index.contains(word, id)) {
            return Ok((Vec::new(), status));
        }
        let matched = query
            .plus_words
            .into_iter()
            .filter(|word| self.index.contains(word, id))
            .collect();
        Ok((matched, status))
    }

    pub fn parse_query(&self, raw_query: &str) -> SearchResult<Query> {
        Query::parse(raw_query, &self.stop_words)
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Vec<&'a str> {
        split_into_words(text)
            .into_iter()
            .filter(|word| !self.stop_words.contains(word))
            .collect()
    }

    fn find_all_documents<P>(&self, query: &Query, predicate: P) -> Vec<ScoredDocument>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool,
    {
        let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = self.index.inverse_document_freq(postings);
            tracing::trace!(word = %word, idf, docs = postings.len(), "plus word");
            for (&id, &term_freq) in postings {
                let Some(data) = self.index.document(id) else {
                    continue;
                };
                if predicate(id, data.status, data.rating) {
                    *document_to_relevance.entry(id).or_insert(0.0) += idf * term_freq;
                }
            }
        }

        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for id in postings.keys() {
                    document_to_relevance.remove(id);
                }
            }
        }

        document_to_relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.index
                    .document(id)
                    .map(|data| ScoredDocument { id, relevance, rating: data.rating })
            })
            .collect()
    }
}

/// Sort by relevance descending; runs of relevances whose neighbours differ by
/// less than `epsilon` are ordered by rating descending. Stable, so remaining
/// ties keep ascending id order.
fn sort_by_relevance(documents: &mut [ScoredDocument], epsilon: f64) {
    documents.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));
    let mut start = 0;
    while start < documents.len() {
        let mut end = start + 1;
        while end < documents.len()
            && (documents[end - 1].relevance - documents[end].relevance).abs() < epsilon
        {
            end += 1;
        }
        documents[start..end].sort_by(|lhs, rhs| match rhs.rating.cmp(&lhs.rating) {
            Ordering::Equal => lhs.id.cmp(&rhs.id),
            other => other,
        });
        start = end;
    }
}
