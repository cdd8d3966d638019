//! Ranking defaults and the runtime configuration injected into a server.

use serde::{Deserialize, Serialize};

/// Number of documents returned by a top-documents query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are treated as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results kept after sorting. Zero yields empty result lists.
    pub max_result_count: usize,
    pub relevance_epsilon: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_result_count: MAX_RESULT_DOCUMENT_COUNT,
            relevance_epsilon: RELEVANCE_EPSILON,
        }
    }
}

impl SearchConfig {
    pub fn with_max_result_count(mut self, max_result_count: usize) -> Self {
        self.max_result_count = max_result_count;
        self
    }

    pub fn with_relevance_epsilon(mut self, relevance_epsilon: f64) -> Self {
        self.relevance_epsilon = relevance_epsilon;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = SearchConfig::default();
        assert_eq!(config.max_result_count, 5);
        assert_eq!(config.relevance_epsilon, RELEVANCE_EPSILON);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"max_result_count": 2}"#).unwrap();
        assert_eq!(config.max_result_count, 2);
        assert_eq!(config.relevance_epsilon, RELEVANCE_EPSILON);
    }
}
