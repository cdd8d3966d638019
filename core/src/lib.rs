//! In-memory TF-IDF search over small document collections.
//!
//! Documents are split on spaces, stop words are dropped, and each remaining
//! term's frequency is stored in an inverted index. Queries combine plus words
//! (scored by `idf * tf`) with minus words (which exclude a document outright).

pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod server;
pub mod stop_words;
pub mod tokenizer;

pub use config::{SearchConfig, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use error::{SearchError, SearchResult};
pub use index::{DocId, DocumentData, DocumentStatus, InvertedIndex, Rating};
pub use query::Query;
pub use server::{ScoredDocument, SearchServer};
pub use stop_words::StopWords;
