use crate::index::DocId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("negative document id {0}")]
    NegativeId(DocId),
    #[error("document id {0} has already been added")]
    DuplicateId(DocId),
    #[error("invalid characters in document word {0:?}")]
    InvalidWord(String),
    #[error("invalid characters in stop word {0:?}")]
    InvalidStopWord(String),
    #[error("invalid query word {0:?}")]
    InvalidQuery(String),
    #[error("document index {index} is out of range for {count} added documents")]
    IndexOutOfRange { index: i64, count: usize },
    #[error("unknown document id {0}")]
    UnknownDocument(DocId),
}

pub type SearchResult<T> = Result<T, SearchError>;
