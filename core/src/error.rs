use crate::DocId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Control characters, a negative or duplicate id, or malformed query syntax.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Every token of the document was a stop-word.
    #[error("document {id} has no terms left after stop-word removal")]
    EmptyDocument { id: DocId },

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl SearchError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        SearchError::InvalidInput(message.into())
    }

    pub fn document_not_found(id: DocId) -> Self {
        SearchError::NotFound(format!("document {id}"))
    }

    pub fn term_not_found(term: &str) -> Self {
        SearchError::NotFound(format!("term {term:?}"))
    }
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
