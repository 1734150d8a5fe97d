use serde::{Deserialize, Serialize};
use std::fmt;

pub type DocId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Active,
    Irrelevant,
    Banned,
    Removed,
}

/// A ranked search hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl Document {
    pub fn new(id: DocId, relevance: f64, rating: i32) -> Self {
        Self { id, relevance, rating }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Plus-terms of a query found in one document, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched_terms: Vec<String>,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

type Predicate<'a> = dyn Fn(DocId, DocumentStatus, i32) -> bool + Send + Sync + 'a;

/// Decides which documents may appear in a ranking.
pub enum DocumentFilter<'a> {
    Status(DocumentStatus),
    Predicate(Box<Predicate<'a>>),
}

impl<'a> DocumentFilter<'a> {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool + Send + Sync + 'a,
    {
        DocumentFilter::Predicate(Box::new(f))
    }

    pub fn accepts(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool {
        match self {
            DocumentFilter::Status(wanted) => *wanted == status,
            DocumentFilter::Predicate(f) => f(id, status, rating),
        }
    }
}

impl Default for DocumentFilter<'_> {
    fn default() -> Self {
        DocumentFilter::Status(DocumentStatus::Active)
    }
}

impl From<DocumentStatus> for DocumentFilter<'_> {
    fn from(status: DocumentStatus) -> Self {
        DocumentFilter::Status(status)
    }
}

impl fmt::Debug for DocumentFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFilter::Status(status) => f.debug_tuple("Status").field(status).finish(),
            DocumentFilter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
