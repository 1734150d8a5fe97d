use crate::document::{DocId, Document, DocumentFilter, DocumentStatus, ExecutionMode, MatchResult};
use crate::error::{Result, SearchError};
use crate::index::{DocMeta, InvertedIndex};
use crate::query::{parse_query, Query};
use crate::ranking::{find_all_documents, top_documents};
use crate::stop_words::StopWordSet;
use crate::tokenizer::{contains_special_chars, split_words};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// In-memory TF-IDF search over short documents.
///
/// Writers (`add_document`, `remove_document`) take `&mut self`; queries take
/// `&self` and may run concurrently with each other.
#[derive(Debug, Default)]
pub struct SearchEngine {
    stop_words: StopWordSet,
    index: InvertedIndex,
}

impl SearchEngine {
    pub fn new(stop_words: StopWordSet) -> Self {
        Self { stop_words, index: InvertedIndex::new() }
    }

    pub fn with_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self::new(StopWordSet::from_text(text)?))
    }

    pub fn try_with_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(StopWordSet::try_from_words(words)?))
    }

    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    pub fn document_count(&self) -> usize {
        self.index.num_docs()
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.index.doc_ids()
    }

    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::invalid_input(format!("negative document id {id}")));
        }
        if self.index.contains(id) {
            return Err(SearchError::invalid_input(format!("document {id} already exists")));
        }
        if contains_special_chars(text) {
            return Err(SearchError::invalid_input(format!(
                "document {id} contains control characters"
            )));
        }
        let words = split_words(text).filter(|word| !self.stop_words.contains(word));
        let meta = DocMeta { rating: average_rating(ratings), status };
        self.index.insert(id, words, meta)?;
        tracing::debug!(doc_id = id, ?status, rating = meta.rating, "document added");
        Ok(())
    }

    pub fn remove_document(&mut self, mode: ExecutionMode, id: DocId) -> Result<()> {
        self.index.remove(id, mode)?;
        tracing::debug!(doc_id = id, ?mode, "document removed");
        Ok(())
    }

    /// Best matches for `raw_query`, at most `MAX_RESULT_DOCUMENT_COUNT`.
    pub fn find_top_documents<'f>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        filter: impl Into<DocumentFilter<'f>>,
    ) -> Result<Vec<Document>> {
        let query = self.parse_query(raw_query)?;
        let filter = filter.into();
        Ok(top_documents(find_all_documents(&self.index, &query, &filter, mode)))
    }

    /// Which plus-terms of `raw_query` occur in document `id`. Any minus-term
    /// occurring in the document empties the list.
    pub fn match_document(&self, mode: ExecutionMode, raw_query: &str, id: DocId) -> Result<MatchResult> {
        let query = self.parse_query(raw_query)?;
        let meta = self.index.meta(id).ok_or_else(|| SearchError::document_not_found(id))?;
        let contains = |term: &&str| {
            self.index
                .term_id(term)
                .zip(self.index.doc_terms(id))
                .is_some_and(|(tid, terms)| terms.contains_key(&tid))
        };

        let matched_terms = match mode {
            ExecutionMode::Sequential => {
                if query.minus.iter().any(contains) {
                    Vec::new()
                } else {
                    query.plus.iter().filter(|t| contains(*t)).map(|t| t.to_string()).collect()
                }
            }
            ExecutionMode::Parallel => {
                let minus: Vec<&str> = query.minus.iter().copied().collect();
                if minus.par_iter().any(contains) {
                    Vec::new()
                } else {
                    let plus: Vec<&str> = query.plus.iter().copied().collect();
                    let mut matched: Vec<String> = plus
                        .par_iter()
                        .filter(|t| contains(*t))
                        .map(|t| t.to_string())
                        .collect();
                    matched.sort_unstable();
                    matched
                }
            }
        };
        Ok(MatchResult { matched_terms, status: meta.status })
    }

    /// Term frequencies of a document keyed by term text; empty when unknown.
    pub fn word_frequencies(&self, id: DocId) -> BTreeMap<&str, f64> {
        self.index
            .doc_terms(id)
            .map(|terms| {
                terms
                    .iter()
                    .map(|(tid, tf)| (self.index.term_text(*tid), *tf))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn inverse_document_frequency(&self, term: &str) -> Result<f64> {
        self.index.inverse_document_frequency(term)
    }

    pub fn parse_query<'q>(&self, raw_query: &'q str) -> Result<Query<'q>> {
        parse_query(raw_query, &self.stop_words)
    }
}

/// Integer mean truncated toward zero; 0 for no ratings.
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
