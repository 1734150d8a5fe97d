use crate::document::{Document, DocumentFilter, ExecutionMode};
use crate::engine::SearchEngine;
use crate::error::Result;
use rayon::prelude::*;

/// Runs every query with the default filter on the rayon pool. Results keep
/// the order of `queries`; the first failing query fails the batch.
pub fn process_queries<S>(engine: &SearchEngine, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| {
            engine.find_top_documents(
                ExecutionMode::Sequential,
                query.as_ref(),
                DocumentFilter::default(),
            )
        })
        .collect()
}

/// Like [`process_queries`], flattened in query order.
pub fn process_queries_joined<S>(engine: &SearchEngine, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(engine, queries)?.into_iter().flatten().collect())
}
