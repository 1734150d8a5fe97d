use crate::aggregator::ShardedAggregator;
use crate::document::{DocId, Document, DocumentFilter, ExecutionMode};
use crate::index::{idf, InvertedIndex};
use crate::query::Query;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
pub const RELEVANCE_PRECISION: f64 = 1e-6;
/// Relevance written over any document hit by a minus-term in parallel mode.
pub const EXCLUDED_SENTINEL: f64 = -10.0;

/// Scores every document that contains a plus-term, contains no minus-term
/// and passes `filter`. Output is ordered by document id.
pub fn find_all_documents(
    index: &InvertedIndex,
    query: &Query<'_>,
    filter: &DocumentFilter<'_>,
    mode: ExecutionMode,
) -> Vec<Document> {
    match mode {
        ExecutionMode::Sequential => find_all_sequential(index, query, filter),
        ExecutionMode::Parallel => find_all_parallel(index, query, filter),
    }
}

fn find_all_sequential(
    index: &InvertedIndex,
    query: &Query<'_>,
    filter: &DocumentFilter<'_>,
) -> Vec<Document> {
    let mut excluded = BTreeSet::new();
    for term in &query.minus {
        if let Some(postings) = index.postings(term) {
            excluded.extend(postings.keys().copied());
        }
    }

    let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
    for term in &query.plus {
        let Some(postings) = index.postings(term) else {
            continue;
        };
        let term_idf = idf(index.num_docs(), postings.len());
        for (&id, &tf) in postings {
            if excluded.contains(&id) || !accepts(index, filter, id) {
                continue;
            }
            *relevance.entry(id).or_insert(0.0) += term_idf * tf;
        }
    }

    collect_documents(index, relevance)
}

fn find_all_parallel(
    index: &InvertedIndex,
    query: &Query<'_>,
    filter: &DocumentFilter<'_>,
) -> Vec<Document> {
    let relevance: ShardedAggregator<DocId, f64> = ShardedAggregator::default();
    let plus: Vec<&str> = query.plus.iter().copied().collect();
    let minus: Vec<&str> = query.minus.iter().copied().collect();

    plus.par_iter().for_each(|term| {
        let Some(postings) = index.postings(term) else {
            return;
        };
        let term_idf = idf(index.num_docs(), postings.len());
        for (&id, &tf) in postings {
            if accepts(index, filter, id) {
                *relevance.access(id) += term_idf * tf;
            }
        }
    });

    // Runs after every plus-term has been folded in, so the sentinel is final.
    minus.par_iter().for_each(|term| {
        if let Some(postings) = index.postings(term) {
            for &id in postings.keys() {
                *relevance.access(id) = EXCLUDED_SENTINEL;
            }
        }
    });

    let merged = relevance
        .into_map()
        .into_iter()
        .filter(|(_, value)| *value >= 0.0)
        .collect();
    collect_documents(index, merged)
}

fn accepts(index: &InvertedIndex, filter: &DocumentFilter<'_>, id: DocId) -> bool {
    index
        .meta(id)
        .is_some_and(|meta| filter.accepts(id, meta.status, meta.rating))
}

fn collect_documents(index: &InvertedIndex, relevance: BTreeMap<DocId, f64>) -> Vec<Document> {
    relevance
        .into_iter()
        .filter_map(|(id, value)| index.meta(id).map(|meta| Document::new(id, value, meta.rating)))
        .collect()
}

/// Relevance descending; within `RELEVANCE_PRECISION`, rating descending.
pub fn compare_documents(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_PRECISION {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance.total_cmp(&lhs.relevance)
    }
}

/// Orders documents by `compare_documents` and keeps the best
/// `MAX_RESULT_DOCUMENT_COUNT`.
///
/// The tolerance comparison is not transitive, so it is never handed to the
/// sort directly: documents are sorted by exact relevance first, then every
/// run of neighbours closer than `RELEVANCE_PRECISION` is re-sorted by rating.
pub fn top_documents(mut documents: Vec<Document>) -> Vec<Document> {
    documents.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));
    let mut start = 0;
    while start < documents.len() {
        let mut end = start + 1;
        while end < documents.len()
            && (documents[end - 1].relevance - documents[end].relevance).abs() < RELEVANCE_PRECISION
        {
            end += 1;
        }
        documents[start..end].sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating));
        start = end;
    }
    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
    documents
}
