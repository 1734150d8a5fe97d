use crate::document::{DocId, ExecutionMode};
use crate::engine::SearchEngine;
use std::collections::{BTreeSet, HashSet};

/// Removes every document whose term set (ignoring frequencies) equals that
/// of a lower-id document. Returns the removed ids in ascending order.
pub fn remove_duplicates(engine: &mut SearchEngine) -> Vec<DocId> {
    let duplicates: Vec<DocId> = {
        let mut seen: HashSet<BTreeSet<&str>> = HashSet::new();
        engine
            .document_ids()
            .filter(|&id| !seen.insert(engine.word_frequencies(id).into_keys().collect()))
            .collect()
    };

    let mut removed = Vec::with_capacity(duplicates.len());
    for id in duplicates {
        match engine.remove_document(ExecutionMode::Sequential, id) {
            Ok(()) => {
                tracing::info!(doc_id = id, "found duplicate document");
                removed.push(id);
            }
            Err(err) => tracing::warn!(doc_id = id, %err, "failed to remove duplicate"),
        }
    }
    removed
}
