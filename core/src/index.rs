use crate::document::{DocId, DocumentStatus, ExecutionMode};
use crate::error::{Result, SearchError};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};

pub type TermId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocMeta {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Bidirectional term/document index.
///
/// Term text is interned once into `terms`; both directions refer to terms by
/// `TermId`. `postings[t]` maps doc id to the term frequency of `t` in that
/// document and `doc_terms[d]` holds the same pairs keyed the other way.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    dictionary: HashMap<String, TermId>,
    terms: Vec<String>,
    postings: Vec<BTreeMap<DocId, f64>>,
    doc_terms: BTreeMap<DocId, BTreeMap<TermId, f64>>,
    docs: BTreeMap<DocId, DocMeta>,
    num_docs: usize,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.docs.contains_key(&id)
    }

    pub fn meta(&self, id: DocId) -> Option<DocMeta> {
        self.docs.get(&id).copied()
    }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.docs.keys().copied()
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    pub fn term_text(&self, term_id: TermId) -> &str {
        &self.terms[term_id as usize]
    }

    /// Live postings of `term`; `None` if no live document contains it.
    pub fn postings(&self, term: &str) -> Option<&BTreeMap<DocId, f64>> {
        let tid = self.term_id(term)?;
        self.postings.get(tid as usize).filter(|p| !p.is_empty())
    }

    /// Term ids of a document with their frequencies, ascending by id.
    pub fn doc_terms(&self, id: DocId) -> Option<&BTreeMap<TermId, f64>> {
        self.doc_terms.get(&id)
    }

    /// Inserts a document whose stop-words have already been removed.
    ///
    /// Validation of the id and text is the caller's job; the only check here
    /// is that at least one term is present.
    pub fn insert<'t, I>(&mut self, id: DocId, words: I, meta: DocMeta) -> Result<()>
    where
        I: IntoIterator<Item = &'t str>,
    {
        if self.docs.contains_key(&id) {
            return Err(SearchError::invalid_input(format!("document {id} already exists")));
        }
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        let mut total = 0u32;
        for word in words {
            *counts.entry(word).or_insert(0) += 1;
            total += 1;
        }
        if total == 0 {
            return Err(SearchError::EmptyDocument { id });
        }

        let mut reverse = BTreeMap::new();
        for (word, count) in counts {
            let tid = self.intern(word);
            let tf = f64::from(count) / f64::from(total);
            self.postings[tid as usize].insert(id, tf);
            reverse.insert(tid, tf);
        }
        self.doc_terms.insert(id, reverse);
        self.docs.insert(id, meta);
        self.num_docs += 1;
        Ok(())
    }

    /// Removes a document from both directions, visiting only the posting
    /// lists named by its reverse entry.
    pub fn remove(&mut self, id: DocId, mode: ExecutionMode) -> Result<()> {
        let reverse = self
            .doc_terms
            .remove(&id)
            .ok_or_else(|| SearchError::document_not_found(id))?;
        if mode == ExecutionMode::Parallel {
            let term_ids: Vec<usize> = reverse.keys().map(|t| *t as usize).collect();
            select_disjoint_mut(&mut self.postings, &term_ids)
                .into_par_iter()
                .for_each(|list| {
                    list.remove(&id);
                });
        } else {
            for tid in reverse.keys() {
                self.postings[*tid as usize].remove(&id);
            }
        }
        self.docs.remove(&id);
        self.num_docs -= 1;
        Ok(())
    }

    /// `ln(N / df)` over live documents.
    pub fn inverse_document_frequency(&self, term: &str) -> Result<f64> {
        let postings = self
            .postings(term)
            .ok_or_else(|| SearchError::term_not_found(term))?;
        Ok(idf(self.num_docs, postings.len()))
    }

    fn intern(&mut self, word: &str) -> TermId {
        if let Some(&tid) = self.dictionary.get(word) {
            return tid;
        }
        let tid = self.terms.len() as TermId;
        self.dictionary.insert(word.to_owned(), tid);
        self.terms.push(word.to_owned());
        self.postings.push(BTreeMap::new());
        tid
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        for (tid, list) in self.postings.iter().enumerate() {
            for (doc, tf) in list {
                assert_eq!(self.doc_terms[doc].get(&(tid as TermId)), Some(tf));
            }
        }
        for (doc, reverse) in &self.doc_terms {
            for (tid, tf) in reverse {
                assert_eq!(self.postings[*tid as usize].get(doc), Some(tf));
            }
        }
        assert_eq!(self.docs.len(), self.num_docs);
        assert_eq!(self.doc_terms.len(), self.num_docs);
    }
}

#[inline]
pub(crate) fn idf(num_docs: usize, doc_freq: usize) -> f64 {
    (num_docs as f64 / doc_freq as f64).ln()
}

/// Borrows the elements at strictly ascending `indices` mutably at once.
fn select_disjoint_mut<'a, T>(mut slice: &'a mut [T], indices: &[usize]) -> Vec<&'a mut T> {
    let mut selected = Vec::with_capacity(indices.len());
    let mut offset = 0;
    for &index in indices {
        let (_, tail) = std::mem::take(&mut slice).split_at_mut(index - offset);
        let Some((item, rest)) = tail.split_first_mut() else {
            break;
        };
        selected.push(item);
        slice = rest;
        offset = index + 1;
    }
    selected
}
