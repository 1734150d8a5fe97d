use crate::error::{Result, SearchError};
use crate::stop_words::StopWordSet;
use crate::tokenizer::{contains_special_chars, split_words};
use std::collections::BTreeSet;

/// A parsed query. Both sets are sorted and free of stop-words; a term may
/// appear in both, in which case exclusion wins at ranking time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'q> {
    pub plus: BTreeSet<&'q str>,
    pub minus: BTreeSet<&'q str>,
}

impl Query<'_> {
    pub fn is_empty(&self) -> bool {
        self.plus.is_empty() && self.minus.is_empty()
    }
}

/// Parses raw query text.
///
/// A leading `-` marks an excluded term. A bare `-` or a term starting with
/// `--` fails the whole query, as does any control character.
pub fn parse_query<'q>(text: &'q str, stop_words: &StopWordSet) -> Result<Query<'q>> {
    if contains_special_chars(text) {
        return Err(SearchError::invalid_input("query contains control characters"));
    }
    let mut query = Query::default();
    for word in split_words(text) {
        let (term, is_minus) = match word.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (word, false),
        };
        if term.is_empty() || term.starts_with('-') {
            return Err(SearchError::invalid_input(format!("malformed minus term {word:?}")));
        }
        if stop_words.contains(term) {
            continue;
        }
        if is_minus {
            query.minus.insert(term);
        } else {
            query.plus.insert(term);
        }
    }
    Ok(query)
}
