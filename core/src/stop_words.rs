use crate::error::{Result, SearchError};
use crate::tokenizer::{contains_special_chars, split_words};
use std::collections::BTreeSet;

/// Case-sensitive set of words excluded from indexing and querying.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: BTreeSet<String>,
}

impl StopWordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from a space-delimited list.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::try_from_words(split_words(text))
    }

    /// Builds the set from any collection of words. Empty words are ignored.
    pub fn try_from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for word in words {
            set.add(word.as_ref())?;
        }
        Ok(set)
    }

    pub fn add(&mut self, word: &str) -> Result<()> {
        if word.is_empty() {
            return Ok(());
        }
        if contains_special_chars(word) {
            return Err(SearchError::Configuration(format!(
                "stop-word {word:?} contains control characters"
            )));
        }
        self.words.insert(word.to_owned());
        Ok(())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
