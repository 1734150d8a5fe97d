use std::iter::FusedIterator;

/// Lazily splits `text` into maximal runs of non-space characters.
///
/// Only ASCII space (`' '`) separates tokens; tabs and other whitespace stay
/// inside a token. The iterator is `Clone`, so a sequence can be restarted
/// from any point without re-reading the source.
pub fn split_words(text: &str) -> Words<'_> {
    Words { rest: text }
}

#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let trimmed = self.rest.trim_start_matches(' ');
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }
        let end = trimmed.find(' ').unwrap_or(trimmed.len());
        let (word, rest) = trimmed.split_at(end);
        self.rest = rest;
        Some(word)
    }
}

impl FusedIterator for Words<'_> {}

/// True if any character is an ASCII control code (0..=31).
pub fn contains_special_chars(text: &str) -> bool {
    text.chars().any(|ch| (ch as u32) <= 31)
}
