//! Stop-word filtering
//!
//! Removes high-frequency function words before tagging and counting. The
//! default list is the NLTK English list shipped by the `stop-words` crate.
//! Matching is case-insensitive: a token is dropped iff its lowercase form is
//! in the set. The set is built once per run and never changes afterwards.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use review_types::{PipelineError, Token};
use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Immutable, case-insensitive stop-word set.
#[derive(Debug, Clone)]
pub struct StopWordFilter {
    /// Lowercase stop words.
    stop_words: FxHashSet<String>,
}

impl Default for StopWordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopWordFilter {
    /// The NLTK English stop-word list.
    pub fn english() -> Self {
        let stop_words = get(LANGUAGE::English)
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        Self { stop_words }
    }

    /// An empty filter that keeps every token.
    pub fn empty() -> Self {
        Self {
            stop_words: FxHashSet::default(),
        }
    }

    /// A filter over a custom word list.
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        Self::empty().with_words(words)
    }

    /// Adds words to the set while the filter is being built.
    pub fn with_words<S: AsRef<str>>(mut self, words: &[S]) -> Self {
        self.stop_words
            .extend(words.iter().map(|w| w.as_ref().trim().to_lowercase()));
        self.stop_words.remove("");
        self
    }

    /// Adds the words of a newline-separated file. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn with_file(self, path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| PipelineError::Resource {
            path: path.to_path_buf(),
            source,
        })?;
        let words: Vec<&str> = contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();
        Ok(self.with_words(&words))
    }

    /// Checks whether a token is a stop word, ignoring case.
    #[inline]
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(lowercase(token).as_ref())
    }

    /// Drops stop words, keeping the order of the remaining tokens.
    #[inline]
    pub fn filter(&self, mut tokens: Vec<Token>) -> Vec<Token> {
        tokens.retain(|t| !self.is_stop_word(t));
        tokens
    }

    /// Number of stop words in the set.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

/// Lowercases without allocating when the token has no uppercase ASCII and
/// no non-ASCII bytes.
#[inline]
fn lowercase(token: &str) -> Cow<'_, str> {
    if token.bytes().all(|b| b.is_ascii() && !b.is_ascii_uppercase()) {
        Cow::Borrowed(token)
    } else {
        Cow::Owned(token.to_lowercase())
    }
}
