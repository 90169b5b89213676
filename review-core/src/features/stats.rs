//! Corpus-wide statistics.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

/// Insertion-ordered counter keyed by string.
pub type OrderedCounts = IndexMap<String, u64, FxBuildHasher>;

/// A snapshot of corpus statistics after a run.
///
/// Both tables keep keys in first-seen order, so exports are deterministic
/// for a given input order. Equality compares counts only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    /// Number of reviews folded in.
    pub num_reviews: usize,
    /// Occurrences of every filtered token, case as produced by the tokenizer.
    pub word_frequency: OrderedCounts,
    /// How many reviews had each label as their second category,
    /// including the `"None"` placeholder.
    pub secondary_category_distribution: OrderedCounts,
}

impl CorpusStats {
    /// Total number of filtered tokens across the corpus.
    pub fn total_words(&self) -> u64 {
        self.word_frequency.values().sum()
    }

    /// Number of distinct words.
    pub fn distinct_words(&self) -> usize {
        self.word_frequency.len()
    }

    /// Occurrences of one word (exact case).
    pub fn word_count(&self, word: &str) -> u64 {
        self.word_frequency.get(word).copied().unwrap_or(0)
    }

    /// Reviews whose second category was `label`.
    pub fn secondary_count(&self, label: &str) -> u64 {
        self.secondary_category_distribution
            .get(label)
            .copied()
            .unwrap_or(0)
    }

    /// The `n` most frequent words, count descending, first-seen on ties.
    pub fn top_words(&self, n: usize) -> Vec<(&str, u64)> {
        let mut words: Vec<(&str, u64)> = self
            .word_frequency
            .iter()
            .map(|(w, &c)| (w.as_str(), c))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1));
        words.truncate(n);
        words
    }

    /// Secondary categories with their review counts, in first-seen order.
    pub fn secondary_categories(&self) -> impl Iterator<Item = (&str, u64)> {
        self.secondary_category_distribution
            .iter()
            .map(|(l, &c)| (l.as_str(), c))
    }
}

impl core::fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} reviews, {} words ({} distinct), {} secondary categories",
            self.num_reviews,
            self.total_words(),
            self.distinct_words(),
            self.secondary_category_distribution.len()
        )
    }
}
