//! Per-review category counting with first-seen tie-breaking.

use indexmap::IndexMap;
use review_types::{CategoryRank, TaggedToken};
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

/// Occurrence count per category label, in first-seen order.
///
/// Ranking is by count descending; among equal counts the label that
/// appeared earliest wins. Iteration order of the underlying map is
/// insertion order, and ranking uses a stable sort over it, so the tie-break
/// never depends on hashing.
#[derive(Debug, Clone, Default)]
pub struct CategoryCount {
    counts: IndexMap<String, u32, FxBuildHasher>,
    total: u32,
}

impl CategoryCount {
    /// Creates an empty count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the categories of tagged tokens in order.
    pub fn from_tagged(tagged: &[TaggedToken]) -> Self {
        let mut counts = Self::new();
        for t in tagged {
            counts.add(&t.category);
        }
        counts
    }

    /// Records one occurrence of `label`.
    #[inline]
    pub fn add(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(label.to_owned(), 1);
            }
        }
        self.total += 1;
    }

    /// Occurrences of `label`, zero if never seen.
    #[inline]
    pub fn get(&self, label: &str) -> u32 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Number of distinct labels.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if nothing was counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Labels and counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(label, &count)| (label.as_str(), count))
    }

    /// The `n` most frequent labels, count descending, first-seen on ties.
    pub fn most_common(&self, n: usize) -> SmallVec<[CategoryRank; 2]> {
        let mut ranked: SmallVec<[(&str, u32); 8]> = self.iter().collect();
        // stable: equal counts keep insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(label, count)| CategoryRank::new(label, count))
            .collect()
    }

    /// The two most frequent labels, padding absent slots with `("None", 0)`.
    pub fn top_two(&self) -> (CategoryRank, CategoryRank) {
        let mut top = self.most_common(2).into_iter();
        let first = top.next().unwrap_or_else(CategoryRank::none);
        let second = top.next().unwrap_or_else(CategoryRank::none);
        (first, second)
    }
}
