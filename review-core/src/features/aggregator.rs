//! Corpus aggregation.
//!
//! The aggregator is an explicit accumulator owned by one pipeline run.
//! Folding is purely additive: the final counts do not depend on the order
//! reviews are folded in, only the first-seen key order of the tables does.

use review_types::{CategoryRank, Token};

use crate::features::extractor::Extraction;
use crate::features::stats::CorpusStats;

/// Running word frequency and secondary-category distribution.
#[derive(Debug, Clone, Default)]
pub struct CorpusAggregator {
    stats: CorpusStats,
}

impl CorpusAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one review's extraction into the running totals.
    #[inline]
    pub fn fold(&mut self, extraction: &Extraction) {
        self.fold_parts(&extraction.filtered, &extraction.features.top_category_2);
    }

    /// Folds a review given its filtered tokens and second category.
    ///
    /// Every token occurrence counts once; the second category counts once
    /// per review, the `"None"` placeholder included.
    pub fn fold_parts(&mut self, filtered: &[Token], top_category_2: &CategoryRank) {
        for token in filtered {
            bump(&mut self.stats.word_frequency, token, 1);
        }
        bump(
            &mut self.stats.secondary_category_distribution,
            &top_category_2.label,
            1,
        );
        self.stats.num_reviews += 1;
    }

    /// Adds the totals of another aggregator.
    ///
    /// Keys new to `self` are appended in `other`'s order, so merging
    /// partials in input order reproduces a sequential fold exactly.
    pub fn merge(&mut self, other: CorpusAggregator) {
        let other = other.stats;
        for (word, count) in other.word_frequency {
            bump(&mut self.stats.word_frequency, &word, count);
        }
        for (label, count) in other.secondary_category_distribution {
            bump(&mut self.stats.secondary_category_distribution, &label, count);
        }
        self.stats.num_reviews += other.num_reviews;
    }

    /// Current totals.
    pub fn snapshot(&self) -> &CorpusStats {
        &self.stats
    }

    /// Consumes the aggregator and returns the final statistics.
    pub fn finish(self) -> CorpusStats {
        self.stats
    }
}

#[inline]
fn bump(table: &mut crate::features::stats::OrderedCounts, key: &str, by: u64) {
    match table.get_mut(key) {
        Some(count) => *count += by,
        None => {
            table.insert(key.to_owned(), by);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_types::ReviewFeatures;

    fn extraction(words: &[&str], second: CategoryRank) -> Extraction {
        Extraction {
            features: ReviewFeatures {
                word_count: words.len(),
                sentence_count: 1,
                top_category_1: CategoryRank::new("NN", 1),
                top_category_2: second,
            },
            filtered: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn starts_empty() {
        let stats = CorpusAggregator::new().finish();
        assert_eq!(stats.num_reviews, 0);
        assert!(stats.word_frequency.is_empty());
        assert!(stats.secondary_category_distribution.is_empty());
    }

    #[test]
    fn every_occurrence_counts() {
        let mut agg = CorpusAggregator::new();
        agg.fold(&extraction(&["good", "good", "phone"], CategoryRank::new("JJ", 1)));
        let stats = agg.finish();
        assert_eq!(stats.word_count("good"), 2);
        assert_eq!(stats.word_count("phone"), 1);
        assert_eq!(stats.total_words(), 3);
    }

    #[test]
    fn no_case_folding() {
        let mut agg = CorpusAggregator::new();
        agg.fold(&extraction(&["Great", "great"], CategoryRank::none()));
        let stats = agg.finish();
        assert_eq!(stats.word_count("Great"), 1);
        assert_eq!(stats.word_count("great"), 1);
    }

    #[test]
    fn none_is_a_bucket() {
        let mut agg = CorpusAggregator::new();
        agg.fold(&extraction(&[], CategoryRank::none()));
        agg.fold(&extraction(&["ok"], CategoryRank::none()));
        agg.fold(&extraction(&["a", "b"], CategoryRank::new("VB", 1)));
        let stats = agg.finish();
        assert_eq!(stats.secondary_count("None"), 2);
        assert_eq!(stats.secondary_count("VB"), 1);
        assert_eq!(stats.num_reviews, 3);
    }

    #[test]
    fn total_equals_sum_of_filtered_lengths() {
        let reviews = [
            extraction(&["a", "b", "c"], CategoryRank::new("VB", 1)),
            extraction(&[], CategoryRank::none()),
            extraction(&["a", "d"], CategoryRank::new("JJ", 1)),
        ];
        let mut agg = CorpusAggregator::new();
        for r in &reviews {
            agg.fold(r);
        }
        let expected: usize = reviews.iter().map(|r| r.filtered.len()).sum();
        assert_eq!(agg.snapshot().total_words(), expected as u64);
    }

    #[test]
    fn fold_order_does_not_change_counts() {
        let reviews = [
            extraction(&["x", "y"], CategoryRank::new("VB", 1)),
            extraction(&["y", "z"], CategoryRank::new("JJ", 1)),
            extraction(&["x"], CategoryRank::none()),
        ];

        let mut forward = CorpusAggregator::new();
        reviews.iter().for_each(|r| forward.fold(r));
        let mut backward = CorpusAggregator::new();
        reviews.iter().rev().for_each(|r| backward.fold(r));

        assert_eq!(forward.finish(), backward.finish());
    }

    #[test]
    fn merge_matches_sequential_fold() {
        let reviews = [
            extraction(&["x", "y"], CategoryRank::new("VB", 1)),
            extraction(&["y", "z"], CategoryRank::new("JJ", 1)),
            extraction(&["w"], CategoryRank::none()),
            extraction(&["x"], CategoryRank::new("VB", 1)),
        ];

        let mut sequential = CorpusAggregator::new();
        reviews.iter().for_each(|r| sequential.fold(r));

        let mut left = CorpusAggregator::new();
        reviews[..2].iter().for_each(|r| left.fold(r));
        let mut right = CorpusAggregator::new();
        reviews[2..].iter().for_each(|r| right.fold(r));
        left.merge(right);

        let a = sequential.finish();
        let b = left.finish();
        assert_eq!(a, b);
        let a_keys: Vec<_> = a.word_frequency.keys().collect();
        let b_keys: Vec<_> = b.word_frequency.keys().collect();
        assert_eq!(a_keys, b_keys);
        assert_eq!(b.num_reviews, 4);
    }
}
