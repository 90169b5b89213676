//! Core types and traits for the review feature pipeline.
//!
//! This crate provides the fundamental types that are shared across
//! the workspace. Keeping types separate ensures:
//!
//! - **Stable records**: Input and output rows have one definition
//! - **Cross-crate compatibility**: Core and CLI share the same types
//! - **Pluggable models**: Tokenizer and tagger capabilities are plain traits

#![warn(missing_docs)]

use core::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A word-like unit produced by a tokenizer. Only the surface string is kept.
pub type Token = String;

/// Label used for an absent category slot.
pub const NONE_LABEL: &str = "None";

/// Number of words handed to the word cloud by default.
pub const DEFAULT_TOP_WORDS: usize = 50;

/// One customer review as read from the input table.
///
/// The rating is opaque to the pipeline and carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReview {
    /// Rating cell as found in the input, if any.
    pub rating: Option<String>,
    /// Free review text.
    pub text: String,
}

impl RawReview {
    /// Creates a review from a rating and its text.
    pub fn new(rating: Option<String>, text: impl Into<String>) -> Self {
        Self {
            rating,
            text: text.into(),
        }
    }
}

/// A filtered token paired with its grammatical category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedToken {
    /// Surface string of the token.
    pub token: Token,
    /// Category label (Penn Treebank tags for the default tagger).
    pub category: String,
}

impl TaggedToken {
    /// Creates a tagged token.
    pub fn new(token: impl Into<Token>, category: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            category: category.into(),
        }
    }
}

/// A category label with its occurrence count inside one review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryRank {
    /// Category label, or [`NONE_LABEL`] for an empty slot.
    pub label: String,
    /// Number of tagged tokens carrying the label.
    pub count: u32,
}

impl CategoryRank {
    /// Creates a rank entry.
    pub fn new(label: impl Into<String>, count: u32) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }

    /// The `("None", 0)` placeholder for a missing slot.
    pub fn none() -> Self {
        Self::new(NONE_LABEL, 0)
    }

    /// Returns true for the placeholder slot.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.count == 0 && self.label == NONE_LABEL
    }
}

impl Default for CategoryRank {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for CategoryRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.count)
    }
}

/// Linguistic features derived from one review.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewFeatures {
    /// Number of tokens left after stop-word removal.
    pub word_count: usize,
    /// Number of sentences in the cleaned, unfiltered text.
    pub sentence_count: usize,
    /// Most frequent category.
    pub top_category_1: CategoryRank,
    /// Second most frequent category.
    pub top_category_2: CategoryRank,
}

/// One output row: the input review joined with its features.
///
/// Field names serialize to the column headers of the result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Rating passed through from the input.
    #[serde(rename = "Rating")]
    pub rating: Option<String>,
    /// Review text as read from the input.
    #[serde(rename = "Review")]
    pub review: String,
    /// Filtered word count.
    #[serde(rename = "Number of Words")]
    pub number_of_words: usize,
    /// Sentence count.
    #[serde(rename = "Number of Sentences")]
    pub number_of_sentences: usize,
    /// Label of the most frequent category.
    #[serde(rename = "Most Common POS Tag 1")]
    pub most_common_pos_tag_1: String,
    /// Occurrences of the most frequent category.
    #[serde(rename = "Occurrences 1")]
    pub occurrences_1: u32,
    /// Label of the second most frequent category.
    #[serde(rename = "Most Common POS Tag 2")]
    pub most_common_pos_tag_2: String,
    /// Occurrences of the second most frequent category.
    #[serde(rename = "Occurrences 2")]
    pub occurrences_2: u32,
}

impl ResultRecord {
    /// Joins a review with the features extracted from it.
    pub fn new(review: RawReview, features: ReviewFeatures) -> Self {
        let ReviewFeatures {
            word_count,
            sentence_count,
            top_category_1,
            top_category_2,
        } = features;

        Self {
            rating: review.rating,
            review: review.text,
            number_of_words: word_count,
            number_of_sentences: sentence_count,
            most_common_pos_tag_1: top_category_1.label,
            occurrences_1: top_category_1.count,
            most_common_pos_tag_2: top_category_2.label,
            occurrences_2: top_category_2.count,
        }
    }
}

/// Pipeline run options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// How many of the most frequent words to hand to the word cloud.
    pub top_words: usize,
    /// Whether per-review extraction runs on the rayon pool.
    /// Output is identical either way.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_words: DEFAULT_TOP_WORDS,
            parallel: false,
        }
    }
}

impl PipelineConfig {
    /// Single-threaded configuration.
    pub const fn sequential() -> Self {
        Self {
            top_words: DEFAULT_TOP_WORDS,
            parallel: false,
        }
    }

    /// Data-parallel extraction with an ordered reduce.
    pub const fn parallel() -> Self {
        Self {
            top_words: DEFAULT_TOP_WORDS,
            parallel: true,
        }
    }

    /// Overrides the word cloud size.
    pub const fn with_top_words(mut self, top_words: usize) -> Self {
        self.top_words = top_words;
        self
    }
}

/// Errors that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// An input record had no review text.
    #[error("record {row}: missing required review text")]
    MissingText {
        /// Zero-based record index.
        row: usize,
    },
    /// The tokenizer capability could not produce tokens.
    #[error("tokenizer unavailable: {0}")]
    TokenizerUnavailable(String),
    /// The tagger capability could not produce tags.
    #[error("tagger unavailable: {0}")]
    TaggerUnavailable(String),
    /// The tagger returned a different number of tags than tokens.
    #[error("tagger returned {actual} tags for {expected} tokens")]
    TagCountMismatch {
        /// Number of tokens submitted.
        expected: usize,
        /// Number of tags returned.
        actual: usize,
    },
    /// A stop-word list or lexicon file could not be read.
    #[error("failed to load {}: {source}", path.display())]
    Resource {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Splits cleaned text into word tokens.
///
/// Implementations must be deterministic for a given input.
pub trait WordTokenizer {
    /// Tokenizes `text`, preserving left-to-right order.
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, PipelineError>;
}

/// Assigns a grammatical category to each token.
///
/// Implementations must return exactly one tag per token, in input order.
pub trait PosTagger {
    /// Tags `tokens`.
    fn tag(&self, tokens: &[Token]) -> Result<Vec<TaggedToken>, PipelineError>;
}

impl<T: WordTokenizer + ?Sized> WordTokenizer for &T {
    #[inline]
    fn tokenize(&self, text: &str) -> Result<Vec<Token>, PipelineError> {
        (**self).tokenize(text)
    }
}

impl<T: PosTagger + ?Sized> PosTagger for &T {
    #[inline]
    fn tag(&self, tokens: &[Token]) -> Result<Vec<TaggedToken>, PipelineError> {
        (**self).tag(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_rank_is_placeholder() {
        let rank = CategoryRank::none();
        assert_eq!(rank.label, "None");
        assert_eq!(rank.count, 0);
        assert!(rank.is_none());
        assert!(!CategoryRank::new("NN", 2).is_none());
    }

    #[test]
    fn default_features_have_empty_slots() {
        let f = ReviewFeatures::default();
        assert_eq!(f.word_count, 0);
        assert!(f.top_category_1.is_none());
        assert!(f.top_category_2.is_none());
    }

    #[test]
    fn rank_display() {
        assert_eq!(CategoryRank::new("NN", 3).to_string(), "NN (3)");
    }

    #[test]
    fn record_joins_review_and_features() {
        let review = RawReview::new(Some("5".into()), "Great product!");
        let features = ReviewFeatures {
            word_count: 3,
            sentence_count: 1,
            top_category_1: CategoryRank::new("NN", 1),
            top_category_2: CategoryRank::new("JJ", 1),
        };

        let record = ResultRecord::new(review, features);
        assert_eq!(record.rating.as_deref(), Some("5"));
        assert_eq!(record.review, "Great product!");
        assert_eq!(record.number_of_words, 3);
        assert_eq!(record.number_of_sentences, 1);
        assert_eq!(record.most_common_pos_tag_1, "NN");
        assert_eq!(record.occurrences_1, 1);
        assert_eq!(record.most_common_pos_tag_2, "JJ");
        assert_eq!(record.occurrences_2, 1);
    }

    #[test]
    fn config_constructors() {
        assert_eq!(PipelineConfig::default(), PipelineConfig::sequential());
        assert!(PipelineConfig::parallel().parallel);
        assert_eq!(PipelineConfig::default().top_words, 50);
        assert_eq!(PipelineConfig::default().with_top_words(10).top_words, 10);
    }

    #[test]
    fn error_messages() {
        let err = PipelineError::MissingText { row: 4 };
        assert_eq!(err.to_string(), "record 4: missing required review text");

        let err = PipelineError::TagCountMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "tagger returned 2 tags for 3 tokens");
    }

    #[test]
    fn borrowed_capabilities_delegate() {
        struct Split;
        impl WordTokenizer for Split {
            fn tokenize(&self, text: &str) -> Result<Vec<Token>, PipelineError> {
                Ok(text.split_whitespace().map(str::to_owned).collect())
            }
        }

        let split = Split;
        let by_ref: &dyn WordTokenizer = &split;
        assert_eq!(by_ref.tokenize("a b").unwrap(), vec!["a", "b"]);
        assert_eq!((&split).tokenize("c").unwrap(), vec!["c"]);
    }
}
