//! Text analysis stages.
//!
//! This module provides the per-review text processing components:
//! - **Cleaner**: Replaces characters outside the kept alphabet with spaces
//! - **Sentence**: Splits cleaned text on `.`, `!` and `?`
//! - **Tokenizer**: Splits cleaned text into word and punctuation tokens
//! - **Stop words**: Drops tokens found in a case-insensitive stop-word set
//! - **Tagger**: Assigns a Penn Treebank style category to each token

pub mod cleaner;
pub mod sentence;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;

pub use cleaner::TextCleaner;
pub use sentence::{SentenceSegmenter, Sentences};
pub use stopwords::StopWordFilter;
pub use tagger::LexiconTagger;
pub use tokenizer::EnglishTokenizer;
