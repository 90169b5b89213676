//! Review feature extraction.
//!
//! Turns customer review text into per-review linguistic features and
//! corpus-wide statistics:
//!
//! - [`analyzer`]: cleaning, sentence splitting, tokenizing, stop-word
//!   removal and part-of-speech tagging
//! - [`features`]: per-review extraction and the corpus aggregator
//! - [`pipeline`]: the batch driver, sequential or on the rayon pool
//!
//! ```
//! use review_core::Pipeline;
//! use review_types::RawReview;
//!
//! let pipeline: Pipeline = Pipeline::default();
//! let out = pipeline
//!     .run(vec![RawReview::new(Some("5".into()), "Great product! Loved it.")])
//!     .unwrap();
//! assert_eq!(out.records[0].number_of_sentences, 2);
//! ```

pub mod analyzer;
pub mod features;
pub mod pipeline;

pub use analyzer::{EnglishTokenizer, LexiconTagger, SentenceSegmenter, StopWordFilter, TextCleaner};
pub use features::{CorpusAggregator, CorpusStats, Extraction, ReviewFeatureExtractor};
pub use pipeline::{Pipeline, PipelineOutput};
