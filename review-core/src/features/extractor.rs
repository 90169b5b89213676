//! Per-review feature extraction.

use review_types::{
    PipelineError, PosTagger, RawReview, ReviewFeatures, Token, WordTokenizer,
};
use tracing::debug;

use crate::analyzer::{
    EnglishTokenizer, LexiconTagger, SentenceSegmenter, StopWordFilter, TextCleaner,
};
use crate::features::counts::CategoryCount;

/// Features of one review plus the filtered tokens that feed the corpus
/// word frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Derived features.
    pub features: ReviewFeatures,
    /// Tokens left after stop-word removal, in order.
    pub filtered: Vec<Token>,
}

/// Composes cleaner, segmenter, tokenizer, stop-word filter and tagger.
///
/// The tokenizer and tagger are injected capabilities; defaults are the
/// rule-based English implementations.
#[derive(Debug, Clone)]
pub struct ReviewFeatureExtractor<T = EnglishTokenizer, P = LexiconTagger> {
    cleaner: TextCleaner,
    segmenter: SentenceSegmenter,
    tokenizer: T,
    stop_words: StopWordFilter,
    tagger: P,
}

impl Default for ReviewFeatureExtractor {
    fn default() -> Self {
        Self::new(
            EnglishTokenizer::new(),
            StopWordFilter::english(),
            LexiconTagger::new(),
        )
    }
}

impl<T, P> ReviewFeatureExtractor<T, P>
where
    T: WordTokenizer,
    P: PosTagger,
{
    /// Creates an extractor from its capabilities and stop-word set.
    pub fn new(tokenizer: T, stop_words: StopWordFilter, tagger: P) -> Self {
        Self {
            cleaner: TextCleaner::new(),
            segmenter: SentenceSegmenter::new(),
            tokenizer,
            stop_words,
            tagger,
        }
    }

    /// Extracts the features of one review.
    ///
    /// # Errors
    ///
    /// Only capability failures are reported: a tokenizer or tagger error, or
    /// a tagger that returns a different number of tags than tokens.
    pub fn extract(&self, review: &RawReview) -> Result<Extraction, PipelineError> {
        let cleaned = self.cleaner.clean(&review.text);

        let tokens = self.tokenizer.tokenize(&cleaned)?;
        let filtered = self.stop_words.filter(tokens);

        let tagged = self.tagger.tag(&filtered)?;
        if tagged.len() != filtered.len() {
            return Err(PipelineError::TagCountMismatch {
                expected: filtered.len(),
                actual: tagged.len(),
            });
        }

        let (top_category_1, top_category_2) = CategoryCount::from_tagged(&tagged).top_two();

        let features = ReviewFeatures {
            word_count: filtered.len(),
            sentence_count: self.segmenter.count(&cleaned),
            top_category_1,
            top_category_2,
        };

        debug!(
            words = features.word_count,
            sentences = features.sentence_count,
            top1 = %features.top_category_1,
            top2 = %features.top_category_2,
            "extracted review features"
        );

        Ok(Extraction { features, filtered })
    }
}
