//! The batch driver.
//!
//! A run moves every review through the extractor in input order, folds each
//! extraction into one [`CorpusAggregator`] and emits one [`ResultRecord`]
//! per review. The parallel variant only distributes extraction; the fold is
//! still an ordered reduce on the calling thread, so both variants produce
//! identical output.

use std::time::Instant;

use rayon::prelude::*;
use review_types::{
    PipelineConfig, PipelineError, PosTagger, RawReview, ResultRecord, WordTokenizer,
};
use tracing::info;

use crate::analyzer::{EnglishTokenizer, LexiconTagger};
use crate::features::{CorpusAggregator, CorpusStats, Extraction, ReviewFeatureExtractor};

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// One record per input review, in input order.
    pub records: Vec<ResultRecord>,
    /// Corpus statistics accumulated over the run.
    pub stats: CorpusStats,
}

/// Runs a [`ReviewFeatureExtractor`] over a batch of reviews.
#[derive(Debug, Clone)]
pub struct Pipeline<T = EnglishTokenizer, P = LexiconTagger> {
    extractor: ReviewFeatureExtractor<T, P>,
    config: PipelineConfig,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ReviewFeatureExtractor::default(), PipelineConfig::default())
    }
}

impl<T, P> Pipeline<T, P>
where
    T: WordTokenizer,
    P: PosTagger,
{
    /// Creates a pipeline from an extractor and a configuration.
    pub fn new(extractor: ReviewFeatureExtractor<T, P>, config: PipelineConfig) -> Self {
        Self { extractor, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes reviews one after another on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns the first extraction error; nothing is emitted for the run.
    pub fn run(&self, reviews: Vec<RawReview>) -> Result<PipelineOutput, PipelineError> {
        let start = Instant::now();
        let mut aggregator = CorpusAggregator::new();
        let mut records = Vec::with_capacity(reviews.len());

        for review in reviews {
            let extraction = self.extractor.extract(&review)?;
            records.push(emit(&mut aggregator, review, extraction));
        }

        Ok(self.finish(records, aggregator, start))
    }

    fn finish(
        &self,
        records: Vec<ResultRecord>,
        aggregator: CorpusAggregator,
        start: Instant,
    ) -> PipelineOutput {
        let stats = aggregator.finish();
        info!(
            reviews = stats.num_reviews,
            words = stats.total_words(),
            distinct_words = stats.distinct_words(),
            parallel = self.config.parallel,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "pipeline run complete"
        );
        PipelineOutput { records, stats }
    }
}

impl<T, P> Pipeline<T, P>
where
    T: WordTokenizer + Sync,
    P: PosTagger + Sync,
{
    /// Extracts features on the rayon pool, then folds in input order.
    ///
    /// # Errors
    ///
    /// Returns the error of the earliest failing review in input order.
    pub fn run_parallel(&self, reviews: Vec<RawReview>) -> Result<PipelineOutput, PipelineError> {
        let start = Instant::now();

        // indexed collect keeps input order
        let extracted: Vec<Result<Extraction, PipelineError>> = reviews
            .par_iter()
            .map(|review| self.extractor.extract(review))
            .collect();

        let mut aggregator = CorpusAggregator::new();
        let mut records = Vec::with_capacity(reviews.len());
        for (review, extraction) in reviews.into_iter().zip(extracted) {
            records.push(emit(&mut aggregator, review, extraction?));
        }

        Ok(self.finish(records, aggregator, start))
    }

    /// Runs sequentially or in parallel according to the configuration.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::run`] and [`Pipeline::run_parallel`].
    pub fn execute(&self, reviews: Vec<RawReview>) -> Result<PipelineOutput, PipelineError> {
        if self.config.parallel {
            self.run_parallel(reviews)
        } else {
            self.run(reviews)
        }
    }
}

#[inline]
fn emit(
    aggregator: &mut CorpusAggregator,
    review: RawReview,
    extraction: Extraction,
) -> ResultRecord {
    aggregator.fold(&extraction);
    ResultRecord::new(review, extraction.features)
}
