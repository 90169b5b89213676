//! Per-review features and corpus aggregation.

pub mod aggregator;
pub mod counts;
pub mod extractor;
pub mod stats;

pub use aggregator::CorpusAggregator;
pub use counts::CategoryCount;
pub use extractor::{Extraction, ReviewFeatureExtractor};
pub use stats::{CorpusStats, OrderedCounts};
