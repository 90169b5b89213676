//! Review Report CLI
//!
//! Reads a review table, extracts per-review features, writes the result
//! table and the visualization inputs, and prints the summary tables.
//!
//! ```bash
//! review-report --input Reviews.csv --output processed_reviews.csv
//! RUST_LOG=review_core=debug review-report --parallel
//! ```

mod io;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use review_core::{
    EnglishTokenizer, LexiconTagger, Pipeline, ReviewFeatureExtractor, StopWordFilter,
};
use review_types::{PipelineConfig, DEFAULT_TOP_WORDS};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "review_core=info,review_report=info";

#[derive(Parser, Debug)]
#[command(name = "review-report")]
#[command(about = "Extract text features from customer reviews", long_about = None)]
struct Cli {
    /// Input CSV with a `Review` column and an optional `Rating` column
    #[arg(short, long, default_value = "Reviews.csv")]
    input: PathBuf,

    /// Result table path
    #[arg(short, long, default_value = "processed_reviews.csv")]
    output: PathBuf,

    /// Word cloud and bar chart input path
    #[arg(long, default_value = "stats.json")]
    stats_json: PathBuf,

    /// Number of most frequent words to export for the word cloud
    #[arg(long, default_value_t = DEFAULT_TOP_WORDS)]
    top_words: usize,

    /// Extra stop words, one per line
    #[arg(long)]
    stop_words: Option<PathBuf>,

    /// Extra tagger lexicon, `word<TAB>TAG` per line
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Extract features on all cores
    #[arg(long)]
    parallel: bool,
}

impl Cli {
    fn config(&self) -> PipelineConfig {
        let base = if self.parallel {
            PipelineConfig::parallel()
        } else {
            PipelineConfig::sequential()
        };
        base.with_top_words(self.top_words)
    }

    fn pipeline(&self) -> Result<Pipeline> {
        let mut stop_words = StopWordFilter::english();
        if let Some(path) = &self.stop_words {
            stop_words = stop_words.with_file(path)?;
            info!(path = %path.display(), size = stop_words.len(), "loaded extra stop words");
        }

        let mut tagger = LexiconTagger::new();
        if let Some(path) = &self.lexicon {
            tagger = tagger.with_lexicon_file(path)?;
            info!(path = %path.display(), size = tagger.lexicon_len(), "loaded lexicon");
        }

        let extractor = ReviewFeatureExtractor::new(EnglishTokenizer::new(), stop_words, tagger);
        Ok(Pipeline::new(extractor, self.config()))
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let pipeline = cli.pipeline()?;
    let config = *pipeline.config();

    let reviews = io::load_reviews(&cli.input)?;
    info!(path = %cli.input.display(), reviews = reviews.len(), "loaded reviews");

    let output = pipeline
        .execute(reviews)
        .with_context(|| format!("failed to process {}", cli.input.display()))?;

    println!("Rating and Review:");
    print!("{}", report::render_rating_table(&output.records));

    println!("\nPOS Tag Analysis:");
    print!("{}", report::render_pos_table(&output.records));

    io::save_records(&cli.output, &output.records)?;
    println!("Results saved to {}", cli.output.display());

    report::save_stats_json(&cli.stats_json, &output.stats, config.top_words)?;
    info!(path = %cli.stats_json.display(), top_words = config.top_words, "wrote statistics");

    println!();
    print!("{}", report::render_bar_chart(&output.stats));

    info!("{}", output.stats);
    Ok(())
}
