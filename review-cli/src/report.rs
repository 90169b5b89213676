//! Console tables, the text bar chart and the statistics export.

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use review_core::CorpusStats;
use review_core::features::OrderedCounts;
use review_types::ResultRecord;
use serde::Serialize;

/// Review text wider than this is cut in the console table.
const REVIEW_WIDTH: usize = 50;

/// Width of the longest bar in the text chart.
const BAR_WIDTH: usize = 40;

/// One word cloud entry.
#[derive(Debug, Serialize)]
pub struct WordCount<'a> {
    /// The word as tokenized.
    pub word: &'a str,
    /// Corpus-wide occurrences.
    pub count: u64,
}

/// Visualization input written to `stats.json`.
#[derive(Debug, Serialize)]
pub struct StatsExport<'a> {
    /// Reviews processed.
    pub reviews: usize,
    /// Filtered tokens across the corpus.
    pub total_words: u64,
    /// Most frequent words for the word cloud.
    pub top_words: Vec<WordCount<'a>>,
    /// Second-category counts for the bar chart, first-seen order.
    pub secondary_category_distribution: &'a OrderedCounts,
}

impl<'a> StatsExport<'a> {
    /// Builds the export from run statistics.
    pub fn new(stats: &'a CorpusStats, top_words: usize) -> Self {
        Self {
            reviews: stats.num_reviews,
            total_words: stats.total_words(),
            top_words: stats
                .top_words(top_words)
                .into_iter()
                .map(|(word, count)| WordCount { word, count })
                .collect(),
            secondary_category_distribution: &stats.secondary_category_distribution,
        }
    }
}

/// Writes the statistics export as pretty JSON.
pub fn write_stats_json<W: Write>(
    output: W,
    stats: &CorpusStats,
    top_words: usize,
) -> Result<()> {
    serde_json::to_writer_pretty(output, &StatsExport::new(stats, top_words))
        .context("failed to serialize statistics")
}

/// Saves the statistics export to a file.
pub fn save_stats_json<P: AsRef<Path>>(
    path: P,
    stats: &CorpusStats,
    top_words: usize,
) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.as_ref().display()))?;
    write_stats_json(file, stats, top_words)
}

/// Renders the second-category distribution as a horizontal text chart.
pub fn render_bar_chart(stats: &CorpusStats) -> String {
    let mut out = String::from("Most Common POS Tag 2\n");
    let max = stats.secondary_categories().map(|(_, c)| c).max().unwrap_or(0);
    if max == 0 {
        out.push_str("(no reviews)\n");
        return out;
    }

    let label_width = stats
        .secondary_categories()
        .map(|(l, _)| l.chars().count())
        .max()
        .unwrap_or(0);

    for (label, count) in stats.secondary_categories() {
        // at least one cell for any non-zero count
        let len = ((count as usize * BAR_WIDTH) / max as usize).max(1);
        let _ = writeln!(out, "{label:<label_width$} | {} {count}", "#".repeat(len));
    }
    out
}

/// Renders the `Rating and Review` table.
pub fn render_rating_table(records: &[ResultRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.rating.clone().unwrap_or_else(|| "NaN".to_owned()),
                truncate(&r.review, REVIEW_WIDTH),
            ]
        })
        .collect();
    render_table(&["Rating", "Review"], &rows)
}

/// Renders the `POS Tag Analysis` table.
pub fn render_pos_table(records: &[ResultRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.number_of_words.to_string(),
                r.number_of_sentences.to_string(),
                r.most_common_pos_tag_1.clone(),
                r.occurrences_1.to_string(),
                r.most_common_pos_tag_2.clone(),
                r.occurrences_2.to_string(),
            ]
        })
        .collect();
    render_table(
        &[
            "Number of Words",
            "Number of Sentences",
            "Most Common POS Tag 1",
            "Occurrences 1",
            "Most Common POS Tag 2",
            "Occurrences 2",
        ],
        &rows,
    )
}

/// Right-aligned columns with a leading row index.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let index_width = rows.len().saturating_sub(1).to_string().len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&" ".repeat(index_width));
    for (h, w) in headers.iter().zip(&widths) {
        let _ = write!(out, "  {h:>w$}");
    }
    out.push('\n');

    for (i, row) in rows.iter().enumerate() {
        let _ = write!(out, "{i:<index_width$}");
        for (cell, w) in row.iter().zip(&widths) {
            let _ = write!(out, "  {cell:>w$}");
        }
        out.push('\n');
    }
    out
}

fn truncate(text: &str, max: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max {
        return flat;
    }
    let mut cut: String = flat.chars().take(max.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
