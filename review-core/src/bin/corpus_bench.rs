//! Corpus Benchmarking Tool
//!
//! Measures throughput of the analyzer stages on a large text file, one
//! review per line. Useful for sizing batch runs before pointing the report
//! binary at a full export.
//!
//! ## What It Benchmarks
//!
//! 1. **Clean**: Replacing characters outside the kept alphabet
//! 2. **Segment**: Counting sentences in cleaned text
//! 3. **Tokenize**: Splitting cleaned text into tokens
//! 4. **Extract**: Full per-review extraction, every line treated as a review
//!
//! ## Usage
//!
//! ```bash
//! # All stages
//! ./target/release/corpus_bench /path/to/reviews.txt
//!
//! # One stage only
//! ./target/release/corpus_bench /path/to/reviews.txt tokenize
//! ```
//!
//! ## Example Output
//!
//! ```text
//! --------------------------------
//! Stage       : Extract
//! Mean        : 1.204 s (best 1.187 s)
//! Throughput  : 85.31 MiB/s
//! Reviews     : 568_454 (472_137/s)
//! Words       : 12_402_117 (10_300_761/s)
//! --------------------------------
//! ```
//!
//! Each stage reports what it produces: sentences for segment, tokens for
//! tokenize, reviews and filtered words for extract. Clean reports bytes
//! only. Build with `--release` and use an input of 100MB+ for stable
//! numbers.

use std::env;
use std::fs;
use std::io;
use std::time::{Duration, Instant};

use review_core::analyzer::{EnglishTokenizer, SentenceSegmenter, TextCleaner};
use review_core::ReviewFeatureExtractor;
use review_types::RawReview;

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: u32 = 5;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: corpus_bench <path> [clean|segment|tokenize|extract|all]");
        std::process::exit(1);
    }

    let path = &args[1];
    let mode = args.get(2).map(String::as_str).unwrap_or("all");

    println!("Loading file...");
    let bytes = fs::read(path)?;
    let input =
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    println!("File size: {}", fmt_bytes(input.len() as u64));
    println!("Lines:     {}\n", fmt_count(input.lines().count() as u64));

    let cleaned = TextCleaner::new().clean(&input);

    match mode {
        "clean" => bench_clean(&input).print(),
        "segment" => bench_segment(&cleaned).print(),
        "tokenize" => bench_tokenize(&cleaned).print(),
        "extract" => bench_extract(&input)?.print(),
        "all" => {
            bench_clean(&input).print();
            bench_segment(&cleaned).print();
            bench_tokenize(&cleaned).print();
            bench_extract(&input)?.print();
        }
        other => {
            eprintln!("Unknown mode: {other}");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Mean and fastest wall time over the measured runs.
#[derive(Debug, Clone, Copy)]
struct Timing {
    mean: Duration,
    best: Duration,
}

/// Result of benchmarking one stage.
#[derive(Debug)]
struct StageReport {
    stage: &'static str,
    input_bytes: usize,
    timing: Timing,
    /// Output quantities of one run, e.g. `("Tokens", n)`.
    outputs: Vec<(&'static str, u64)>,
}

impl StageReport {
    fn print(&self) {
        let secs = self.timing.mean.as_secs_f64();
        let mib = self.input_bytes as f64 / (1024.0 * 1024.0);

        println!("--------------------------------");
        println!("Stage       : {}", self.stage);
        println!(
            "Mean        : {:.3} s (best {:.3} s)",
            secs,
            self.timing.best.as_secs_f64()
        );
        println!("Throughput  : {:.2} MiB/s", mib / secs);
        for &(unit, count) in &self.outputs {
            println!("{:<12}: {} ({}/s)", unit, fmt_count(count), fmt_rate(count, secs));
        }
        println!("--------------------------------\n");
    }
}

/// Runs `run` untimed `WARMUP_RUNS` times, then times `MEASURE_RUNS` runs.
///
/// `run` returns the stage's output count, which must be the same every run.
fn time_runs<F: FnMut() -> u64>(mut run: F) -> (Timing, u64) {
    for _ in 0..WARMUP_RUNS {
        std::hint::black_box(run());
    }

    let mut total = Duration::ZERO;
    let mut best = Duration::MAX;
    let mut produced = 0;
    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        produced = std::hint::black_box(run());
        let elapsed = start.elapsed();
        total += elapsed;
        best = best.min(elapsed);
    }

    let timing = Timing {
        mean: total / MEASURE_RUNS,
        best,
    };
    (timing, produced)
}

fn bench_clean(input: &str) -> StageReport {
    let cleaner = TextCleaner::new();
    let mut out = String::with_capacity(input.len());

    println!("=== Clean ===");
    let (timing, _) = time_runs(|| {
        cleaner.clean_into(input, &mut out);
        out.len() as u64
    });

    StageReport {
        stage: "Clean",
        input_bytes: input.len(),
        timing,
        outputs: Vec::new(),
    }
}

fn bench_segment(cleaned: &str) -> StageReport {
    let segmenter = SentenceSegmenter::new();

    println!("=== Segment ===");
    let (timing, sentences) = time_runs(|| segmenter.count(cleaned) as u64);

    StageReport {
        stage: "Segment",
        input_bytes: cleaned.len(),
        timing,
        outputs: vec![("Sentences", sentences)],
    }
}

fn bench_tokenize(cleaned: &str) -> StageReport {
    let tokenizer = EnglishTokenizer::new();

    println!("=== Tokenize ===");
    let (timing, tokens) = time_runs(|| {
        let mut n = 0u64;
        tokenizer.tokenize_with(cleaned, |_| n += 1);
        n
    });

    StageReport {
        stage: "Tokenize",
        input_bytes: cleaned.len(),
        timing,
        outputs: vec![("Tokens", tokens)],
    }
}

fn bench_extract(input: &str) -> io::Result<StageReport> {
    let extractor: ReviewFeatureExtractor = ReviewFeatureExtractor::default();
    let reviews: Vec<RawReview> = input.lines().map(|l| RawReview::new(None, l)).collect();

    // fail before timing rather than inside the measured loop
    for review in &reviews {
        extractor.extract(review).map_err(io::Error::other)?;
    }

    println!("=== Extract ===");
    let (timing, words) = time_runs(|| {
        reviews
            .iter()
            .filter_map(|review| extractor.extract(review).ok())
            .map(|out| out.features.word_count as u64)
            .sum()
    });

    Ok(StageReport {
        stage: "Extract",
        input_bytes: input.len(),
        timing,
        outputs: vec![("Reviews", reviews.len() as u64), ("Words", words)],
    })
}

fn fmt_rate(count: u64, secs: f64) -> String {
    if secs > 0.0 {
        fmt_count((count as f64 / secs) as u64)
    } else {
        "-".to_owned()
    }
}

fn fmt_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Digits grouped by three with `_`, as in Rust literals.
fn fmt_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.char_indices() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }
    out
}
