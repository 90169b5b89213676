//! Review table input and result table output.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::{Reader, Writer};
use review_types::{PipelineError, RawReview, ResultRecord};
use serde::Deserialize;

/// One input row. Columns other than these two are ignored.
#[derive(Debug, Deserialize)]
struct ReviewRow {
    #[serde(rename = "Rating", default)]
    rating: Option<String>,
    #[serde(rename = "Review", default)]
    review: Option<String>,
}

/// Reads reviews from CSV with a header row.
///
/// Every row needs a non-empty `Review` cell; `Rating` is optional.
pub fn read_reviews<R: Read>(input: R) -> Result<Vec<RawReview>> {
    let mut reader = Reader::from_reader(input);
    let mut reviews = Vec::new();

    for (row, result) in reader.deserialize::<ReviewRow>().enumerate() {
        let record = result.with_context(|| format!("failed to parse record {row}"))?;
        let text = match record.review {
            Some(text) if !text.is_empty() => text,
            _ => return Err(PipelineError::MissingText { row }.into()),
        };
        reviews.push(RawReview::new(record.rating, text));
    }

    Ok(reviews)
}

/// Loads reviews from a CSV file.
pub fn load_reviews<P: AsRef<Path>>(path: P) -> Result<Vec<RawReview>> {
    let file = File::open(&path)
        .with_context(|| format!("failed to open {}", path.as_ref().display()))?;
    read_reviews(file).with_context(|| format!("failed to read {}", path.as_ref().display()))
}

/// Writes result records as CSV, header first.
pub fn write_records<W: Write>(output: W, records: &[ResultRecord]) -> Result<()> {
    let mut writer = Writer::from_writer(output);

    for (row, record) in records.iter().enumerate() {
        writer
            .serialize(record)
            .with_context(|| format!("failed to write record {row}"))?;
    }

    writer.flush()?;
    Ok(())
}

/// Saves result records to a CSV file.
pub fn save_records<P: AsRef<Path>>(path: P, records: &[ResultRecord]) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.as_ref().display()))?;
    write_records(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_types::{CategoryRank, ReviewFeatures};

    const HEADER: &str = "Rating,Review,Number of Words,Number of Sentences,\
Most Common POS Tag 1,Occurrences 1,Most Common POS Tag 2,Occurrences 2";

    fn record(rating: Option<&str>, text: &str) -> ResultRecord {
        ResultRecord::new(
            RawReview::new(rating.map(str::to_owned), text),
            ReviewFeatures {
                word_count: 5,
                sentence_count: 2,
                top_category_1: CategoryRank::new(".", 2),
                top_category_2: CategoryRank::new("JJ", 1),
            },
        )
    }

    #[test]
    fn reads_rating_and_review() {
        let data = "Rating,Review\n5,Great product! Loved it.\n1,\"Broke, sadly.\"\n";
        let reviews = read_reviews(data.as_bytes()).unwrap();
        assert_eq!(
            reviews,
            [
                RawReview::new(Some("5".into()), "Great product! Loved it."),
                RawReview::new(Some("1".into()), "Broke, sadly."),
            ]
        );
    }

    #[test]
    fn extra_columns_ignored_and_rating_optional() {
        let data = "Id,Review,Helpful\n7,Works fine,yes\n";
        let reviews = read_reviews(data.as_bytes()).unwrap();
        assert_eq!(reviews, [RawReview::new(None, "Works fine")]);
    }

    #[test]
    fn empty_rating_is_none() {
        let data = "Rating,Review\n,No stars given\n";
        let reviews = read_reviews(data.as_bytes()).unwrap();
        assert_eq!(reviews[0].rating, None);
    }

    #[test]
    fn missing_review_cell_reports_row() {
        let data = "Rating,Review\n5,fine\n3,\n";
        let err = read_reviews(data.as_bytes()).unwrap_err();
        let inner = err.downcast_ref::<PipelineError>().unwrap();
        assert!(matches!(inner, PipelineError::MissingText { row: 1 }));
        assert_eq!(err.to_string(), "record 1: missing required review text");
    }

    #[test]
    fn missing_review_column_is_fatal() {
        let data = "Rating,Text\n5,fine\n";
        let err = read_reviews(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::MissingText { row: 0 })
        ));
    }

    #[test]
    fn header_only_is_empty() {
        let reviews = read_reviews("Rating,Review\n".as_bytes()).unwrap();
        assert!(reviews.is_empty());
    }

    #[test]
    fn writes_exact_columns() {
        let mut out = Vec::new();
        write_records(&mut out, &[record(Some("5"), "Great product! Loved it.")]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(HEADER));
        assert_eq!(lines.next(), Some("5,Great product! Loved it.,5,2,.,2,JJ,1"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn absent_rating_writes_empty_cell() {
        let mut out = Vec::new();
        write_records(&mut out, &[record(None, "ok")]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().nth(1), Some(",ok,5,2,.,2,JJ,1"));
    }

    #[test]
    fn written_records_read_back() {
        let records = vec![
            record(Some("4"), "Solid, \"quiet\" fan"),
            record(None, "line\nbreak"),
        ];
        let mut out = Vec::new();
        write_records(&mut out, &records).unwrap();

        let mut reader = Reader::from_reader(out.as_slice());
        let back: Vec<ResultRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn load_reports_path() {
        let path = std::env::temp_dir().join("review-cli-does-not-exist.csv");
        let err = load_reviews(&path).unwrap_err();
        assert!(err.to_string().contains("review-cli-does-not-exist.csv"));
    }
}
