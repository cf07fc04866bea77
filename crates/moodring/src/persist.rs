//! Writing the scored table back to CSV

use bentley::Sink;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::pipeline::{ScoredTable, Sentiment};

pub const OUTPUT_SUFFIX: &str = "_with_sentiment";

/// Columns appended after the original ones
pub const SENTIMENT_COLUMNS: [&str; 5] = ["compound", "positive", "neutral", "negative", "sentiment"];

/// `dir/name.ext` → `dir/name_with_sentiment.ext`
pub fn output_path(input: &Path) -> PathBuf {
  let stem = input.file_stem().map(OsString::from).unwrap_or_default();

  let mut name = stem;
  name.push(OUTPUT_SUFFIX);
  if let Some(ext) = input.extension() {
    name.push(".");
    name.push(ext);
  }

  input.with_file_name(name)
}

/// Render a score the way it should appear in the output file. Integral
/// values keep a trailing `.0`; negative zero prints as `0.0`.
pub fn format_score(value: f64) -> String {
  if value == 0.0 {
    "0.0".to_string()
  } else if value.is_finite() && value.fract() == 0.0 {
    format!("{value:.1}")
  } else {
    format!("{value}")
  }
}

fn sentiment_cells(sentiment: &Sentiment) -> [String; 5] {
  let scores = &sentiment.scores;
  [
    format_score(scores.compound),
    format_score(scores.positive),
    format_score(scores.neutral),
    format_score(scores.negative),
    sentiment.label.map(|label| label.as_str().to_string()).unwrap_or_default(),
  ]
}

/// Write original columns plus the sentiment columns to `path`, replacing
/// whatever is there
pub fn write_scored_table(scored: &ScoredTable, path: &Path) -> Result<()> {
  let mut writer = csv::Writer::from_path(path).map_err(|e| Error::write(path, e))?;

  let header = scored.table.headers.iter().map(String::as_str).chain(SENTIMENT_COLUMNS);
  writer.write_record(header).map_err(|e| Error::write(path, e))?;

  for (row, sentiment) in scored.records() {
    let cells = sentiment_cells(sentiment);
    let record = row.iter().map(String::as_str).chain(cells.iter().map(String::as_str));
    writer.write_record(record).map_err(|e| Error::write(path, e))?;
  }

  writer.flush().map_err(|e| Error::write(path, e))?;
  Ok(())
}

/// Derive the output path from `input`, write, and report
pub fn persist(scored: &ScoredTable, input: &Path, sink: &dyn Sink) -> Result<PathBuf> {
  let path = output_path(input);
  write_scored_table(scored, &path)?;

  sink.blank();
  sink.success(&format!("Results saved to {}", path.display()));
  tracing::debug!(path = %path.display(), rows = scored.len(), "results written");
  Ok(path)
}
