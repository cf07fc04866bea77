//! Per-record scoring over a loaded table
//!
//! Results land in a buffer pre-sized to the table, indexed by row, so the
//! output keeps input order. A failed record keeps the zero/empty
//! [`Sentiment::default`] and is listed in [`ScoredTable::failures`].
//!
//! A text cell counts as missing when it is empty or one of the usual
//! not-available markers (`NA`, `N/A`, `null`, `None`, `NaN`, ...), matched
//! exactly. Missing cells are scored as the [`MissingText`] substitute.

use bentley::Sink;

use crate::config::MissingText;
use crate::error::ScoreError;
use crate::label::{classify, Label};
use crate::scorer::{PolarityScorer, PolarityScores};
use crate::table::Table;

/// Progress is reported every this many records
pub const PROGRESS_INTERVAL: usize = 1000;

/// Cell values read as "not available", the same set pandas' CSV reader uses
pub const NA_VALUES: [&str; 19] = [
  "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
  "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(cell: &str) -> bool {
  NA_VALUES.contains(&cell)
}

/// The five columns appended to each row
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sentiment {
  pub scores: PolarityScores,
  /// `None` when scoring failed
  pub label: Option<Label>,
}

impl Sentiment {
  pub fn from_scores(scores: PolarityScores) -> Self {
    Self { scores, label: Some(classify(scores.compound)) }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringFailure {
  pub index: usize,
  pub error: ScoreError,
}

#[derive(Debug, Clone)]
pub struct ScoredTable {
  pub table: Table,
  pub text_index: usize,
  /// One entry per row of `table`
  pub sentiments: Vec<Sentiment>,
  pub failures: Vec<ScoringFailure>,
  /// Rows whose text cell was empty and got the [`MissingText`] substitute
  pub missing_text: Vec<usize>,
}

impl ScoredTable {
  pub fn len(&self) -> usize {
    self.sentiments.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sentiments.is_empty()
  }

  /// Rows paired with their sentiment, in table order
  pub fn records(&self) -> impl Iterator<Item = (&[String], &Sentiment)> + '_ {
    self.table.rows.iter().map(Vec::as_slice).zip(self.sentiments.iter())
  }
}

/// Score one text and classify it
pub fn score_record(scorer: &dyn PolarityScorer, text: &str) -> Result<Sentiment, ScoreError> {
  scorer.score(text).map(Sentiment::from_scores)
}

/// Score every row of `table` in order
pub fn score_table(
  table: Table,
  text_index: usize,
  scorer: &dyn PolarityScorer,
  missing: MissingText,
  sink: &dyn Sink,
) -> ScoredTable {
  sink.info("Analyzing sentiment...");

  let mut sentiments = vec![Sentiment::default(); table.len()];
  let mut failures = Vec::new();
  let mut missing_text = Vec::new();

  for (index, row) in table.rows.iter().enumerate() {
    if index % PROGRESS_INTERVAL == 0 && index > 0 {
      sink.progress(&format!("Processed {index} tweets..."));
    }

    let cell = row.get(text_index).map(String::as_str).unwrap_or("");
    let text = if is_missing(cell) {
      missing_text.push(index);
      missing.substitute()
    } else {
      cell
    };

    match score_record(scorer, text) {
      Ok(sentiment) => {
        tracing::trace!(index, compound = sentiment.scores.compound, "scored");
        sentiments[index] = sentiment;
      }
      Err(error) => {
        sink.error(&format!("Error processing tweet at index {index}: {error}"));
        tracing::debug!(index, %error, "record left unscored");
        failures.push(ScoringFailure { index, error });
      }
    }
  }

  sink.success("Sentiment analysis complete!");
  report_failures(&failures, sink);
  report_missing_text(&missing_text, missing, sink);

  ScoredTable { table, text_index, sentiments, failures, missing_text }
}

fn report_failures(failures: &[ScoringFailure], sink: &dyn Sink) {
  if failures.is_empty() {
    return;
  }

  tracing::warn!(count = failures.len(), "some records could not be scored");
  sink.warn(&format!("{} tweets could not be scored", failures.len()));
  for failure in failures {
    sink.warn(&format!("  index {}: {}", failure.index, failure.error));
  }
}

fn report_missing_text(indices: &[usize], policy: MissingText, sink: &dyn Sink) {
  if indices.is_empty() {
    return;
  }

  let shown: Vec<String> = indices.iter().take(10).map(usize::to_string).collect();
  let more = if indices.len() > shown.len() { ", ..." } else { "" };
  sink.warn(&format!(
    "{} tweets had no text and were scored as {:?} (missing_text = {policy}); indices: {}{more}",
    indices.len(),
    policy.substitute(),
    shown.join(", ")
  ));
}

#[cfg(test)]
mod tests {
  use super::*;
  use bentley::{Level, Recorder};

  fn table_of(texts: &[&str]) -> Table {
    Table::new(
      vec!["id".into(), "text".into()],
      texts.iter().enumerate().map(|(i, t)| vec![i.to_string(), t.to_string()]).collect(),
    )
  }

  fn keyword_scorer(text: &str) -> Result<PolarityScores, ScoreError> {
    match text {
      "boom" => Err(ScoreError::Failed("scorer exploded".into())),
      t if t.contains("good") => Ok(PolarityScores::new(0.7, 0.6, 0.4, 0.0)),
      t if t.contains("bad") => Ok(PolarityScores::new(-0.6, 0.0, 0.5, 0.5)),
      _ => Ok(PolarityScores::new(0.0, 0.0, 1.0, 0.0)),
    }
  }

  #[test]
  fn test_scores_in_row_order() {
    let recorder = Recorder::default();
    let scored = score_table(
      table_of(&["good day", "bad day", "a day"]),
      1,
      &keyword_scorer,
      MissingText::Nan,
      &recorder,
    );

    let labels: Vec<_> = scored.sentiments.iter().map(|s| s.label).collect();
    assert_eq!(labels, vec![Some(Label::Positive), Some(Label::Negative), Some(Label::Neutral)]);
    assert!(scored.failures.is_empty());
    assert!(recorder.contains("Sentiment analysis complete!"));
  }

  #[test]
  fn test_failure_keeps_defaults_and_continues() {
    let recorder = Recorder::default();
    let scored = score_table(
      table_of(&["good", "boom", "bad"]),
      1,
      &keyword_scorer,
      MissingText::Nan,
      &recorder,
    );

    assert_eq!(scored.sentiments[1], Sentiment::default());
    assert_eq!(scored.sentiments[1].scores.compound, 0.0);
    assert_eq!(scored.sentiments[1].label, None);
    assert_eq!(scored.sentiments[2].label, Some(Label::Negative));

    assert_eq!(scored.failures.len(), 1);
    assert_eq!(scored.failures[0].index, 1);
    assert!(recorder.contains("Error processing tweet at index 1: scorer exploded"));
    assert!(recorder.contains("1 tweets could not be scored"));
  }

  #[test]
  fn test_missing_text_becomes_nan_and_is_flagged() {
    let seen = std::cell::RefCell::new(Vec::new());
    let scorer = |text: &str| -> Result<PolarityScores, ScoreError> {
      seen.borrow_mut().push(text.to_string());
      Ok(PolarityScores::new(0.0, 0.0, 1.0, 0.0))
    };

    let recorder = Recorder::default();
    let scored = score_table(table_of(&["hello", ""]), 1, &scorer, MissingText::Nan, &recorder);

    assert_eq!(*seen.borrow(), vec!["hello", "nan"]);
    assert_eq!(scored.missing_text, vec![1]);
    let warnings = recorder.entries(Some(Level::Warn));
    assert!(warnings.iter().any(|e| e.message.contains("1 tweets had no text")));
  }

  #[test]
  fn test_not_available_markers_count_as_missing() {
    let seen = std::cell::RefCell::new(Vec::new());
    let scorer = |text: &str| -> Result<PolarityScores, ScoreError> {
      seen.borrow_mut().push(text.to_string());
      Ok(PolarityScores::new(0.0, 0.0, 1.0, 0.0))
    };

    let recorder = Recorder::default();
    let scored = score_table(
      table_of(&["NA", "N/A", "null", "None", "NaN", "Nancy", " NA"]),
      1,
      &scorer,
      MissingText::Empty,
      &recorder,
    );

    assert_eq!(scored.missing_text, vec![0, 1, 2, 3, 4]);
    assert_eq!(*seen.borrow(), vec!["", "", "", "", "", "Nancy", " NA"]);
  }

  #[test]
  fn test_is_missing() {
    assert!(is_missing(""));
    assert!(is_missing("#N/A"));
    assert!(is_missing("<NA>"));
    assert!(!is_missing("na"));
    assert!(!is_missing("hello"));
  }

  #[test]
  fn test_missing_text_empty_policy() {
    let seen = std::cell::RefCell::new(Vec::new());
    let scorer = |text: &str| -> Result<PolarityScores, ScoreError> {
      seen.borrow_mut().push(text.to_string());
      Ok(PolarityScores::default())
    };

    score_table(table_of(&[""]), 1, &scorer, MissingText::Empty, &Recorder::default());
    assert_eq!(*seen.borrow(), vec![""]);
  }

  #[test]
  fn test_progress_every_thousand() {
    let texts = vec!["a day"; 2500];
    let recorder = Recorder::default();
    score_table(table_of(&texts), 1, &keyword_scorer, MissingText::Nan, &recorder);

    let progress: Vec<String> =
      recorder.entries(Some(Level::Progress)).into_iter().map(|e| e.message).collect();
    assert_eq!(progress, vec!["Processed 1000 tweets...", "Processed 2000 tweets..."]);
  }

  #[test]
  fn test_empty_table() {
    let recorder = Recorder::default();
    let scored = score_table(table_of(&[]), 1, &keyword_scorer, MissingText::Nan, &recorder);
    assert!(scored.is_empty());
    assert!(scored.failures.is_empty());
    assert!(recorder.entries(Some(Level::Progress)).is_empty());
  }

  #[test]
  fn test_records_pairs_rows_with_sentiment() {
    let scored = score_table(
      table_of(&["good", "bad"]),
      1,
      &keyword_scorer,
      MissingText::Nan,
      &Recorder::default(),
    );
    let pairs: Vec<_> = scored.records().map(|(row, s)| (row[1].clone(), s.label)).collect();
    assert_eq!(
      pairs,
      vec![("good".to_string(), Some(Label::Positive)), ("bad".to_string(), Some(Label::Negative))]
    );
  }
}

#[cfg(test)]
mod vader_tests {
  use super::*;
  use crate::{analyze_file, Config, VaderScorer};
  use bentley::Recorder;
  use std::fs;
  use tempfile::TempDir;

  fn write_input(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
  }

  #[test]
  fn test_punctuation_without_sentiment_words_is_neutral() {
    let table = Table::new(
      vec!["text".into()],
      vec![vec!["See you at 5!".into()], vec!["!!!".into()], vec!["I love this!".into()]],
    );

    let scored =
      score_table(table, 0, &VaderScorer::new(), MissingText::Nan, &Recorder::default());

    assert_eq!(scored.sentiments[0].label, Some(Label::Neutral));
    assert_eq!(scored.sentiments[0].scores.compound, 0.0);
    assert_eq!(scored.sentiments[1].label, Some(Label::Neutral));
    assert_eq!(scored.sentiments[2].label, Some(Label::Positive));
  }

  #[test]
  fn test_output_scores_are_short_decimals() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(
      &temp_dir,
      "tweets.csv",
      "id,text\n1,I love this!\n2,Worst. Day. Ever!!!\n3,See you at 5!\n",
    );

    let analysis =
      analyze_file(&input, "text", &VaderScorer::new(), &Config::default(), &Recorder::default())
        .unwrap();

    let content = fs::read_to_string(&analysis.output_path).unwrap();
    for line in content.lines().skip(1) {
      let cells: Vec<&str> = line.split(',').collect();
      let decimals = |cell: &str| cell.split('.').nth(1).map(str::len).unwrap_or(0);
      assert!(decimals(cells[2]) <= 4, "{line}");
      for cell in &cells[3..6] {
        assert!(decimals(cell) <= 3, "{line}");
      }
    }
    assert!(content.ends_with("3,See you at 5!,0.0,0.0,1.0,0.0,neutral\n"), "{content}");
  }
}
