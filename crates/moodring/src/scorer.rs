//! Polarity scoring seam
//!
//! The pipeline only sees [`PolarityScorer`]. [`VaderScorer`] adapts the
//! VADER lexicon-and-rules analyzer to it; tests plug in closures.

use std::any::Any;
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::error::ScoreError;

/// The four scores an analyzer produces for one text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityScores {
  pub compound: f64,
  pub positive: f64,
  pub neutral: f64,
  pub negative: f64,
}

impl PolarityScores {
  pub fn new(compound: f64, positive: f64, neutral: f64, negative: f64) -> Self {
    Self { compound, positive, neutral, negative }
  }

  /// positive + neutral + negative, 1.0 up to the scorer's rounding
  pub fn component_sum(&self) -> f64 {
    self.positive + self.neutral + self.negative
  }
}

pub trait PolarityScorer {
  fn score(&self, text: &str) -> Result<PolarityScores, ScoreError>;
}

impl<F> PolarityScorer for F
where
  F: Fn(&str) -> Result<PolarityScores, ScoreError>,
{
  fn score(&self, text: &str) -> Result<PolarityScores, ScoreError> {
    self(text)
  }
}

/// VADER analyzer behind the [`PolarityScorer`] seam.
///
/// Construction loads the lexicon once; keep one instance for the whole run.
pub struct VaderScorer {
  analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
  pub fn new() -> Self {
    Self { analyzer: SentimentIntensityAnalyzer::new() }
  }
}

impl Default for VaderScorer {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for VaderScorer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("VaderScorer").finish_non_exhaustive()
  }
}

impl PolarityScorer for VaderScorer {
  fn score(&self, text: &str) -> Result<PolarityScores, ScoreError> {
    let raw = guarded(|| self.analyzer.polarity_scores(text))?;

    let scores = PolarityScores {
      compound: lookup(&raw, "compound")?,
      positive: lookup(&raw, "pos")?,
      neutral: lookup(&raw, "neu")?,
      negative: lookup(&raw, "neg")?,
    };
    Ok(normalize(scores))
  }
}

/// Bring analyzer output in line with the reference VADER scores.
///
/// Punctuation emphasis only counts when some word carried valence, so a
/// text with no positive or negative share has a zero compound. Compound is
/// rounded to 4 places and the proportions to 3.
pub fn normalize(scores: PolarityScores) -> PolarityScores {
  let compound =
    if scores.positive == 0.0 && scores.negative == 0.0 { 0.0 } else { scores.compound };

  PolarityScores {
    compound: round_to(compound, 4),
    positive: round_to(scores.positive, 3),
    neutral: round_to(scores.neutral, 3),
    negative: round_to(scores.negative, 3),
  }
}

fn round_to(value: f64, places: i32) -> f64 {
  let factor = 10f64.powi(places);
  let rounded = (value * factor).round() / factor;
  // keep -0.0 out of the output
  if rounded == 0.0 {
    0.0
  } else {
    rounded
  }
}

thread_local! {
  static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the process panic hook once so panics raised inside [`guarded`] are
/// logged at debug level instead of printed to stderr
fn install_quiet_hook() {
  QUIET_HOOK.call_once(|| {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
      if QUIET_PANICS.with(Cell::get) {
        tracing::debug!(%info, "panic inside scorer");
      } else {
        previous(info);
      }
    }));
  });
}

/// Run `f`, turning a panic into [`ScoreError::Panicked`]
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, ScoreError> {
  install_quiet_hook();

  QUIET_PANICS.with(|quiet| quiet.set(true));
  let result = panic::catch_unwind(AssertUnwindSafe(f));
  QUIET_PANICS.with(|quiet| quiet.set(false));

  result.map_err(|payload| ScoreError::Panicked(panic_message(payload.as_ref())))
}

fn lookup(raw: &HashMap<&str, f64>, key: &'static str) -> Result<f64, ScoreError> {
  match raw.get(key) {
    Some(value) if value.is_finite() => Ok(*value),
    Some(value) => Err(ScoreError::NonFinite { key, value: *value }),
    None => Err(ScoreError::MissingScore(key)),
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    message.to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "unknown panic".to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lookup_missing_and_non_finite() {
    let mut raw: HashMap<&str, f64> = HashMap::new();
    raw.insert("pos", f64::NAN);
    raw.insert("neu", 0.5);

    assert_eq!(lookup(&raw, "neu"), Ok(0.5));
    assert_eq!(lookup(&raw, "neg"), Err(ScoreError::MissingScore("neg")));
    assert!(matches!(lookup(&raw, "pos"), Err(ScoreError::NonFinite { key: "pos", .. })));
  }

  #[test]
  fn test_panic_message_extraction() {
    let payload: Box<dyn Any + Send> = Box::new("static message");
    assert_eq!(panic_message(payload.as_ref()), "static message");

    let payload: Box<dyn Any + Send> = Box::new(String::from("owned message"));
    assert_eq!(panic_message(payload.as_ref()), "owned message");

    let payload: Box<dyn Any + Send> = Box::new(42_u8);
    assert_eq!(panic_message(payload.as_ref()), "unknown panic");
  }

  #[test]
  fn test_closure_scorer() {
    let scorer = |text: &str| -> Result<PolarityScores, ScoreError> {
      if text.is_empty() {
        Err(ScoreError::Failed("empty".into()))
      } else {
        Ok(PolarityScores::new(0.5, 0.5, 0.5, 0.0))
      }
    };

    assert_eq!(scorer.score("hi").unwrap().compound, 0.5);
    assert!(scorer.score("").is_err());
  }

  #[test]
  fn test_vader_unambiguous_examples() {
    let scorer = VaderScorer::new();

    let love = scorer.score("I love this!").unwrap();
    let hate = scorer.score("I hate this.").unwrap();
    let table = scorer.score("It is a table.").unwrap();

    assert!(love.compound >= 0.05, "{love:?}");
    assert!(hate.compound <= -0.05, "{hate:?}");
    assert!(table.compound.abs() < 0.05, "{table:?}");
  }

  #[test]
  fn test_guarded_turns_panic_into_error() {
    let result: Result<(), ScoreError> = guarded(|| panic!("lexicon exploded"));
    assert_eq!(result, Err(ScoreError::Panicked("lexicon exploded".into())));
    assert!(!QUIET_PANICS.with(Cell::get));

    assert_eq!(guarded(|| 7), Ok(7));
  }

  #[test]
  fn test_normalize_zeroes_compound_without_valence() {
    let scores = normalize(PolarityScores::new(-0.07518070500292766, 0.0, 1.0, 0.0));
    assert_eq!(scores, PolarityScores::new(0.0, 0.0, 1.0, 0.0));
  }

  #[test]
  fn test_normalize_rounds() {
    let scores = normalize(PolarityScores::new(0.049_96, 0.817_916_97, 0.182_083, 0.0));
    assert_eq!(scores.compound, 0.05);
    assert_eq!(scores.positive, 0.818);
    assert_eq!(scores.neutral, 0.182);
    assert_eq!(normalize(PolarityScores::new(-0.000_01, 0.0, 1.0, 0.000_1)).compound, 0.0);
  }

  #[test]
  fn test_vader_punctuation_alone_is_neutral() {
    let scorer = VaderScorer::new();
    for text in ["See you at 5!", "!!!", "It is a table."] {
      let scores = scorer.score(text).unwrap();
      assert_eq!(scores.compound, 0.0, "{text}: {scores:?}");
      assert_eq!(crate::label::classify(scores.compound), crate::label::Label::Neutral);
    }
  }

  #[test]
  fn test_vader_scores_are_rounded() {
    let scores = VaderScorer::new().score("I love this!").unwrap();
    assert_eq!(scores.compound, (scores.compound * 1e4).round() / 1e4);
    assert_eq!(scores.positive, (scores.positive * 1e3).round() / 1e3);
  }

  #[test]
  fn test_vader_components_sum_to_one() {
    let scorer = VaderScorer::new();
    for text in ["I love this!", "I hate this.", "It is a table.", "nan", "Not bad at all, honestly :)"] {
      let scores = scorer.score(text).unwrap();
      assert!((scores.component_sum() - 1.0).abs() < 1e-2, "{text}: {scores:?}");
      assert!((-1.0..=1.0).contains(&scores.compound));
    }
  }
}
