//! Three-way sentiment labels and the fixed compound-score thresholds

/// Compound scores at or above this are positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this are negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
  Positive,
  Neutral,
  Negative,
}

impl Label {
  /// Chart and report order
  pub const ALL: [Label; 3] = [Label::Positive, Label::Neutral, Label::Negative];

  pub fn as_str(&self) -> &'static str {
    match self {
      Label::Positive => "positive",
      Label::Neutral => "neutral",
      Label::Negative => "negative",
    }
  }
}

/// Map a compound score to its label.
///
/// NaN satisfies neither threshold and lands on neutral.
pub fn classify(compound: f64) -> Label {
  if compound >= POSITIVE_THRESHOLD {
    Label::Positive
  } else if compound <= NEGATIVE_THRESHOLD {
    Label::Negative
  } else {
    Label::Neutral
  }
}
