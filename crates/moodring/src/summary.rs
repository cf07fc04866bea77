//! Label distribution and mean component scores

use bentley::Sink;
use std::fmt;

use crate::label::Label;
use crate::pipeline::Sentiment;

/// Count and share of one label value
#[derive(Debug, Clone, PartialEq)]
pub struct LabelShare {
  /// `None` is the bucket of records that could not be scored
  pub label: Option<Label>,
  pub count: usize,
  /// count / total × 100, 0.0 when there are no records
  pub percentage: f64,
}

impl LabelShare {
  pub fn name(&self) -> &'static str {
    self.label.map(|label| label.as_str()).unwrap_or("unscored")
  }
}

impl fmt::Display for LabelShare {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {} tweets ({:.2}%)", self.name(), self.count, self.percentage)
  }
}

/// Arithmetic means over all records, unscored ones included as zeros
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComponentMeans {
  pub compound: f64,
  pub positive: f64,
  pub neutral: f64,
  pub negative: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
  pub total: usize,
  /// Observed labels in first-seen order, then unobserved labels at zero
  pub distribution: Vec<LabelShare>,
  pub means: ComponentMeans,
}

impl Summary {
  pub fn from_sentiments(sentiments: &[Sentiment]) -> Self {
    let total = sentiments.len();

    let mut order: Vec<Option<Label>> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    for sentiment in sentiments {
      match order.iter().position(|seen| *seen == sentiment.label) {
        Some(slot) => counts[slot] += 1,
        None => {
          order.push(sentiment.label);
          counts.push(1);
        }
      }
    }

    for label in Label::ALL {
      if !order.contains(&Some(label)) {
        order.push(Some(label));
        counts.push(0);
      }
    }

    let distribution = order
      .into_iter()
      .zip(counts)
      .map(|(label, count)| LabelShare { label, count, percentage: percentage(count, total) })
      .collect();

    Self { total, distribution, means: means(sentiments) }
  }

  /// Number of records carrying `label`
  pub fn count(&self, label: Label) -> usize {
    self
      .distribution
      .iter()
      .find(|share| share.label == Some(label))
      .map(|share| share.count)
      .unwrap_or(0)
  }

  /// Print the distribution block to `sink`
  pub fn report(&self, sink: &dyn Sink) {
    sink.blank();
    sink.plain("Sentiment Distribution:");
    for share in &self.distribution {
      sink.plain(&share.to_string());
    }
  }
}

fn percentage(count: usize, total: usize) -> f64 {
  if total == 0 {
    0.0
  } else {
    count as f64 / total as f64 * 100.0
  }
}

fn means(sentiments: &[Sentiment]) -> ComponentMeans {
  if sentiments.is_empty() {
    return ComponentMeans::default();
  }

  let n = sentiments.len() as f64;
  let sum = |pick: fn(&Sentiment) -> f64| sentiments.iter().map(pick).sum::<f64>() / n;

  ComponentMeans {
    compound: sum(|s| s.scores.compound),
    positive: sum(|s| s.scores.positive),
    neutral: sum(|s| s.scores.neutral),
    negative: sum(|s| s.scores.negative),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::scorer::PolarityScores;
  use bentley::Recorder;

  fn scored(compound: f64, positive: f64, neutral: f64, negative: f64) -> Sentiment {
    Sentiment::from_scores(PolarityScores::new(compound, positive, neutral, negative))
  }

  #[test]
  fn test_first_seen_order() {
    let sentiments = vec![
      scored(-0.5, 0.0, 0.5, 0.5),
      scored(0.6, 0.6, 0.4, 0.0),
      scored(-0.3, 0.0, 0.7, 0.3),
    ];
    let summary = Summary::from_sentiments(&sentiments);

    let names: Vec<_> = summary.distribution.iter().map(LabelShare::name).collect();
    assert_eq!(names, vec!["negative", "positive", "neutral"]);
    assert_eq!(summary.count(Label::Negative), 2);
    assert_eq!(summary.count(Label::Neutral), 0);
    assert!((summary.distribution[0].percentage - 66.666_666).abs() < 1e-3);
    assert_eq!(summary.distribution[0].to_string(), "negative: 2 tweets (66.67%)");
  }

  #[test]
  fn test_means() {
    let sentiments = vec![scored(0.6, 0.6, 0.4, 0.0), scored(-0.4, 0.0, 0.6, 0.4)];
    let summary = Summary::from_sentiments(&sentiments);

    assert!((summary.means.positive - 0.3).abs() < 1e-12);
    assert!((summary.means.neutral - 0.5).abs() < 1e-12);
    assert!((summary.means.negative - 0.2).abs() < 1e-12);
    assert!((summary.means.compound - 0.1).abs() < 1e-12);
  }

  #[test]
  fn test_empty_table_reports_zero_for_all_labels() {
    let summary = Summary::from_sentiments(&[]);

    assert_eq!(summary.total, 0);
    assert_eq!(summary.distribution.len(), 3);
    for share in &summary.distribution {
      assert_eq!(share.count, 0);
      assert_eq!(share.percentage, 0.0);
      assert!(share.to_string().ends_with("0 tweets (0.00%)"));
    }
    assert_eq!(summary.means, ComponentMeans::default());
  }

  #[test]
  fn test_unscored_bucket() {
    let sentiments = vec![scored(0.6, 0.6, 0.4, 0.0), Sentiment::default()];
    let summary = Summary::from_sentiments(&sentiments);

    let unscored = summary.distribution.iter().find(|s| s.label.is_none()).unwrap();
    assert_eq!(unscored.name(), "unscored");
    assert_eq!(unscored.count, 1);
    assert_eq!(unscored.percentage, 50.0);
    // zeros from the failed record pull the mean down
    assert!((summary.means.positive - 0.3).abs() < 1e-12);
  }

  #[test]
  fn test_report_lines() {
    let summary = Summary::from_sentiments(&[scored(0.6, 0.6, 0.4, 0.0)]);
    let recorder = Recorder::default();
    summary.report(&recorder);

    assert_eq!(
      recorder.messages(),
      vec![
        "",
        "Sentiment Distribution:",
        "positive: 1 tweets (100.00%)",
        "neutral: 0 tweets (0.00%)",
        "negative: 0 tweets (0.00%)",
      ]
    );
  }
}
