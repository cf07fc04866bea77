use bentley::Sink;
use std::path::{Path, PathBuf};

use crate::chart;
use crate::config::Config;
use crate::error::Result;
use crate::persist::persist;
use crate::pipeline::{score_table, ScoredTable};
use crate::scorer::PolarityScorer;
use crate::summary::Summary;
use crate::table::load_table;

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct Analysis {
  pub scored: ScoredTable,
  pub summary: Summary,
  pub output_path: PathBuf,
}

/// Load, score, summarize, and write the augmented table. Stops at the first
/// fatal error; nothing is written when loading or the column check fails.
pub fn analyze_file(
  input: &Path,
  text_column: &str,
  scorer: &dyn PolarityScorer,
  config: &Config,
  sink: &dyn Sink,
) -> Result<Analysis> {
  let loaded = load_table(input, text_column, sink)?;
  let scored = score_table(loaded.table, loaded.text_index, scorer, config.missing_text, sink);

  let summary = Summary::from_sentiments(&scored.sentiments);
  summary.report(sink);
  tracing::debug!(
    compound = summary.means.compound,
    positive = summary.means.positive,
    neutral = summary.means.neutral,
    negative = summary.means.negative,
    "component means"
  );

  let output_path = persist(&scored, input, sink)?;
  Ok(Analysis { scored, summary, output_path })
}

/// [`analyze_file`] followed by the figure
pub fn run(
  input: &Path,
  text_column: &str,
  scorer: &dyn PolarityScorer,
  config: &Config,
  sink: &dyn Sink,
) -> Result<Analysis> {
  let analysis = analyze_file(input, text_column, scorer, config, sink)?;
  chart::visualize(&analysis.scored, config, sink)?;
  Ok(analysis)
}
