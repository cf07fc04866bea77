use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal pipeline errors. Any of these aborts the run before output is written.
#[derive(Error, Debug)]
pub enum Error {
  #[error("Error loading CSV file {}: {message}", path.display())]
  Load { path: PathBuf, message: String },

  #[error("Column '{column}' not found in the CSV file. Available columns: {}", available.join(", "))]
  Schema { column: String, available: Vec<String> },

  #[error("Failed to write results to {}: {message}", path.display())]
  Write { path: PathBuf, message: String },

  #[error("Failed to render chart {}: {message}", path.display())]
  Render { path: PathBuf, message: String },
}

impl Error {
  pub fn load(path: &Path, message: impl ToString) -> Self {
    Self::Load { path: path.to_path_buf(), message: message.to_string() }
  }

  pub fn schema(column: impl Into<String>, available: &[String]) -> Self {
    Self::Schema { column: column.into(), available: available.to_vec() }
  }

  pub fn write(path: &Path, message: impl ToString) -> Self {
    Self::Write { path: path.to_path_buf(), message: message.to_string() }
  }

  pub fn render(path: &Path, message: impl ToString) -> Self {
    Self::Render { path: path.to_path_buf(), message: message.to_string() }
  }

  /// Problems with the input itself. These end the run without output but
  /// are reported as a normal outcome rather than a failed exit.
  pub fn is_input_error(&self) -> bool {
    matches!(self, Error::Load { .. } | Error::Schema { .. })
  }

  /// Console lines describing the error
  pub fn report_lines(&self) -> Vec<String> {
    match self {
      Error::Schema { column, available } => vec![
        format!("Error: Column '{column}' not found in the CSV file."),
        format!("Available columns: {}", available.join(", ")),
      ],
      other => vec![other.to_string()],
    }
  }
}

/// A scoring call that failed for one record. Recovered locally by the pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
  #[error("scorer panicked: {0}")]
  Panicked(String),

  #[error("scorer returned no '{0}' score")]
  MissingScore(&'static str),

  #[error("scorer returned a non-finite '{key}' score: {value}")]
  NonFinite { key: &'static str, value: f64 },

  #[error("{0}")]
  Failed(String),
}

/// Problems reading or interpreting configuration
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Failed to read config file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("Invalid config file {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("Invalid value '{value}' for {key}")]
  InvalidValue { key: String, value: String },
}

impl ConfigError {
  pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
    Self::InvalidValue { key: key.into(), value: value.into() }
  }
}
