//! Configuration management for moodring
//!
//! Settings come from the first JSON config file found, then environment
//! variables override individual keys. Classification thresholds and the
//! progress interval are fixed and not part of it.

use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

pub const DEFAULT_CHART_PATH: &str = "sentiment_analysis_results.png";

pub const CONFIG_ENV: &str = "MOODRING_CONFIG";
pub const CHART_ENV: &str = "MOODRING_CHART";
pub const DISPLAY_ENV: &str = "MOODRING_DISPLAY";
pub const MISSING_TEXT_ENV: &str = "MOODRING_MISSING_TEXT";

/// How a record with no text value is fed to the scorer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingText {
  /// Score the literal string "nan", as a pandas-based loader would
  #[default]
  Nan,
  /// Score the empty string
  Empty,
}

impl MissingText {
  pub fn substitute(&self) -> &'static str {
    match self {
      MissingText::Nan => "nan",
      MissingText::Empty => "",
    }
  }
}

impl fmt::Display for MissingText {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MissingText::Nan => f.write_str("nan"),
      MissingText::Empty => f.write_str("empty"),
    }
  }
}

impl FromStr for MissingText {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "nan" => Ok(MissingText::Nan),
      "empty" => Ok(MissingText::Empty),
      _ => Err(ConfigError::invalid_value(MISSING_TEXT_ENV, s)),
    }
  }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
  /// Where the four-panel figure is written
  #[serde(default = "default_chart_path")]
  pub chart_path: PathBuf,
  /// Open the figure after saving. `None` decides from the terminal.
  #[serde(default)]
  pub display: Option<bool>,
  #[serde(default)]
  pub missing_text: MissingText,
}

fn default_chart_path() -> PathBuf {
  PathBuf::from(DEFAULT_CHART_PATH)
}

impl Default for Config {
  fn default() -> Self {
    Self {
      chart_path: default_chart_path(),
      display: None,
      missing_text: MissingText::default(),
    }
  }
}

impl Config {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&content)
      .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
  }

  /// Load from the discovered config file (or defaults) and apply the
  /// process environment on top
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_with(|key| env::var(key).ok())
  }

  /// Same as [`Config::load`] with an injectable environment lookup
  pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let base = match discover(&lookup) {
      Some(path) => Self::load_from_file(path)?,
      None => Config::default(),
    };
    base.apply_env(lookup)
  }

  /// Override fields from environment variables
  pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(chart) = lookup(CHART_ENV).filter(|v| !v.trim().is_empty()) {
      self.chart_path = PathBuf::from(chart);
    }

    if let Some(display) = lookup(DISPLAY_ENV).filter(|v| !v.trim().is_empty()) {
      self.display = Some(parse_bool(DISPLAY_ENV, &display)?);
    }

    if let Some(policy) = lookup(MISSING_TEXT_ENV).filter(|v| !v.trim().is_empty()) {
      self.missing_text = policy.parse()?;
    }

    Ok(self)
  }

  /// Whether the figure should be opened after it is saved
  pub fn should_display(&self) -> bool {
    self.display.unwrap_or_else(console::user_attended)
  }
}

/// Find the config file to use: explicit env path first, then the working
/// directory, then the user config directory
fn discover<F>(lookup: &F) -> Option<PathBuf>
where
  F: Fn(&str) -> Option<String>,
{
  discover_in(lookup, Path::new(""), dirs::config_dir())
}

fn discover_in<F>(lookup: &F, working_dir: &Path, config_dir: Option<PathBuf>) -> Option<PathBuf>
where
  F: Fn(&str) -> Option<String>,
{
  if let Some(explicit) = lookup(CONFIG_ENV).filter(|v| !v.trim().is_empty()) {
    return Some(PathBuf::from(explicit));
  }

  let local = [".moodring.json", "moodring.json"];
  for name in &local {
    let path = working_dir.join(name);
    if path.exists() {
      return Some(path);
    }
  }

  config_dir.map(|dir| dir.join("moodring").join("config.json")).filter(|path| path.exists())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "0" | "false" | "no" | "off" => Ok(false),
    _ => Err(ConfigError::invalid_value(key, value)),
  }
}
