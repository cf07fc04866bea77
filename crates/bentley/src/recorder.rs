//! In-memory sink
//!
//! Keeps the most recent entries up to a fixed capacity, oldest dropped
//! first. Used by tests to assert on reported output.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::{Level, Sink};

/// A single recorded line
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
  pub timestamp: DateTime<Utc>,
  pub level: Level,
  pub message: String,
}

/// Bounded, thread-safe log storage
#[derive(Debug)]
pub struct Recorder {
  entries: Mutex<VecDeque<LogEntry>>,
  max_entries: usize,
}

impl Recorder {
  /// Create a recorder that holds at most `max_entries` lines
  pub fn new(max_entries: usize) -> Self {
    Self {
      entries: Mutex::new(VecDeque::with_capacity(max_entries.min(1024))),
      max_entries,
    }
  }

  fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
    self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  /// Entries in the order they were recorded, optionally only one level
  pub fn entries(&self, level_filter: Option<Level>) -> Vec<LogEntry> {
    self
      .lock()
      .iter()
      .filter(|entry| level_filter.map_or(true, |level| entry.level == level))
      .cloned()
      .collect()
  }

  /// Recorded message texts, oldest first
  pub fn messages(&self) -> Vec<String> {
    self.lock().iter().map(|entry| entry.message.clone()).collect()
  }

  /// Whether any recorded message contains `needle`
  pub fn contains(&self, needle: &str) -> bool {
    self.lock().iter().any(|entry| entry.message.contains(needle))
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }
}

impl Default for Recorder {
  fn default() -> Self {
    Self::new(10_000)
  }
}

impl Sink for Recorder {
  fn emit(&self, level: Level, message: &str) {
    if self.max_entries == 0 {
      return;
    }

    let mut entries = self.lock();
    if entries.len() >= self.max_entries {
      entries.pop_front();
    }

    entries.push_back(LogEntry {
      timestamp: Utc::now(),
      level,
      message: message.to_string(),
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_records_in_order() {
    let recorder = Recorder::new(10);
    recorder.info("first");
    recorder.warn("second");
    recorder.success("third");

    assert_eq!(recorder.messages(), vec!["first", "second", "third"]);
    assert_eq!(recorder.len(), 3);
  }

  #[test]
  fn test_capacity_drops_oldest() {
    let recorder = Recorder::new(2);
    recorder.info("a");
    recorder.info("b");
    recorder.info("c");

    assert_eq!(recorder.messages(), vec!["b", "c"]);
    assert_eq!(recorder.len(), 2);
  }

  #[test]
  fn test_zero_capacity_records_nothing() {
    let recorder = Recorder::new(0);
    recorder.info("ignored");
    assert!(recorder.is_empty());
  }

  #[test]
  fn test_level_filter() {
    let recorder = Recorder::default();
    recorder.info("loading");
    recorder.error("broken row");
    recorder.error("another broken row");

    let errors = recorder.entries(Some(Level::Error));
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|entry| entry.level == Level::Error));
    assert_eq!(recorder.entries(None).len(), 3);
  }

  #[test]
  fn test_contains_matches_substrings() {
    let recorder = Recorder::default();
    recorder.progress("Processed 1000 tweets...");
    assert!(recorder.contains("1000 tweets"));
    assert!(!recorder.contains("2000 tweets"));
  }
}
