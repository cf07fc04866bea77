//! ## Features
//!
//! - Level-prefixed, colored console lines (info, progress, success, warn, error)
//! - Multi-line message support with consistent formatting
//! - A [`Sink`] trait so library code reports through whatever the caller injects
//! - [`Recorder`], a bounded in-memory sink with timestamps and level filtering
//!
//! ## Usage
//!
//! Binaries log with the free functions or macros: `info!()`, `error!()`.
//!
//! Libraries take a `&dyn Sink` and call `sink.info(..)` and friends, so a
//! test can pass a [`Recorder`] and assert on what was reported.

use colored::*;

mod recorder;

pub use recorder::{LogEntry, Recorder};

/// Severity of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
  /// Unprefixed output, used for report bodies and tables
  Plain,
  Info,
  Progress,
  Success,
  Warn,
  Error,
}

impl Level {
  pub fn as_str(&self) -> &'static str {
    match self {
      Level::Plain => "plain",
      Level::Info => "info",
      Level::Progress => "prog",
      Level::Success => "sccs",
      Level::Warn => "warn",
      Level::Error => "error",
    }
  }

  fn color(&self) -> Color {
    match self {
      Level::Plain => Color::White,
      Level::Info => Color::Blue,
      Level::Progress => Color::Cyan,
      Level::Success => Color::Green,
      Level::Warn => Color::Yellow,
      Level::Error => Color::Red,
    }
  }

  /// Warnings and errors go to stderr, everything else to stdout
  pub fn is_diagnostic(&self) -> bool {
    matches!(self, Level::Warn | Level::Error)
  }
}

/// Destination for human-readable progress and result lines
pub trait Sink {
  fn emit(&self, level: Level, message: &str);

  fn plain(&self, message: &str) {
    self.emit(Level::Plain, message);
  }

  fn info(&self, message: &str) {
    self.emit(Level::Info, message);
  }

  fn progress(&self, message: &str) {
    self.emit(Level::Progress, message);
  }

  fn success(&self, message: &str) {
    self.emit(Level::Success, message);
  }

  fn warn(&self, message: &str) {
    self.emit(Level::Warn, message);
  }

  fn error(&self, message: &str) {
    self.emit(Level::Error, message);
  }

  /// Print an empty separator line
  fn blank(&self) {
    self.emit(Level::Plain, "");
  }
}

impl<S: Sink + ?Sized> Sink for &S {
  fn emit(&self, level: Level, message: &str) {
    (**self).emit(level, message);
  }
}

/// Sink that writes to the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Sink for Console {
  fn emit(&self, level: Level, message: &str) {
    if message.is_empty() {
      write_line(level, "");
      return;
    }

    for line in message.lines() {
      match level {
        Level::Plain => write_line(level, line),
        _ => write_line(level, &format!("{} {line}", format_prefix(level))),
      }
    }
  }
}

fn write_line(level: Level, line: &str) {
  if level.is_diagnostic() {
    eprintln!("{line}");
  } else {
    println!("{line}");
  }
}

/// Format a colored prefix for log messages
fn format_prefix(level: Level) -> String {
  let prefix = level.as_str();
  format!(
    "[{}]{:<width$}",
    prefix.color(level.color()).bold(),
    "",
    width = 7usize.saturating_sub(prefix.len() + 2)
  )
}

pub fn info(message: &str) {
  Console.info(message);
}

pub fn error(message: &str) {
  Console.error(message);
}

#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => {
    $crate::info(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => {
    $crate::error(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}
