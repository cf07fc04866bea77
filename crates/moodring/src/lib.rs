//! Tweet sentiment classification.
//!
//! A CSV of tweets is loaded, every text is scored by a [`PolarityScorer`],
//! the compound score is mapped to a [`Label`], and the augmented table is
//! written next to the input together with a four-panel summary figure.

pub mod chart;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod label;
pub mod persist;
pub mod pipeline;
pub mod scorer;
pub mod summary;
pub mod table;

// Re-export commonly used types for easier testing
pub use commands::{analyze_file, run, Analysis};
pub use config::{Config, MissingText};
pub use error::{ConfigError, Error, Result, ScoreError};
pub use label::{classify, Label};
pub use pipeline::{score_table, ScoredTable, Sentiment};
pub use scorer::{PolarityScorer, PolarityScores, VaderScorer};
pub use summary::Summary;
pub use table::{load_table, Table, DEFAULT_TEXT_COLUMN};
