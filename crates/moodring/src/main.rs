use anyhow::{Context, Result};
use bentley::{Console, Sink};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use moodring::{Config, VaderScorer, DEFAULT_TEXT_COLUMN};

const LOG_ENV: &str = "MOODRING_LOG";

const USAGE: &str = "Usage: moodring <csv_file> [text_column_name]
Default text column name is 'text' if not specified";

#[derive(Parser)]
#[command(name = "moodring")]
#[command(about = "Score the sentiment of every tweet in a CSV file")]
#[command(version)]
struct Cli {
  /// CSV file with a header row
  csv_file: Option<PathBuf>,

  /// Column holding the tweet text
  #[arg(default_value = DEFAULT_TEXT_COLUMN)]
  text_column: String,
}

fn init_tracing() {
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(filter)
    .init();
}

fn run(csv_file: PathBuf, text_column: &str) -> Result<()> {
  let config = Config::load().context("Failed to load configuration")?;
  tracing::debug!(?config, "configuration loaded");

  let console = Console;
  bentley::info!("Initializing sentiment analyzer...");
  let scorer = VaderScorer::new();

  match moodring::run(&csv_file, text_column, &scorer, &config, &console) {
    Ok(_) => Ok(()),
    Err(e) if e.is_input_error() => {
      for line in e.report_lines() {
        console.plain(&line);
      }
      Ok(())
    }
    Err(e) => Err(e.into()),
  }
}

fn main() {
  let cli = Cli::parse();

  let Some(csv_file) = cli.csv_file else {
    println!("{USAGE}");
    process::exit(1);
  };

  init_tracing();

  if let Err(e) = run(csv_file, &cli.text_column) {
    bentley::error!("{e:#}");
    process::exit(1);
  }
}
