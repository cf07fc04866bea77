//! In-memory table and the CSV loader

use bentley::Sink;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

pub const DEFAULT_TEXT_COLUMN: &str = "text";

/// Header plus string cells, in file order. Every row has exactly
/// `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
  pub headers: Vec<String>,
  pub rows: Vec<Vec<String>>,
}

impl Table {
  pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
    Self { headers, rows }
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub fn column_index(&self, name: &str) -> Option<usize> {
    self.headers.iter().position(|header| header == name)
  }

  /// Index of `name`, or a schema error listing every available column
  pub fn require_column(&self, name: &str) -> Result<usize> {
    self.column_index(name).ok_or_else(|| Error::schema(name, &self.headers))
  }

  /// Parse CSV with a header row. Short rows are padded with empty cells,
  /// long rows are rejected.
  pub fn read_csv<R: io::Read>(reader: R) -> std::result::Result<Self, String> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> =
      reader.headers().map_err(|e| e.to_string())?.iter().map(str::to_string).collect();
    if headers.is_empty() {
      return Err("no header row".to_string());
    }

    let width = headers.len();
    let mut rows = Vec::new();
    for result in reader.records() {
      let record = result.map_err(|e| e.to_string())?;
      if record.len() > width {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        return Err(format!(
          "line {line}: expected {width} fields, found {}",
          record.len()
        ));
      }

      let mut row: Vec<String> = record.iter().map(str::to_string).collect();
      row.resize(width, String::new());
      rows.push(row);
    }

    Ok(Self { headers, rows })
  }
}

/// A loaded table with its text column resolved
#[derive(Debug, Clone)]
pub struct LoadedTable {
  pub table: Table,
  pub text_index: usize,
}

/// Read `path` and check that `text_column` exists
pub fn load_table(path: &Path, text_column: &str, sink: &dyn Sink) -> Result<LoadedTable> {
  sink.info(&format!("Loading data from {}...", path.display()));

  let file = std::fs::File::open(path).map_err(|e| Error::load(path, e))?;
  let table = Table::read_csv(io::BufReader::new(file)).map_err(|e| Error::load(path, e))?;

  sink.success(&format!("Successfully loaded {} tweets.", table.len()));
  tracing::debug!(columns = ?table.headers, rows = table.len(), "table loaded");

  let text_index = table.require_column(text_column)?;
  Ok(LoadedTable { table, text_index })
}
