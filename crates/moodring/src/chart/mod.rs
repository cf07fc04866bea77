//! Four-panel figure rendering
//!
//! Panels, left to right and top to bottom: label share pie, label count
//! bars, compound score histogram with a density curve, mean component
//! score bars. Every panel carries a title; the three bar panels also get
//! axis labels and tick values.

mod bars;
mod histogram;
mod pie;
mod text;

pub use bars::nice_ceiling;
pub use histogram::{gaussian_kde, scott_bandwidth, Histogram};
pub use text::format_tick;

use bentley::Sink;
use image::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::display;
use crate::error::{Error, Result};
use crate::label::Label;
use crate::pipeline::{ScoredTable, Sentiment};
use crate::summary::Summary;

pub const HISTOGRAM_BINS: usize = 50;

const TITLE_SCALE: u32 = 2;
const LABEL_SCALE: u32 = 2;
const TICK_SCALE: u32 = 1;

/// Common color definitions
pub mod colors {
  use image::Rgb;

  pub const GREEN: Rgb<u8> = Rgb([0, 128, 0]);
  pub const GRAY: Rgb<u8> = Rgb([128, 128, 128]);
  pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
  pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
  pub const AXIS: Rgb<u8> = Rgb([51, 51, 51]);
  pub const GRID: Rgb<u8> = Rgb([222, 222, 222]);
  pub const LIGHT_BLUE: Rgb<u8> = Rgb([140, 170, 212]);
  pub const DEEP_BLUE: Rgb<u8> = Rgb([76, 114, 176]);
  pub const DEEP_ORANGE: Rgb<u8> = Rgb([221, 132, 82]);
  pub const DEEP_GREEN: Rgb<u8> = Rgb([85, 168, 104]);
}

pub fn label_color(label: Label) -> Rgb<u8> {
  match label {
    Label::Positive => colors::GREEN,
    Label::Neutral => colors::GRAY,
    Label::Negative => colors::RED,
  }
}

/// Pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
  pub x: u32,
  pub y: u32,
  pub width: u32,
  pub height: u32,
}

impl Panel {
  pub fn right(&self) -> u32 {
    self.x + self.width
  }

  pub fn bottom(&self) -> u32 {
    self.y + self.height
  }

  pub fn inset(&self, margin: u32) -> Panel {
    let margin = margin.min(self.width / 2).min(self.height / 2);
    Panel {
      x: self.x + margin,
      y: self.y + margin,
      width: self.width - 2 * margin,
      height: self.height - 2 * margin,
    }
  }
}

/// Figure configuration
#[derive(Debug, Clone)]
pub struct FigureConfig {
  pub width: u32,
  pub height: u32,
  pub background: Rgb<u8>,
  /// Space around each panel's plot area, holding its title and labels
  pub margin: u32,
}

impl Default for FigureConfig {
  fn default() -> Self {
    Self { width: 1500, height: 1200, background: colors::WHITE, margin: 70 }
  }
}

impl FigureConfig {
  /// The 2×2 grid cells: pie, counts, histogram, means
  pub fn cells(&self) -> [Panel; 4] {
    let half_w = self.width / 2;
    let half_h = self.height / 2;
    let cell = |col: u32, row: u32| Panel { x: col * half_w, y: row * half_h, width: half_w, height: half_h };
    [cell(0, 0), cell(1, 0), cell(0, 1), cell(1, 1)]
  }

  /// Plot areas inside [`FigureConfig::cells`]
  pub fn panels(&self) -> [Panel; 4] {
    self.cells().map(|cell| cell.inset(self.margin))
  }
}

/// Title centered over the cell, and optionally the x label under the plot
/// area and the y label running up the cell's left edge
fn draw_panel_text(
  img: &mut RgbImage,
  cell: Panel,
  area: Panel,
  title: &str,
  axis_labels: Option<(&str, &str)>,
) {
  let center_x = (cell.x + cell.width / 2) as i64;
  text::draw_text_centered(img, center_x, cell.y as i64 + 20, title, TITLE_SCALE, colors::AXIS);

  if let Some((x_label, y_label)) = axis_labels {
    let area_center_x = (area.x + area.width / 2) as i64;
    let area_center_y = (area.y + area.height / 2) as i64;
    text::draw_text_centered(
      img,
      area_center_x,
      area.bottom() as i64 + 36,
      x_label,
      LABEL_SCALE,
      colors::AXIS,
    );
    text::draw_text_vertical(img, cell.x as i64 + 8, area_center_y, y_label, LABEL_SCALE, colors::AXIS);
  }
}

/// Draw the whole figure for one set of scored records
pub fn render_figure(sentiments: &[Sentiment], config: &FigureConfig) -> RgbImage {
  let mut img = RgbImage::from_pixel(config.width, config.height, config.background);
  let summary = Summary::from_sentiments(sentiments);
  let [pie_cell, counts_cell, histogram_cell, means_cell] = config.cells();
  let [pie_area, counts_area, histogram_area, means_area] = config.panels();

  let shares: Vec<(f64, Rgb<u8>, &str)> = Label::ALL
    .iter()
    .map(|&label| (summary.count(label) as f64, label_color(label), label.as_str()))
    .collect();
  pie::draw_pie(&mut img, pie_area, &shares);
  draw_panel_text(&mut img, pie_cell, pie_area, "Overall Sentiment Distribution", None);

  let max_count = Label::ALL.iter().map(|&label| summary.count(label)).max().unwrap_or(0);
  bars::draw_bars(&mut img, counts_area, &shares, nice_ceiling(max_count as f64));
  draw_panel_text(
    &mut img,
    counts_cell,
    counts_area,
    "Sentiment Counts",
    Some(("Sentiment", "Number of Tweets")),
  );

  let compounds: Vec<f64> = sentiments.iter().map(|s| s.scores.compound).collect();
  histogram::draw_histogram(&mut img, histogram_area, &compounds, HISTOGRAM_BINS);
  draw_panel_text(
    &mut img,
    histogram_cell,
    histogram_area,
    "Distribution of Compound Sentiment Scores",
    Some(("Compound Score", "Frequency")),
  );

  let means = [
    (summary.means.positive, colors::DEEP_BLUE, "positive"),
    (summary.means.neutral, colors::DEEP_ORANGE, "neutral"),
    (summary.means.negative, colors::DEEP_GREEN, "negative"),
  ];
  bars::draw_bars(&mut img, means_area, &means, 1.0);
  draw_panel_text(
    &mut img,
    means_cell,
    means_area,
    "Average Sentiment Component Scores",
    Some(("Sentiment Component", "Average Score")),
  );

  img
}

pub fn save_figure(img: &RgbImage, path: &Path) -> Result<()> {
  img.save_with_format(path, ImageFormat::Png).map_err(|e| Error::render(path, e))
}

/// Render, save to the configured path, and open it when configured to
pub fn visualize(scored: &ScoredTable, config: &Config, sink: &dyn Sink) -> Result<PathBuf> {
  let img = render_figure(&scored.sentiments, &FigureConfig::default());
  let path = config.chart_path.clone();
  save_figure(&img, &path)?;
  sink.success(&format!("Visualizations saved to {}", path.display()));

  if config.should_display() {
    if let Err(e) = display::open_viewer(&path) {
      sink.warn(&format!("Could not open {}: {e}", path.display()));
    }
  }

  Ok(path)
}

/// Helper function to draw a filled rectangle
pub fn draw_filled_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
  let x_end = x.saturating_add(width).min(img.width());
  let y_end = y.saturating_add(height).min(img.height());

  for py in y..y_end {
    for px in x..x_end {
      img.put_pixel(px, py, color);
    }
  }
}

/// Helper function to draw a horizontal line
pub fn draw_horizontal_line(img: &mut RgbImage, y: u32, x1: u32, x2: u32, color: Rgb<u8>) {
  let (start, end) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
  if y >= img.height() || img.width() == 0 {
    return;
  }
  for x in start..=end.min(img.width() - 1) {
    img.put_pixel(x, y, color);
  }
}

/// Helper function to draw a vertical line
pub fn draw_vertical_line(img: &mut RgbImage, x: u32, y1: u32, y2: u32, color: Rgb<u8>) {
  let (start, end) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
  if x >= img.width() || img.height() == 0 {
    return;
  }
  for y in start..=end.min(img.height() - 1) {
    img.put_pixel(x, y, color);
  }
}

/// Bresenham line between two points; off-image pixels are skipped
pub fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
  let (mut x0, mut y0) = from;
  let (x1, y1) = to;
  let dx = (x1 - x0).abs();
  let dy = -(y1 - y0).abs();
  let sx = if x0 < x1 { 1 } else { -1 };
  let sy = if y0 < y1 { 1 } else { -1 };
  let mut err = dx + dy;

  loop {
    if x0 >= 0 && y0 >= 0 && (x0 as u32) < img.width() && (y0 as u32) < img.height() {
      img.put_pixel(x0 as u32, y0 as u32, color);
    }
    if x0 == x1 && y0 == y1 {
      break;
    }
    let e2 = 2 * err;
    if e2 >= dy {
      err += dy;
      x0 += sx;
    }
    if e2 <= dx {
      err += dx;
      y0 += sy;
    }
  }
}

/// Horizontal gridlines at `ticks` even steps plus the left and bottom axes
pub fn draw_axes(img: &mut RgbImage, area: Panel, ticks: u32) {
  if ticks > 0 {
    for tick in 1..=ticks {
      let y = area.bottom() - area.height * tick / ticks;
      draw_horizontal_line(img, y, area.x, area.right(), colors::GRID);
    }
  }
  draw_horizontal_line(img, area.bottom(), area.x, area.right(), colors::AXIS);
  draw_vertical_line(img, area.x, area.y, area.bottom(), colors::AXIS);
}

/// Values for the gridlines of [`draw_axes`], right-aligned left of the axis
pub fn draw_y_ticks(img: &mut RgbImage, area: Panel, y_max: f64, ticks: u32) {
  let half_glyph = (text::GLYPH_SIZE * TICK_SCALE / 2) as i64;
  for tick in 0..=ticks.max(1) {
    let value = y_max * tick as f64 / ticks.max(1) as f64;
    let y = (area.bottom() - area.height * tick / ticks.max(1)) as i64;
    let label = text::format_tick(value);
    text::draw_text_right(img, area.x as i64 - 6, y - half_glyph, &label, TICK_SCALE, colors::AXIS);
  }
}
