//! Fixed-bin histogram with a Gaussian kernel density overlay

use image::RgbImage;
use std::f64::consts::PI;

use super::text::{draw_text_centered, format_tick};
use super::{colors, draw_axes, draw_filled_rect, draw_line, draw_y_ticks, nice_ceiling, Panel};

const GRID_TICKS: u32 = 5;
const CURVE_POINTS: usize = 200;
const RANGE_TICKS: u32 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
  /// `bins + 1` ascending bin edges
  pub edges: Vec<f64>,
  pub counts: Vec<usize>,
}

impl Histogram {
  /// Equal-width bins over the data range. The last bin includes its right
  /// edge. Constant data is widened by 0.5 each side; empty data spans
  /// [-1, 1].
  pub fn new(values: &[f64], bins: usize) -> Self {
    let bins = bins.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

    let (mut lo, mut hi) = finite
      .iter()
      .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if finite.is_empty() {
      lo = -1.0;
      hi = 1.0;
    } else if lo == hi {
      lo -= 0.5;
      hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0; bins];
    for v in finite {
      let slot = (((v - lo) / width).floor() as usize).min(bins - 1);
      counts[slot] += 1;
    }

    Self { edges, counts }
  }

  pub fn range(&self) -> (f64, f64) {
    (self.edges[0], self.edges[self.edges.len() - 1])
  }

  pub fn bin_width(&self) -> f64 {
    let (lo, hi) = self.range();
    (hi - lo) / self.counts.len() as f64
  }

  pub fn max_count(&self) -> usize {
    self.counts.iter().copied().max().unwrap_or(0)
  }
}

/// Scott's rule: sample standard deviation × n^(-1/5). `None` when fewer
/// than two values or no spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
  let n = values.len();
  if n < 2 {
    return None;
  }

  let mean = values.iter().sum::<f64>() / n as f64;
  let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
  let std = variance.sqrt();
  if !std.is_finite() || std <= 0.0 {
    return None;
  }

  Some(std * (n as f64).powf(-0.2))
}

/// Gaussian kernel density of `values` evaluated at each point of `at`
pub fn gaussian_kde(values: &[f64], bandwidth: f64, at: &[f64]) -> Vec<f64> {
  if values.is_empty() || bandwidth <= 0.0 {
    return vec![0.0; at.len()];
  }

  let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * PI).sqrt());
  at.iter()
    .map(|x| {
      let sum: f64 = values
        .iter()
        .map(|v| {
          let z = (x - v) / bandwidth;
          (-0.5 * z * z).exp()
        })
        .sum();
      sum * norm
    })
    .collect()
}

pub fn draw_histogram(img: &mut RgbImage, area: Panel, values: &[f64], bins: usize) {
  let histogram = Histogram::new(values, bins);
  let (lo, hi) = histogram.range();
  let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

  // density in count units so it shares the histogram's y axis
  let xs: Vec<f64> =
    (0..CURVE_POINTS).map(|i| lo + (hi - lo) * i as f64 / (CURVE_POINTS - 1) as f64).collect();
  let curve: Option<Vec<f64>> = scott_bandwidth(&finite).map(|bw| {
    let scale = finite.len() as f64 * histogram.bin_width();
    gaussian_kde(&finite, bw, &xs).into_iter().map(|d| d * scale).collect()
  });

  let curve_peak = curve.as_ref().map(|c| c.iter().copied().fold(0.0, f64::max)).unwrap_or(0.0);
  let y_max = nice_ceiling((histogram.max_count() as f64).max(curve_peak));

  draw_axes(img, area, GRID_TICKS);
  draw_y_ticks(img, area, y_max, GRID_TICKS);
  for tick in 0..=RANGE_TICKS {
    let value = lo + (hi - lo) * tick as f64 / RANGE_TICKS as f64;
    let x = (area.x + area.width * tick / RANGE_TICKS) as i64;
    draw_text_centered(img, x, area.bottom() as i64 + 8, &format_tick(value), 1, colors::AXIS);
  }

  let bins = histogram.counts.len() as u32;
  for (i, &count) in histogram.counts.iter().enumerate() {
    let height = ((count as f64 / y_max) * area.height as f64).round() as u32;
    if height == 0 {
      continue;
    }
    let height = height.min(area.height);
    let x0 = area.x + area.width * i as u32 / bins;
    let x1 = area.x + area.width * (i as u32 + 1) / bins;
    // one-pixel gap between neighbouring bars
    let width = (x1 - x0).saturating_sub(1).max(1);
    draw_filled_rect(img, x0, area.bottom() - height, width, height, colors::LIGHT_BLUE);
  }

  if let Some(curve) = curve {
    let to_pixel = |i: usize, y: f64| -> (i64, i64) {
      let px = area.x as f64 + area.width as f64 * i as f64 / (CURVE_POINTS - 1) as f64;
      let py = area.bottom() as f64 - (y / y_max).clamp(0.0, 1.0) * area.height as f64;
      (px.round() as i64, py.round() as i64)
    };

    for i in 1..curve.len() {
      let (a, b) = (to_pixel(i - 1, curve[i - 1]), to_pixel(i, curve[i]));
      draw_line(img, a, b, colors::DEEP_BLUE);
      draw_line(img, (a.0, a.1 - 1), (b.0, b.1 - 1), colors::DEEP_BLUE);
    }
  }
}
