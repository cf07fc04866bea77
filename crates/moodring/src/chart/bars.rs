use image::{Rgb, RgbImage};

use super::text::draw_text_centered;
use super::{colors, draw_axes, draw_filled_rect, draw_y_ticks, Panel};

const GRID_TICKS: u32 = 5;
const BAR_FILL: f64 = 0.8;
const NAME_SCALE: u32 = 2;
const NAME_GAP: i64 = 8;

/// Smallest of 1, 2, 2.5, 5 × 10^k that is at least `value`; 1.0 for
/// non-positive input
pub fn nice_ceiling(value: f64) -> f64 {
  if !value.is_finite() || value <= 0.0 {
    return 1.0;
  }

  let magnitude = 10f64.powi(value.log10().floor() as i32);
  [1.0, 2.0, 2.5, 5.0, 10.0]
    .iter()
    .map(|step| step * magnitude)
    .find(|candidate| *candidate >= value)
    .unwrap_or(10.0 * magnitude)
}

/// One bar per entry in equal-width slots, heights scaled to `y_max`, each
/// slot named under the axis
pub fn draw_bars(img: &mut RgbImage, area: Panel, bars: &[(f64, Rgb<u8>, &str)], y_max: f64) {
  draw_axes(img, area, GRID_TICKS);
  if bars.is_empty() || y_max <= 0.0 {
    return;
  }
  draw_y_ticks(img, area, y_max, GRID_TICKS);

  let slot = area.width / bars.len() as u32;
  let bar_width = (slot as f64 * BAR_FILL).round() as u32;
  let inset = (slot - bar_width) / 2;

  for (i, (value, color, name)) in bars.iter().enumerate() {
    let x = area.x + i as u32 * slot + inset;
    let center = (area.x + i as u32 * slot + slot / 2) as i64;
    draw_text_centered(img, center, area.bottom() as i64 + NAME_GAP, name, NAME_SCALE, colors::AXIS);

    let fraction = (value / y_max).clamp(0.0, 1.0);
    let height = (fraction * area.height as f64).round() as u32;
    if height == 0 {
      continue;
    }
    draw_filled_rect(img, x, area.bottom() - height, bar_width, height, *color);
  }
}
