use image::{Rgb, RgbImage};
use std::f64::consts::TAU;

use super::text::{draw_text, draw_text_centered, draw_text_right, GLYPH_SIZE};
use super::{colors, Panel};

const TEXT_SCALE: u32 = 2;
/// Radius multiples for the slice name and its percentage
const LABEL_DISTANCE: f64 = 1.1;
const PERCENT_DISTANCE: f64 = 0.6;

/// Wedges start at three o'clock and run counter-clockwise. Zero-sized
/// slices take no area and get no text; an all-zero input draws nothing.
/// Each drawn wedge is named outside the circle and carries its share as
/// a one-decimal percentage inside.
pub fn draw_pie(img: &mut RgbImage, area: Panel, slices: &[(f64, Rgb<u8>, &str)]) {
  let total: f64 = slices.iter().map(|(value, ..)| value.max(0.0)).sum();
  if total <= 0.0 {
    return;
  }

  let mut bounds = Vec::with_capacity(slices.len());
  let mut running = 0.0;
  for (value, color, _) in slices {
    running += value.max(0.0) / total;
    bounds.push((running, *color));
  }
  // absorb rounding so the last wedge closes the circle
  if let Some(last) = bounds.last_mut() {
    last.0 = f64::INFINITY;
  }

  let cx = area.x as f64 + area.width as f64 / 2.0;
  let cy = area.y as f64 + area.height as f64 / 2.0;
  let radius = area.width.min(area.height) as f64 * 0.45;

  for py in area.y..area.bottom().min(img.height()) {
    for px in area.x..area.right().min(img.width()) {
      let dx = px as f64 - cx;
      let dy = cy - py as f64;
      if dx * dx + dy * dy > radius * radius {
        continue;
      }

      let fraction = dy.atan2(dx).rem_euclid(TAU) / TAU;
      if let Some((_, color)) = bounds.iter().find(|(end, _)| fraction < *end) {
        img.put_pixel(px, py, *color);
      }
    }
  }

  let half_glyph = (GLYPH_SIZE * TEXT_SCALE / 2) as i64;
  let mut start = 0.0;
  for (value, _, name) in slices {
    let share = value.max(0.0) / total;
    if share <= 0.0 {
      continue;
    }
    let angle = (start + share / 2.0) * TAU;
    start += share;

    let at = |distance: f64| {
      let x = cx + angle.cos() * radius * distance;
      let y = cy - angle.sin() * radius * distance;
      (x.round() as i64, y.round() as i64)
    };

    let (lx, ly) = at(LABEL_DISTANCE);
    if angle.cos() >= 0.0 {
      draw_text(img, lx, ly - half_glyph, name, TEXT_SCALE, colors::AXIS);
    } else {
      draw_text_right(img, lx, ly - half_glyph, name, TEXT_SCALE, colors::AXIS);
    }

    let (px, py) = at(PERCENT_DISTANCE);
    let percent = format!("{:.1}%", share * 100.0);
    draw_text_centered(img, px, py - half_glyph, &percent, TEXT_SCALE, colors::AXIS);
  }
}
