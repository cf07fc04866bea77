//! Bitmap text on the figure
//!
//! Glyphs come from the 8×8 public-domain font in `font8x8`, scaled by
//! pixel replication. Row bytes are read least significant bit first, which
//! is the glyph's left column.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};

pub const GLYPH_SIZE: u32 = 8;

/// Rendered width of `text` in pixels
pub fn text_width(text: &str, scale: u32) -> u32 {
  text.chars().count() as u32 * GLYPH_SIZE * scale.max(1)
}

fn glyph(c: char) -> [u8; 8] {
  BASIC_FONTS.get(c).or_else(|| BASIC_FONTS.get('?')).unwrap_or([0; 8])
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
  if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
    img.put_pixel(x as u32, y as u32, color);
  }
}

/// Call `plot(column, row)` for every set pixel of `text`, in unscaled
/// glyph coordinates along the text
fn for_each_pixel(text: &str, mut plot: impl FnMut(i64, i64)) {
  let size = GLYPH_SIZE as i64;
  for (i, c) in text.chars().enumerate() {
    for (row, bits) in glyph(c).iter().enumerate() {
      for col in 0..8 {
        if bits & (1 << col) != 0 {
          plot(i as i64 * size + col, row as i64);
        }
      }
    }
  }
}

/// Left-to-right text with its top-left corner at (x, y)
pub fn draw_text(img: &mut RgbImage, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
  let scale = scale.max(1) as i64;
  for_each_pixel(text, |col, row| {
    for dy in 0..scale {
      for dx in 0..scale {
        put(img, x + col * scale + dx, y + row * scale + dy, color);
      }
    }
  });
}

/// Horizontally centered on `center_x`
pub fn draw_text_centered(
  img: &mut RgbImage,
  center_x: i64,
  y: i64,
  text: &str,
  scale: u32,
  color: Rgb<u8>,
) {
  let x = center_x - text_width(text, scale) as i64 / 2;
  draw_text(img, x, y, text, scale, color);
}

/// Right edge at `right_x`
pub fn draw_text_right(
  img: &mut RgbImage,
  right_x: i64,
  y: i64,
  text: &str,
  scale: u32,
  color: Rgb<u8>,
) {
  draw_text(img, right_x - text_width(text, scale) as i64, y, text, scale, color);
}

/// Bottom-to-top text (rotated a quarter turn counter-clockwise), its left
/// edge at `x` and centered on `center_y`
pub fn draw_text_vertical(
  img: &mut RgbImage,
  x: i64,
  center_y: i64,
  text: &str,
  scale: u32,
  color: Rgb<u8>,
) {
  let scale_px = scale.max(1) as i64;
  let baseline = center_y + text_width(text, scale) as i64 / 2;
  for_each_pixel(text, |col, row| {
    for dy in 0..scale_px {
      for dx in 0..scale_px {
        put(img, x + row * scale_px + dx, baseline - col * scale_px - dy, color);
      }
    }
  });
}

/// Axis tick value: integers without decimals, others to at most 2 places
pub fn format_tick(value: f64) -> String {
  if value.fract().abs() < 1e-9 {
    format!("{value:.0}")
  } else {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').to_string()
  }
}
