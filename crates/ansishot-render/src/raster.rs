//! Shape rasterization on RGBA buffers
//!
//! Plain rectangles and lines go through imageproc. Rounded shapes are
//! described by signed distance functions evaluated at pixel centers, with
//! coverage falling off linearly over one pixel at the edge.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_antialiased_line_segment_mut, draw_filled_rect_mut, Blend};
use imageproc::pixelops::interpolate;
use imageproc::rect::Rect as PixelRect;

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same size, moved by `(dx, dy)`
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    fn grow(&self, by: f32) -> (f32, f32, f32, f32) {
        (self.x - by, self.y - by, self.right() + by, self.bottom() + by)
    }
}

/// Source-over blend of `color` into one pixel, scaled by `coverage`.
///
/// Out-of-bounds coordinates are ignored.
pub fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= i64::from(image.width()) || y >= i64::from(image.height()) {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    if coverage <= 0.0 {
        return;
    }

    let src_a = f32::from(color[3]) / 255.0 * coverage;
    let dst = image.get_pixel_mut(x as u32, y as u32);
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }

    for i in 0..3 {
        let s = f32::from(color[i]);
        let d = f32::from(dst[i]);
        let v = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        dst[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Visit every pixel whose center lies inside the given box, clipped to the image
fn for_each_pixel(
    image: &mut RgbaImage,
    (x0, y0, x1, y1): (f32, f32, f32, f32),
    mut f: impl FnMut(&mut RgbaImage, i64, i64, f32, f32),
) {
    let max_x = i64::from(image.width());
    let max_y = i64::from(image.height());
    let left = (x0.floor() as i64).max(0);
    let top = (y0.floor() as i64).max(0);
    let right = (x1.ceil() as i64).min(max_x);
    let bottom = (y1.ceil() as i64).min(max_y);

    for py in top..bottom {
        for px in left..right {
            f(image, px, py, px as f32 + 0.5, py as f32 + 0.5);
        }
    }
}

fn edge_coverage(distance: f32) -> f32 {
    (0.5 - distance).clamp(0.0, 1.0)
}

/// Signed distance from `(px, py)` to a rounded box
fn rounded_box_distance(px: f32, py: f32, rect: Rect, radius: f32) -> f32 {
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    let radius = radius.clamp(0.0, half_w.min(half_h));
    let qx = (px - (rect.x + half_w)).abs() - half_w + radius;
    let qy = (py - (rect.y + half_h)).abs() - half_h + radius;
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

/// Fill an axis-aligned rectangle snapped to whole pixels, blending over
/// what is already drawn
pub fn fill_rect(image: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    let left = rect.x.round();
    let top = rect.y.round();
    let width = rect.right().round() - left;
    let height = rect.bottom().round() - top;
    if width < 1.0 || height < 1.0 {
        return;
    }

    let pixels = PixelRect::at(left as i32, top as i32).of_size(width as u32, height as u32);
    let mut blend = Blend(std::mem::take(image));
    draw_filled_rect_mut(&mut blend, pixels, color);
    *image = blend.0;
}

pub fn fill_rounded_rect(image: &mut RgbaImage, rect: Rect, radius: f32, color: Rgba<u8>) {
    if rect.is_empty() {
        return;
    }
    for_each_pixel(image, rect.grow(1.0), |image, px, py, cx, cy| {
        let d = rounded_box_distance(cx, cy, rect, radius);
        blend_pixel(image, px, py, color, edge_coverage(d));
    });
}

/// Stroke the outline of a rounded rectangle, centered on its edge
pub fn stroke_rounded_rect(
    image: &mut RgbaImage,
    rect: Rect,
    radius: f32,
    width: f32,
    color: Rgba<u8>,
) {
    if rect.is_empty() || width <= 0.0 {
        return;
    }
    for_each_pixel(image, rect.grow(width / 2.0 + 1.0), |image, px, py, cx, cy| {
        let d = rounded_box_distance(cx, cy, rect, radius).abs() - width / 2.0;
        blend_pixel(image, px, py, color, edge_coverage(d));
    });
}

pub fn fill_circle(image: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    if radius <= 0.0 {
        return;
    }
    let bounds = (cx - radius - 1.0, cy - radius - 1.0, cx + radius + 1.0, cy + radius + 1.0);
    for_each_pixel(image, bounds, |image, px, py, pcx, pcy| {
        let d = (pcx - cx).hypot(pcy - cy) - radius;
        blend_pixel(image, px, py, color, edge_coverage(d));
    });
}

/// Draw an anti-aliased line segment as parallel one-pixel strokes
pub fn draw_line(
    image: &mut RgbaImage,
    (x0, y0): (f32, f32),
    (x1, y1): (f32, f32),
    width: f32,
    color: Rgba<u8>,
) {
    if width <= 0.0 {
        return;
    }
    let (dx, dy) = (x1 - x0, y1 - y0);
    let length = dx.hypot(dy);
    // Unit normal; a point gets a horizontal stroke
    let (nx, ny) = if length > 0.0 {
        (-dy / length, dx / length)
    } else {
        (0.0, 1.0)
    };

    let strokes = width.round().max(1.0) as u32;
    for i in 0..strokes {
        let offset = i as f32 - (strokes - 1) as f32 / 2.0;
        let (ox, oy) = (nx * offset, ny * offset);
        let start = ((x0 + ox).floor() as i32, (y0 + oy).floor() as i32);
        let end = ((x1 + ox).floor() as i32, (y1 + oy).floor() as i32);
        draw_antialiased_line_segment_mut(image, start, end, color, interpolate);
    }
}
