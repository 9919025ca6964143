//! Drawing surface used by the compositor and glyph painter

use crate::font::{FontSet, FontStyle, TextExtent, TextMeasure};
use crate::raster::{self, Rect};
use crate::RenderError;
use ab_glyph::{point, Font, ScaleFont};
use ansishot_ansi::Color;
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;
use tracing::info;

/// Opaque RGBA form of a terminal color
pub fn opaque(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

/// Stateful 2D drawing context.
///
/// Color and font face are set once and apply to every following draw.
/// Text is positioned by its baseline.
pub trait Canvas {
    fn set_color(&mut self, color: Rgba<u8>);

    fn set_font_face(&mut self, face: FontStyle);

    /// Extent of `text` in the active face
    fn measure_string(&self, text: &str) -> TextExtent;

    fn font_height(&self) -> f32;

    fn fill_rectangle(&mut self, rect: Rect);

    fn fill_rounded_rectangle(&mut self, rect: Rect, radius: f32);

    fn stroke_rounded_rectangle(&mut self, rect: Rect, radius: f32, width: f32);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32);

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32);

    fn draw_string(&mut self, text: &str, x: f32, y: f32);

    /// Composite a prepared bitmap with its top-left corner at `(x, y)`
    fn draw_layer(&mut self, layer: &RgbaImage, x: i64, y: i64);
}

/// Canvas backed by an in-memory RGBA bitmap
pub struct ImageCanvas {
    image: RgbaImage,
    fonts: FontSet,
    color: Rgba<u8>,
    face: FontStyle,
}

impl ImageCanvas {
    /// Allocate a transparent canvas
    pub fn new(width: u32, height: u32, fonts: FontSet) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyCanvas { width, height });
        }
        Ok(Self {
            image: RgbaImage::new(width, height),
            fonts,
            color: Rgba([0, 0, 0, 255]),
            face: FontStyle::Regular,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode the canvas as a PNG file
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        save_png(&self.image, path)
    }
}

/// Encode an image as a PNG file
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), RenderError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| RenderError::Save {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        "Wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

impl Canvas for ImageCanvas {
    fn set_color(&mut self, color: Rgba<u8>) {
        self.color = color;
    }

    fn set_font_face(&mut self, face: FontStyle) {
        self.face = face;
    }

    fn measure_string(&self, text: &str) -> TextExtent {
        self.fonts.measure(self.face, text)
    }

    fn font_height(&self) -> f32 {
        self.fonts.font_height()
    }

    fn fill_rectangle(&mut self, rect: Rect) {
        raster::fill_rect(&mut self.image, rect, self.color);
    }

    fn fill_rounded_rectangle(&mut self, rect: Rect, radius: f32) {
        raster::fill_rounded_rect(&mut self.image, rect, radius, self.color);
    }

    fn stroke_rounded_rectangle(&mut self, rect: Rect, radius: f32, width: f32) {
        raster::stroke_rounded_rect(&mut self.image, rect, radius, width, self.color);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        raster::fill_circle(&mut self.image, cx, cy, radius, self.color);
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32) {
        raster::draw_line(&mut self.image, from, to, width, self.color);
    }

    fn draw_string(&mut self, text: &str, x: f32, y: f32) {
        let (font, scale) = self.fonts.scaled(self.face);
        let scaled = font.as_scaled(scale);
        let image = &mut self.image;
        let color = self.color;

        let mut caret = x;
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, y));
            caret += scaled.h_advance(id);
            previous = Some(id);

            // Whitespace has no outline
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + i64::from(gx);
                let py = bounds.min.y as i64 + i64::from(gy);
                raster::blend_pixel(image, px, py, color, coverage);
            });
        }
    }

    fn draw_layer(&mut self, layer: &RgbaImage, x: i64, y: i64) {
        image::imageops::overlay(&mut self.image, layer, x, y);
    }
}
