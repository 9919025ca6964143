//! Window frame around the painted content

use crate::blur;
use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::layout::Geometry;
use crate::raster::{self, Rect};
use crate::RenderError;
use image::RgbaImage;
use tracing::debug;

/// Placement of every frame element on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub window: Rect,
    pub shadow: Rect,
    /// Centers of the window control circles, left to right
    pub controls: [(f32, f32); 3],
    /// Baseline position of the first glyph
    pub text_origin: (f32, f32),
}

pub struct Compositor<'a> {
    config: &'a RenderConfig,
}

impl<'a> Compositor<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    pub fn frame(&self, geometry: &Geometry) -> Frame {
        let (width, height) = geometry.canvas_size();
        let (x, y) = geometry.window_origin();
        let window = Rect::new(
            x,
            y,
            width as f32 - 2.0 * geometry.margin,
            height as f32 - 2.0 * geometry.margin,
        );
        let (dx, dy) = geometry.shadow_offset;
        let shadow = window.translate(dx, dy);

        let inset = self.config.control_inset();
        let distance = self.config.control_distance();
        let controls = [0.0f32, 1.0, 2.0].map(|i| {
            (
                window.x + geometry.padding + i * distance + inset,
                window.y + geometry.padding + inset,
            )
        });

        Frame {
            width,
            height,
            window,
            shadow,
            controls,
            text_origin: geometry.text_origin(),
        }
    }

    /// Draw shadow, window, border and controls, in that order
    pub fn draw<C: Canvas>(&self, canvas: &mut C, frame: &Frame) -> Result<(), RenderError> {
        let corner = self.config.corner_radius();

        let mut layer = RgbaImage::new(frame.width, frame.height);
        raster::fill_rounded_rect(&mut layer, frame.shadow, corner, self.config.shadow_color);
        let pending = blur::request(layer, self.config.shadow_radius());
        let shadow = pending.wait()?;
        debug!("Shadow ready");
        canvas.draw_layer(&shadow, 0, 0);

        canvas.set_color(self.config.window_color);
        canvas.fill_rounded_rectangle(frame.window, corner);

        canvas.set_color(self.config.border_color);
        canvas.stroke_rounded_rectangle(frame.window, corner, self.config.stroke_width());

        let radius = self.config.control_radius();
        for (&(cx, cy), &color) in frame.controls.iter().zip(&self.config.control_colors) {
            canvas.set_color(color);
            canvas.fill_circle(cx, cy, radius);
        }

        Ok(())
    }
}
