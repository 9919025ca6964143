//! End-to-end render pass

use crate::canvas::{self, Canvas, ImageCanvas};
use crate::compositor::Compositor;
use crate::config::RenderConfig;
use crate::font::{FontPaths, FontSet, TextMeasure};
use crate::layout::{Document, LayoutEngine};
use crate::painter::GlyphPainter;
use crate::RenderError;
use ansishot_ansi::{Events, RenderState};
use image::RgbaImage;
use std::path::Path;
use tracing::info;

/// Render `input` onto a canvas created by `new_canvas`.
///
/// `metrics` must measure text the same way the canvas does; layout is
/// computed from it before the canvas exists.
pub fn render_with<C, F>(
    config: &RenderConfig,
    metrics: &dyn TextMeasure,
    input: &str,
    author: Option<&str>,
    new_canvas: F,
) -> Result<C, RenderError>
where
    C: Canvas,
    F: FnOnce(u32, u32) -> Result<C, RenderError>,
{
    config.validate()?;

    let document = Document::preprocess(input, author, &config.attribution);
    let layout = LayoutEngine::new(config, metrics).layout(&document);

    let compositor = Compositor::new(config);
    let frame = compositor.frame(&layout.geometry);
    info!("Rendering {}x{} canvas", frame.width, frame.height);

    let mut canvas = new_canvas(frame.width, frame.height)?;
    compositor.draw(&mut canvas, &frame)?;

    let state = RenderState::with_defaults(config.default_colors());
    let mut painter = GlyphPainter::new(
        &mut canvas,
        config,
        frame.text_origin,
        layout.geometry.line_height,
    );
    painter.paint(Events::with_state(layout.text, state));

    Ok(canvas)
}

/// Renders captured terminal output to images
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    fonts: FontSet,
}

impl Renderer {
    /// `fonts` should be loaded at `config.font_px()`
    pub fn new(config: RenderConfig, fonts: FontSet) -> Self {
        Self { config, fonts }
    }

    /// Load fonts from files at the configured size
    pub fn from_paths(config: RenderConfig, paths: &FontPaths) -> Result<Self, RenderError> {
        config.validate()?;
        let fonts = FontSet::load(paths, config.font_px())?;
        Ok(Self::new(config, fonts))
    }

    /// Use the first installed system font family
    pub fn with_system_fonts(config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let fonts = FontSet::discover(config.font_px())?;
        Ok(Self::new(config, fonts))
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(&self, input: &str, author: Option<&str>) -> Result<RgbaImage, RenderError> {
        let canvas = render_with(&self.config, &self.fonts, input, author, |w, h| {
            ImageCanvas::new(w, h, self.fonts.clone())
        })?;
        Ok(canvas.into_image())
    }

    pub fn save_png(
        &self,
        input: &str,
        author: Option<&str>,
        path: &Path,
    ) -> Result<(), RenderError> {
        let image = self.render(input, author)?;
        canvas::save_png(&image, path)
    }
}
