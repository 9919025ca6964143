//! Rendering for Ansishot
//!
//! Lays out preprocessed prompt text, paints styled glyphs and composites a
//! window frame with a drop shadow around them, producing a PNG.

pub mod blur;
pub mod canvas;
pub mod compositor;
pub mod config;
pub mod font;
pub mod layout;
pub mod painter;
pub mod pipeline;
pub mod raster;

pub use canvas::{Canvas, ImageCanvas};
pub use compositor::{Compositor, Frame};
pub use config::RenderConfig;
pub use font::{FontPaths, FontSet, FontStyle, TextExtent, TextMeasure};
pub use layout::{Document, Geometry, Layout, LayoutEngine};
pub use painter::GlyphPainter;
pub use pipeline::{render_with, Renderer};
pub use raster::Rect;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Font asset corrupt: {face} face could not be parsed")]
    FontAssetCorrupt { face: FontStyle },

    #[error("Failed to read font {}: {source}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No usable monospace font found")]
    NoFontFound,

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Canvas size {width}x{height} is not drawable")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Shadow blur worker exited without a result")]
    BlurFailed,

    #[error("Failed to write image to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
