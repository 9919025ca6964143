//! Render configuration
//!
//! Every absolute pixel constant is expressed at scale 1.0 and multiplied by
//! [`RenderConfig::scale`], so one factor controls the output resolution.

use crate::RenderError;
use ansishot_ansi::{Color, DefaultColors, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
use image::Rgba;

const MARGIN: f32 = 48.0;
const PADDING: f32 = 24.0;
const CORNER_RADIUS: f32 = 6.0;
const CONTROL_RADIUS: f32 = 9.0;
const CONTROL_DISTANCE: f32 = 25.0;
const CONTROL_INSET: f32 = 4.0;
const TITLE_BAR: f32 = 40.0;
const SHADOW_RADIUS: f32 = 16.0;
const SHADOW_OFFSET: f32 = 16.0;
const STROKE_WIDTH: f32 = 1.0;
const UNDERLINE_OFFSET: f32 = 4.0;
const GLYPH_BACKGROUND_PADDING: f32 = 6.0;

/// Attribution appended below every capture
pub const DEFAULT_ATTRIBUTION: &str = "https://ohmyposh.dev";

/// Configuration for a render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Uniform multiplier for all pixel constants
    pub scale: f32,
    /// Body font size in points, before scaling
    pub font_size: f32,
    pub dpi: f32,
    pub line_spacing: f32,

    /// Text color when none is set, and after a reset
    pub default_foreground: Color,
    /// Foreground written by inverted sequences
    pub default_background: Color,

    pub window_color: Rgba<u8>,
    pub border_color: Rgba<u8>,
    pub shadow_color: Rgba<u8>,
    /// Window control circles, left to right
    pub control_colors: [Rgba<u8>; 3],

    pub attribution: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            font_size: 12.0,
            dpi: 144.0,
            line_spacing: 1.2,
            default_foreground: DEFAULT_FOREGROUND,
            default_background: DEFAULT_BACKGROUND,
            window_color: Rgba([0x15, 0x15, 0x15, 0xff]),
            border_color: Rgba([0x40, 0x40, 0x40, 0xff]),
            shadow_color: Rgba([0x10, 0x10, 0x10, 0x66]),
            control_colors: [
                Rgba([0xed, 0x65, 0x5a, 0xff]),
                Rgba([0xe1, 0xc0, 0x4c, 0xff]),
                Rgba([0x71, 0xbd, 0x47, 0xff]),
            ],
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

impl RenderConfig {
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    pub fn with_default_colors(mut self, foreground: Color, background: Color) -> Self {
        self.default_foreground = foreground;
        self.default_background = background;
        self
    }

    /// Defaults seeded into the render state
    pub fn default_colors(&self) -> DefaultColors {
        DefaultColors {
            foreground: self.default_foreground,
            background: self.default_background,
        }
    }

    /// Reject values that would produce an empty or undefined canvas
    pub fn validate(&self) -> Result<(), RenderError> {
        let positive = [
            ("scale", self.scale),
            ("font_size", self.font_size),
            ("dpi", self.dpi),
            ("line_spacing", self.line_spacing),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(RenderError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Scale an absolute pixel constant
    pub fn px(&self, value: f32) -> f32 {
        self.scale * value
    }

    /// Font size in pixels
    pub fn font_px(&self) -> f32 {
        self.font_size * self.scale * self.dpi / 72.0
    }

    pub fn margin(&self) -> f32 {
        self.px(MARGIN)
    }

    pub fn padding(&self) -> f32 {
        self.px(PADDING)
    }

    pub fn corner_radius(&self) -> f32 {
        self.px(CORNER_RADIUS)
    }

    pub fn control_radius(&self) -> f32 {
        self.px(CONTROL_RADIUS)
    }

    pub fn control_distance(&self) -> f32 {
        self.px(CONTROL_DISTANCE)
    }

    pub fn control_inset(&self) -> f32 {
        self.px(CONTROL_INSET)
    }

    pub fn title_bar(&self) -> f32 {
        self.px(TITLE_BAR)
    }

    /// Blur radius, capped at 255
    pub fn shadow_radius(&self) -> u32 {
        self.px(SHADOW_RADIUS).clamp(0.0, 255.0) as u32
    }

    pub fn shadow_offset(&self) -> (f32, f32) {
        (self.px(SHADOW_OFFSET), self.px(SHADOW_OFFSET))
    }

    pub fn stroke_width(&self) -> f32 {
        self.px(STROKE_WIDTH)
    }

    pub fn underline_offset(&self) -> f32 {
        self.px(UNDERLINE_OFFSET)
    }

    pub fn glyph_background_padding(&self) -> f32 {
        self.px(GLYPH_BACKGROUND_PADDING)
    }

    /// Narrowest content area that still fits the three window controls
    pub fn min_content_width(&self) -> f32 {
        3.0 * self.control_distance() + 3.0 * self.control_radius()
    }
}
