//! Graphics-free stand-ins for the font and canvas collaborators

use ansishot_render::{Canvas, FontStyle, Rect, TextExtent, TextMeasure};
use image::{Rgba, RgbaImage};

/// Every character advances by the same width in every face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub advance: f32,
    pub height: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            advance: 10.0,
            height: 20.0,
        }
    }
}

impl TextMeasure for FixedMetrics {
    fn measure(&self, _face: FontStyle, text: &str) -> TextExtent {
        TextExtent {
            width: self.advance * text.chars().count() as f32,
            height: self.height,
        }
    }

    fn font_height(&self) -> f32 {
        self.height
    }
}

/// A recorded draw call, with the color active at the time
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    FillRectangle {
        rect: Rect,
        color: Rgba<u8>,
    },
    FillRoundedRectangle {
        rect: Rect,
        radius: f32,
        color: Rgba<u8>,
    },
    StrokeRoundedRectangle {
        rect: Rect,
        radius: f32,
        width: f32,
        color: Rgba<u8>,
    },
    FillCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgba<u8>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Rgba<u8>,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        face: FontStyle,
        color: Rgba<u8>,
    },
    Layer {
        width: u32,
        height: u32,
        x: i64,
        y: i64,
    },
}

/// Canvas that records draw calls instead of rasterizing
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<Op>,
    metrics: FixedMetrics,
    color: Rgba<u8>,
    face: FontStyle,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32, metrics: FixedMetrics) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            metrics,
            color: Rgba([0, 0, 0, 255]),
            face: FontStyle::Regular,
        }
    }

    /// Text draws, in order
    pub fn texts(&self) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Text { .. }))
            .collect()
    }

    /// Concatenation of everything drawn as text
    pub fn drawn_text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn rectangles(&self) -> Vec<(Rect, Rgba<u8>)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::FillRectangle { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Line { .. }))
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn set_color(&mut self, color: Rgba<u8>) {
        self.color = color;
    }

    fn set_font_face(&mut self, face: FontStyle) {
        self.face = face;
    }

    fn measure_string(&self, text: &str) -> TextExtent {
        self.metrics.measure(self.face, text)
    }

    fn font_height(&self) -> f32 {
        self.metrics.font_height()
    }

    fn fill_rectangle(&mut self, rect: Rect) {
        self.ops.push(Op::FillRectangle {
            rect,
            color: self.color,
        });
    }

    fn fill_rounded_rectangle(&mut self, rect: Rect, radius: f32) {
        self.ops.push(Op::FillRoundedRectangle {
            rect,
            radius,
            color: self.color,
        });
    }

    fn stroke_rounded_rectangle(&mut self, rect: Rect, radius: f32, width: f32) {
        self.ops.push(Op::StrokeRoundedRectangle {
            rect,
            radius,
            width,
            color: self.color,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        self.ops.push(Op::FillCircle {
            cx,
            cy,
            radius,
            color: self.color,
        });
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32) {
        self.ops.push(Op::Line {
            from,
            to,
            width,
            color: self.color,
        });
    }

    fn draw_string(&mut self, text: &str, x: f32, y: f32) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            y,
            face: self.face,
            color: self.color,
        });
    }

    fn draw_layer(&mut self, layer: &RgbaImage, x: i64, y: i64) {
        self.ops.push(Op::Layer {
            width: layer.width(),
            height: layer.height(),
            x,
            y,
        });
    }
}
