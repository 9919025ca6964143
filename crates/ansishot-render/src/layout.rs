//! Document preprocessing and geometry
//!
//! Captured prompt output contains cursor sequences that only make sense on a
//! live terminal. Preprocessing rewrites them into placeholders once, before
//! any escape matching, and appends the attribution footer. Layout then
//! measures the visible text and aligns right prompts.

use crate::config::RenderConfig;
use crate::font::{FontStyle, TextMeasure};
use ansishot_ansi::visible_len;
use tracing::{debug, info};

pub const SHORT_RESET: &str = "\x1b[m";
pub const FULL_RESET: &str = "\x1b[0m";
pub const CLEAR_LINE: &str = "\x1b[K";
pub const CURSOR_SAVE: &str = "\x1b7";
pub const CURSOR_RESTORE: &str = "\x1b8";
pub const CURSOR_UP_ONE: &str = "\x1b[1F";
pub const ABSOLUTE_COLUMN: &str = "\x1b[1000C";

/// Marker left where the cursor was saved
pub const PROMPT_MARKER: char = '_';
/// Spaces following [`PROMPT_MARKER`]
pub const PADDING_RUN: usize = 30;
/// Stand-in for right-aligned prompt text
pub const RPROMPT_PLACEHOLDER: &str = "RPROMPT";
/// Converts a character count into spaces that line up at the body font size
pub const ALIGNMENT_FACTOR: f64 = 1.47;

const BOLD: &str = "\x1b[1m";
const BOLD_RESET: &str = "\x1b[22m";

fn prompt_placeholder() -> String {
    format!("{PROMPT_MARKER}{}", " ".repeat(PADDING_RUN))
}

/// Attribution line, without the blank lines that separate it from the text
fn footer(attribution: &str, author: Option<&str>) -> String {
    let mut footer = format!("{BOLD}{attribution}{BOLD_RESET}");
    if let Some(author) = author.filter(|a| !a.is_empty()) {
        footer.push_str(&format!(" by {BOLD}{author}{BOLD_RESET}"));
    }
    footer
}

/// Captured text before and after preprocessing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    raw: String,
    text: String,
}

impl Document {
    /// Resolve cursor sequences into placeholders and append the footer.
    ///
    /// Running this on its own output leaves the footer in place rather than
    /// appending a second one.
    pub fn preprocess(raw: &str, author: Option<&str>, attribution: &str) -> Self {
        let saved_cursor = raw.contains(CURSOR_SAVE);

        let mut text = raw
            .replace(SHORT_RESET, FULL_RESET)
            .replace(CLEAR_LINE, "")
            .replace(CURSOR_SAVE, &prompt_placeholder())
            .replace(CURSOR_RESTORE, "")
            .replace(CURSOR_UP_ONE, "")
            .replace(ABSOLUTE_COLUMN, RPROMPT_PLACEHOLDER);

        let footer = footer(attribution, author);
        if text.trim_end_matches('\n').ends_with(&footer) {
            debug!("Footer already present, skipping");
        } else {
            if !saved_cursor {
                text.push_str(&prompt_placeholder());
            }
            text.push_str("\n\n");
            text.push_str(&footer);
        }

        let text = format!("\n{}", text.trim_matches('\n'));

        Self {
            raw: raw.to_string(),
            text,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Preprocessed text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Longest visible line, in characters
    pub fn max_width(&self) -> usize {
        self.lines().map(visible_len).max().unwrap_or(0)
    }
}

/// Spaces that replace a right-prompt placeholder.
///
/// `visible` is the line's printable length without the placeholder.
pub fn right_prompt_padding(max_width: usize, visible: usize) -> usize {
    let placeholder = RPROMPT_PLACEHOLDER.len();
    if visible >= max_width {
        return placeholder;
    }
    let leftover = max_width as f64 - visible as f64 - placeholder as f64;
    (leftover * ALIGNMENT_FACTOR).max(0.0) as usize
}

/// Replace the first right-prompt placeholder in `line` with padding
pub fn align_right_prompt(line: &str, max_width: usize) -> String {
    if !line.contains(RPROMPT_PLACEHOLDER) {
        return line.to_string();
    }
    let visible = visible_len(line).saturating_sub(RPROMPT_PLACEHOLDER.len());
    let padding = right_prompt_padding(max_width, visible);
    line.replacen(RPROMPT_PLACEHOLDER, &" ".repeat(padding), 1)
}

/// Pixel measurements of a laid-out document, all scaled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub content_width: f32,
    pub content_height: f32,
    pub font_height: f32,
    /// Vertical advance per line break
    pub line_height: f32,
    pub margin: f32,
    pub padding: f32,
    pub title_bar: f32,
    pub shadow_offset: (f32, f32),
}

impl Geometry {
    /// Whole canvas including margins, padding and title bar
    pub fn canvas_size(&self) -> (u32, u32) {
        let width = self.content_width + 2.0 * self.margin + 2.0 * self.padding;
        let height =
            self.content_height + 2.0 * self.margin + 2.0 * self.padding + self.title_bar;
        (width.max(0.0) as u32, height.max(0.0) as u32)
    }

    /// Top-left corner of the window frame
    pub fn window_origin(&self) -> (f32, f32) {
        (
            self.margin - self.shadow_offset.0 / 2.0,
            self.margin - self.shadow_offset.1 / 2.0,
        )
    }

    /// Baseline position of the first glyph
    pub fn text_origin(&self) -> (f32, f32) {
        let (x, y) = self.window_origin();
        (
            x + self.padding,
            y + self.padding + self.title_bar + self.font_height,
        )
    }
}

/// Result of laying out a document
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Text ready for painting, placeholders resolved
    pub text: String,
    pub max_width: usize,
    pub line_count: usize,
    pub geometry: Geometry,
}

pub struct LayoutEngine<'a> {
    config: &'a RenderConfig,
    metrics: &'a dyn TextMeasure,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(config: &'a RenderConfig, metrics: &'a dyn TextMeasure) -> Self {
        Self { config, metrics }
    }

    pub fn layout(&self, document: &Document) -> Layout {
        let max_width = document.max_width();

        let lines: Vec<String> = document
            .lines()
            .map(|line| align_right_prompt(line, max_width))
            .collect();
        let line_count = lines.len();

        let space = self.metrics.measure(FontStyle::Regular, " ").width;
        let content_width = (space * max_width as f32).max(self.config.min_content_width());
        let font_height = self.metrics.font_height();
        let line_height = font_height * self.config.line_spacing;
        let content_height = line_count as f32 * line_height;

        let geometry = Geometry {
            content_width,
            content_height,
            font_height,
            line_height,
            margin: self.config.margin(),
            padding: self.config.padding(),
            title_bar: self.config.title_bar(),
            shadow_offset: self.config.shadow_offset(),
        };
        info!(
            "Laid out {} lines, {} columns, content {}x{}",
            line_count, max_width, content_width, content_height
        );

        Layout {
            text: lines.join("\n"),
            max_width,
            line_count,
            geometry,
        }
    }
}
