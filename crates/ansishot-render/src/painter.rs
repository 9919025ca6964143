//! Turns glyph events into canvas calls

use crate::canvas::{opaque, Canvas};
use crate::config::RenderConfig;
use crate::font::FontStyle;
use crate::raster::Rect;
use ansishot_ansi::{Event, RenderState, Style};
use tracing::trace;

/// Replacement for symbols the bundled fonts tend to lack
pub fn substitute(ch: char) -> char {
    match ch {
        '✗' => '×',
        '❯' | '➜' => '>',
        '\u{f449}' => '\u{e26e}',
        '┏' | '┖' => '-',
        '●' => 'o',
        '▓' => '█',
        '❮' => '<',
        other => other,
    }
}

/// Draw executor for the glyph event stream.
///
/// Keeps the pen position; everything else comes from the events.
pub struct GlyphPainter<'a, C: Canvas> {
    canvas: &'a mut C,
    config: &'a RenderConfig,
    line_height: f32,
    origin_x: f32,
    x: f32,
    y: f32,
}

impl<'a, C: Canvas> GlyphPainter<'a, C> {
    /// Start painting with the first baseline at `(x, y)`, advancing
    /// `line_height` per line break
    pub fn new(
        canvas: &'a mut C,
        config: &'a RenderConfig,
        (x, y): (f32, f32),
        line_height: f32,
    ) -> Self {
        Self {
            canvas,
            config,
            line_height,
            origin_x: x,
            x,
            y,
        }
    }

    /// Current pen position
    pub fn pen(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn paint(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.handle(event);
        }
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Control { kind, .. } => trace!("Skipping {:?}", kind),
            Event::LineBreak => self.line_break(),
            Event::Glyph { ch, state } => self.glyph(ch, state),
        }
    }

    fn line_break(&mut self) {
        self.x = self.origin_x;
        self.y += self.line_height;
    }

    fn glyph(&mut self, ch: char, state: RenderState) {
        let ch = substitute(ch);
        let mut buf = [0u8; 4];
        let text: &str = ch.encode_utf8(&mut buf);

        self.canvas.set_font_face(FontStyle::from(state.style));
        let extent = self.canvas.measure_string(text);

        if let Some(background) = state.background {
            self.canvas.set_color(opaque(background));
            self.canvas.fill_rectangle(Rect::new(
                self.x,
                self.y - extent.height,
                extent.width,
                extent.height + self.config.glyph_background_padding(),
            ));
        }

        self.canvas.set_color(opaque(state.foreground_or_default()));
        self.canvas.draw_string(text, self.x, self.y);

        if state.style == Style::Underline {
            let y = self.y + self.config.underline_offset();
            self.canvas.draw_line(
                (self.x, y),
                (self.x + extent.width, y),
                self.config.stroke_width(),
            );
        }

        self.x += extent.width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitution_table() {
        let cases = [
            ('✗', '×'),
            ('❯', '>'),
            ('➜', '>'),
            ('\u{f449}', '\u{e26e}'),
            ('┏', '-'),
            ('┖', '-'),
            ('●', 'o'),
            ('▓', '█'),
            ('❮', '<'),
        ];
        for (from, to) in cases {
            assert_eq!(substitute(from), to);
        }
        assert_eq!(substitute('a'), 'a');
        assert_eq!(substitute('×'), '×');
    }
}
