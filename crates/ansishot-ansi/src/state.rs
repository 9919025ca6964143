//! Render state carried through a single render pass

use crate::matcher::{EscapeKind, EscapeToken};
use crate::palette::{self, Color, Slot, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
use tracing::debug;

/// Active text style. Only one can be active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    None,
    Bold,
    Italic,
    Underline,
}

/// Colors written by reset and inverted sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultColors {
    pub foreground: Color,
    pub background: Color,
}

impl Default for DefaultColors {
    fn default() -> Self {
        Self {
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// Current colors and style
///
/// Unset colors render as the defaults. Transitions are pure: applying a
/// token returns the next state and leaves the input untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderState {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub style: Style,
    pub defaults: DefaultColors,
}

impl RenderState {
    /// State at the start of a render pass
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a render pass with custom default colors
    pub fn with_defaults(defaults: DefaultColors) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    /// Foreground to draw with
    pub fn foreground_or_default(&self) -> Color {
        self.foreground.unwrap_or(self.defaults.foreground)
    }

    /// Apply a recognized sequence and return the resulting state.
    ///
    /// Malformed captures leave the affected color unchanged.
    pub fn apply(self, token: &EscapeToken<'_>) -> Self {
        let mut next = self;
        match token.kind {
            EscapeKind::InvertedTriplet => {
                next.foreground = Some(self.defaults.background);
                if let Some(color) = rgb(token.background) {
                    next.background = Some(color);
                }
            }
            EscapeKind::InvertedSingle => {
                next.foreground = Some(self.defaults.background);
                if let Some(code) = code(token.background) {
                    next = next.with_color16(code.saturating_add(10));
                }
            }
            EscapeKind::FullColor => {
                if let Some(color) = rgb(token.foreground) {
                    next.foreground = Some(color);
                }
                if let Some(color) = rgb(token.background) {
                    next.background = Some(color);
                }
            }
            EscapeKind::Foreground => {
                if let Some(color) = rgb(token.foreground) {
                    next.foreground = Some(color);
                }
            }
            EscapeKind::Reset => {
                next.foreground = Some(self.defaults.foreground);
                next.background = None;
            }
            EscapeKind::Bold => next.style = Style::Bold,
            EscapeKind::Italic => next.style = Style::Italic,
            EscapeKind::Underline => next.style = Style::Underline,
            EscapeKind::BoldReset | EscapeKind::ItalicReset | EscapeKind::UnderlineReset => {
                next.style = Style::None
            }
            EscapeKind::Color16 => {
                if let Some(code) = code(token.foreground) {
                    next = next.with_color16(code);
                }
            }
            EscapeKind::Strikethrough
            | EscapeKind::StrikethroughReset
            | EscapeKind::CursorLeft
            | EscapeKind::Progress
            | EscapeKind::LineChange
            | EscapeKind::Title
            | EscapeKind::Hyperlink => {}
        }
        next
    }

    /// Write a 16-color code to the slot it belongs to
    pub fn with_color16(mut self, code: u16) -> Self {
        let color = palette::lookup(code);
        match palette::slot(code) {
            Slot::Foreground => self.foreground = Some(color),
            Slot::Background => self.background = Some(color),
        }
        self
    }
}

fn rgb(capture: Option<&str>) -> Option<Color> {
    let capture = capture?;
    match Color::from_components(capture) {
        Ok(color) => Some(color),
        Err(e) => {
            debug!("Skipping color {:?}: {}", capture, e);
            None
        }
    }
}

fn code(capture: Option<&str>) -> Option<u16> {
    let capture = capture?;
    match palette::parse_code(capture) {
        Ok(code) => Some(code),
        Err(e) => {
            debug!("Skipping color code {:?}: {}", capture, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::EscapeMatcher;

    fn apply(state: RenderState, seq: &str) -> RenderState {
        let token = EscapeMatcher::new().next_match(seq).expect("sequence");
        state.apply(&token)
    }

    #[test]
    fn test_new_state_is_unset() {
        let state = RenderState::new();
        assert_eq!(state.foreground, None);
        assert_eq!(state.background, None);
        assert_eq!(state.style, Style::None);
        assert_eq!(state.foreground_or_default(), DEFAULT_FOREGROUND);
    }

    #[test]
    fn test_style_replaces_previous_style() {
        let state = apply(RenderState::new(), "\x1b[1m");
        let state = apply(state, "\x1b[4m");
        assert_eq!(state.style, Style::Underline);

        let state = apply(state, "\x1b[22m");
        assert_eq!(state.style, Style::None);
    }

    #[test]
    fn test_reset_keeps_style() {
        let state = apply(RenderState::new(), "\x1b[3m");
        let state = apply(state, "\x1b[41m");
        let state = apply(state, "\x1b[0m");
        assert_eq!(state.style, Style::Italic);
        assert_eq!(state.foreground, Some(DEFAULT_FOREGROUND));
        assert_eq!(state.background, None);
    }

    #[test]
    fn test_inverted_single_offsets_code() {
        let state = apply(RenderState::new(), "\x1b[34;49m\x1b[7m");
        assert_eq!(state.foreground, Some(DEFAULT_BACKGROUND));
        assert_eq!(state.background, Some(palette::lookup(44)));
    }

    #[test]
    fn test_custom_defaults_drive_reset_and_inversion() {
        let defaults = DefaultColors {
            foreground: Color::new(0, 0, 0),
            background: Color::new(240, 240, 240),
        };
        let start = RenderState::with_defaults(defaults);
        assert_eq!(start.foreground_or_default(), Color::new(0, 0, 0));

        let reset = apply(apply(start, "\x1b[31m"), "\x1b[0m");
        assert_eq!(reset.foreground, Some(Color::new(0, 0, 0)));

        let inverted = apply(start, "\x1b[34;49m\x1b[7m");
        assert_eq!(inverted.foreground, Some(Color::new(240, 240, 240)));
        assert_eq!(inverted.defaults, defaults);
    }

    #[test]
    fn test_out_of_range_component_is_skipped() {
        let before = apply(RenderState::new(), "\x1b[38;2;1;2;3m");
        let after = apply(before, "\x1b[38;2;1;2;300m");
        assert_eq!(after, before);
    }

    #[test]
    fn test_no_op_sequences_leave_state() {
        let state = apply(RenderState::new(), "\x1b[32m");
        for seq in ["\x1b[9m", "\x1b[29m", "\x1b[3D", "\x1b[2F", "\x1b]0;title\x07"] {
            assert_eq!(apply(state, seq), state, "{seq:?}");
        }
    }
}
