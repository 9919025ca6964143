//! ANSI sequence interpretation for Ansishot
//!
//! Recognizes the fixed subset of ANSI/VT100 sequences found in captured
//! prompt output and turns text into a stream of styled glyph events.
//! Nothing here depends on a graphics backend.

pub mod events;
pub mod matcher;
pub mod palette;
pub mod state;

pub use events::{strip, visible_len, Event, Events};
pub use matcher::{EscapeKind, EscapeMatcher, EscapeToken};
pub use palette::{Color, Slot, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
pub use state::{DefaultColors, RenderState, Style};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnsiError {
    #[error("Invalid color component: {0}")]
    InvalidColorComponent(String),

    #[error("Wrong number of color components: expected {expected}, got {got}")]
    WrongComponentCount { expected: usize, got: usize },

    #[error("Invalid color code: {0}")]
    InvalidColorCode(String),
}
