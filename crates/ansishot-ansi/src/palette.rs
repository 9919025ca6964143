//! Color values and the 16-color terminal palette
//!
//! Maps SGR color codes (30-37, 40-47, 90-97, 100-107) to fixed RGB triples.

use crate::AnsiError;

/// A 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Foreground used when nothing else is set
pub const DEFAULT_FOREGROUND: Color = Color::new(255, 255, 255);

/// Background of the rendered window
pub const DEFAULT_BACKGROUND: Color = Color::new(21, 21, 21);

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode a `r;g;b` capture as found in `ESC[38;2;r;g;bm`.
    ///
    /// A single trailing `;` is tolerated since the color sequences accept it.
    pub fn from_components(components: &str) -> Result<Self, AnsiError> {
        let trimmed = components.strip_suffix(';').unwrap_or(components);
        let parts: Vec<&str> = trimmed.split(';').collect();
        if parts.len() != 3 {
            return Err(AnsiError::WrongComponentCount {
                expected: 3,
                got: parts.len(),
            });
        }

        let component = |s: &str| {
            s.parse::<u8>()
                .map_err(|_| AnsiError::InvalidColorComponent(s.to_string()))
        };

        Ok(Self {
            r: component(parts[0])?,
            g: component(parts[1])?,
            b: component(parts[2])?,
        })
    }
}

/// Which state slot a 16-color code writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Foreground,
    Background,
}

/// Base hues for codes 30-37 / 40-47
const BASE: [Color; 8] = [
    Color::new(1, 1, 1),       // black
    Color::new(222, 56, 43),   // red
    Color::new(57, 181, 74),   // green
    Color::new(255, 199, 6),   // yellow
    Color::new(0, 111, 184),   // blue
    Color::new(118, 38, 113),  // magenta
    Color::new(44, 181, 233),  // cyan
    Color::new(204, 204, 204), // white
];

/// Bright hues for codes 90-97 / 100-107
const BRIGHT: [Color; 8] = [
    Color::new(128, 128, 128), // bright black (gray)
    Color::new(255, 0, 0),     // bright red
    Color::new(0, 255, 0),     // bright green
    Color::new(255, 255, 0),   // bright yellow
    Color::new(0, 0, 255),     // bright blue
    Color::new(255, 0, 255),   // bright magenta
    Color::new(101, 194, 205), // bright cyan
    Color::new(255, 255, 255), // bright white
];

/// Look up the RGB value of a 16-color SGR code.
///
/// Unknown codes fall back to [`DEFAULT_FOREGROUND`].
pub fn lookup(code: u16) -> Color {
    match code {
        30..=37 => BASE[(code - 30) as usize],
        40..=47 => BASE[(code - 40) as usize],
        90..=97 => BRIGHT[(code - 90) as usize],
        100..=107 => BRIGHT[(code - 100) as usize],
        _ => DEFAULT_FOREGROUND,
    }
}

/// Decide whether a code colors the foreground or the background.
///
/// Anything below 40, or in the 90s, is a foreground code. Everything else,
/// including unknown codes, lands on the background.
pub fn slot(code: u16) -> Slot {
    if code < 40 || (90..100).contains(&code) {
        Slot::Foreground
    } else {
        Slot::Background
    }
}

/// Parse a captured 16-color code
pub fn parse_code(digits: &str) -> Result<u16, AnsiError> {
    digits
        .parse::<u16>()
        .map_err(|_| AnsiError::InvalidColorCode(digits.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_and_background_share_hues() {
        for offset in 0..8 {
            assert_eq!(lookup(30 + offset), lookup(40 + offset));
            assert_eq!(lookup(90 + offset), lookup(100 + offset));
        }
    }

    #[test]
    fn test_bright_table_differs_from_base() {
        assert_eq!(lookup(31), Color::new(222, 56, 43));
        assert_eq!(lookup(91), Color::new(255, 0, 0));
        assert_eq!(lookup(96), Color::new(101, 194, 205));
    }

    #[test]
    fn test_unknown_code_is_default_foreground() {
        assert_eq!(lookup(38), DEFAULT_FOREGROUND);
        assert_eq!(lookup(50), DEFAULT_FOREGROUND);
        assert_eq!(lookup(0), DEFAULT_FOREGROUND);
    }

    #[test]
    fn test_slot_rule() {
        assert_eq!(slot(31), Slot::Foreground);
        assert_eq!(slot(39), Slot::Foreground);
        assert_eq!(slot(41), Slot::Background);
        assert_eq!(slot(95), Slot::Foreground);
        assert_eq!(slot(100), Slot::Background);
        assert_eq!(slot(60), Slot::Background);
    }

    #[test]
    fn test_components() {
        assert_eq!(
            Color::from_components("10;20;30").unwrap(),
            Color::new(10, 20, 30)
        );
        assert_eq!(
            Color::from_components("10;20;30;").unwrap(),
            Color::new(10, 20, 30)
        );
        assert!(matches!(
            Color::from_components("10;20"),
            Err(AnsiError::WrongComponentCount { expected: 3, got: 2 })
        ));
        assert!(matches!(
            Color::from_components("10;20;999"),
            Err(AnsiError::InvalidColorComponent(_))
        ));
    }
}
