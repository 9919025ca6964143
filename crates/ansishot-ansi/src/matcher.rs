//! Escape sequence matcher
//!
//! Recognizes a fixed vocabulary of ANSI/VT100 sequences at the start of the
//! remaining input. Patterns are tried in a fixed priority order and the
//! first one that matches wins; longer sequences come before the shorter
//! ones they would otherwise be shadowed by.

/// Recognized sequence kinds, declared in match priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscapeKind {
    /// `ESC[38;2;r;g;b;49m ESC[7m`
    InvertedTriplet,
    /// `ESC[nn;49m ESC[7m`
    InvertedSingle,
    /// `ESC[48;2;r;g;bm ESC[38;2;r;g;bm`
    FullColor,
    /// `ESC[38;2;r;g;bm`
    Foreground,
    Reset,
    Bold,
    BoldReset,
    Italic,
    ItalicReset,
    Underline,
    UnderlineReset,
    Strikethrough,
    StrikethroughReset,
    /// `ESC[nnm` with a two or three digit code
    Color16,
    /// `ESC[nD`
    CursorLeft,
    /// `ESC]9;9;...ESC\`
    Progress,
    /// `ESC[nF` / `ESC[nB`
    LineChange,
    /// `ESC]0;...BEL`
    Title,
    /// `ESC]8;;file://...ESC\ text ESC]8;;ESC\`
    Hyperlink,
}

impl EscapeKind {
    /// Every kind, highest priority first
    pub const ALL: [EscapeKind; 19] = [
        EscapeKind::InvertedTriplet,
        EscapeKind::InvertedSingle,
        EscapeKind::FullColor,
        EscapeKind::Foreground,
        EscapeKind::Reset,
        EscapeKind::Bold,
        EscapeKind::BoldReset,
        EscapeKind::Italic,
        EscapeKind::ItalicReset,
        EscapeKind::Underline,
        EscapeKind::UnderlineReset,
        EscapeKind::Strikethrough,
        EscapeKind::StrikethroughReset,
        EscapeKind::Color16,
        EscapeKind::CursorLeft,
        EscapeKind::Progress,
        EscapeKind::LineChange,
        EscapeKind::Title,
        EscapeKind::Hyperlink,
    ];
}

/// A matched sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeToken<'a> {
    pub kind: EscapeKind,
    /// The consumed prefix of the input
    pub literal: &'a str,
    /// Background capture: `r;g;b` or a color code
    pub background: Option<&'a str>,
    /// Foreground capture: `r;g;b` or a color code
    pub foreground: Option<&'a str>,
    /// Visible text of a hyperlink
    pub url: Option<&'a str>,
}

#[derive(Default)]
struct Captures<'a> {
    background: Option<&'a str>,
    foreground: Option<&'a str>,
    url: Option<&'a str>,
}

/// Cursor over the input used by the structural patterns
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn consumed(&self) -> &'a str {
        &self.text[..self.pos]
    }

    fn literal(&mut self, lit: &str) -> Option<()> {
        if self.rest().starts_with(lit) {
            self.pos += lit.len();
            Some(())
        } else {
            None
        }
    }

    /// Between `min` and `max` ASCII digits, greedily
    fn digits(&mut self, min: usize, max: usize) -> Option<&'a str> {
        let count = self
            .rest()
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if count < min {
            return None;
        }
        let start = self.pos;
        self.pos += count;
        Some(&self.text[start..self.pos])
    }

    fn number(&mut self) -> Option<&'a str> {
        self.digits(1, usize::MAX)
    }

    /// Three numbers separated by `;`, optionally followed by one more `;`
    fn triplet(&mut self, trailing_semicolon: bool) -> Option<&'a str> {
        let start = self.pos;
        self.number()?;
        self.literal(";")?;
        self.number()?;
        self.literal(";")?;
        self.number()?;
        if trailing_semicolon {
            let _ = self.literal(";");
        }
        Some(&self.text[start..self.pos])
    }

    fn one_of(&mut self, set: &[u8]) -> Option<()> {
        let byte = *self.rest().as_bytes().first()?;
        if set.contains(&byte) {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }

    /// Non-empty text up to the first `terminator` on the current line
    fn text_until(&mut self, terminator: &str) -> Option<&'a str> {
        let rest = self.rest();
        let end = rest.find(terminator)?;
        let captured = &rest[..end];
        if captured.is_empty() || captured.contains('\n') {
            return None;
        }
        self.pos += end + terminator.len();
        Some(captured)
    }
}

fn scan<'a>(kind: EscapeKind, s: &mut Scanner<'a>) -> Option<Captures<'a>> {
    let mut caps = Captures::default();
    match kind {
        EscapeKind::InvertedTriplet => {
            s.literal("\x1b[38;2;")?;
            caps.background = Some(s.triplet(false)?);
            s.literal(";49m\x1b[7m")?;
        }
        EscapeKind::InvertedSingle => {
            s.literal("\x1b[")?;
            caps.background = Some(s.digits(2, 3)?);
            s.literal(";49m\x1b[7m")?;
        }
        EscapeKind::FullColor => {
            s.literal("\x1b[48;2;")?;
            caps.background = Some(s.triplet(true)?);
            s.literal("m\x1b[38;2;")?;
            caps.foreground = Some(s.triplet(true)?);
            s.literal("m")?;
        }
        EscapeKind::Foreground => {
            s.literal("\x1b[38;2;")?;
            caps.foreground = Some(s.triplet(true)?);
            s.literal("m")?;
        }
        EscapeKind::Reset => s.literal("\x1b[0m")?,
        EscapeKind::Bold => s.literal("\x1b[1m")?,
        EscapeKind::BoldReset => s.literal("\x1b[22m")?,
        EscapeKind::Italic => s.literal("\x1b[3m")?,
        EscapeKind::ItalicReset => s.literal("\x1b[23m")?,
        EscapeKind::Underline => s.literal("\x1b[4m")?,
        EscapeKind::UnderlineReset => s.literal("\x1b[24m")?,
        EscapeKind::Strikethrough => s.literal("\x1b[9m")?,
        EscapeKind::StrikethroughReset => s.literal("\x1b[29m")?,
        EscapeKind::Color16 => {
            s.literal("\x1b[")?;
            caps.foreground = Some(s.digits(2, 3)?);
            s.literal("m")?;
        }
        EscapeKind::CursorLeft => {
            s.literal("\x1b[")?;
            s.digits(1, 3)?;
            s.literal("D")?;
        }
        EscapeKind::Progress => {
            s.literal("\x1b]9;9;")?;
            s.text_until("\x1b\\")?;
        }
        EscapeKind::LineChange => {
            s.literal("\x1b[")?;
            s.digits(1, 1)?;
            s.one_of(b"FB")?;
        }
        EscapeKind::Title => {
            s.literal("\x1b]0;")?;
            s.text_until("\x07")?;
        }
        EscapeKind::Hyperlink => {
            s.literal("\x1b]8;;file://")?;
            s.text_until("\x1b\\")?;
            caps.url = Some(s.text_until("\x1b]8;;\x1b\\")?);
        }
    }
    Some(caps)
}

/// Priority-ordered matcher over [`EscapeKind::ALL`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeMatcher;

impl EscapeMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Match the first recognized sequence at the start of `remaining`.
    ///
    /// Returns `None` when the input does not start with a known sequence;
    /// the caller then treats the next character as literal text.
    pub fn next_match<'a>(&self, remaining: &'a str) -> Option<EscapeToken<'a>> {
        if !remaining.starts_with('\x1b') {
            return None;
        }

        EscapeKind::ALL.iter().find_map(|&kind| {
            let mut scanner = Scanner::new(remaining);
            let caps = scan(kind, &mut scanner)?;
            Some(EscapeToken {
                kind,
                literal: scanner.consumed(),
                background: caps.background,
                foreground: caps.foreground,
                url: caps.url,
            })
        })
    }
}
