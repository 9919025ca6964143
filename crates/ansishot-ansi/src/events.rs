//! Event generator over preprocessed text
//!
//! Walks the text once, left to right, turning it into control, glyph and
//! line-break events while threading the [`RenderState`].

use crate::matcher::{EscapeKind, EscapeMatcher};
use crate::state::RenderState;
use std::iter::FusedIterator;
use tracing::trace;

/// One step of the render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A recognized sequence was consumed; `state` is the state after it
    Control { kind: EscapeKind, state: RenderState },
    /// A printable character to draw with `state`
    Glyph { ch: char, state: RenderState },
    /// A `\n` in the input
    LineBreak,
}

/// Single-pass event stream
///
/// Hyperlink sequences are not consumed whole: their visible text is pushed
/// back onto the head of the stream and parsed again, so any sequences inside
/// it are recognized as well.
#[derive(Debug, Clone)]
pub struct Events {
    buffer: String,
    pos: usize,
    state: RenderState,
    matcher: EscapeMatcher,
}

impl Events {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_state(text, RenderState::new())
    }

    /// Start from `state` instead of the unset one
    pub fn with_state(text: impl Into<String>, state: RenderState) -> Self {
        Self {
            buffer: text.into(),
            pos: 0,
            state,
            matcher: EscapeMatcher::new(),
        }
    }

    /// State after the events produced so far
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Text not yet consumed
    pub fn remaining(&self) -> &str {
        &self.buffer[self.pos..]
    }

    fn reinject(&mut self, text: String, consumed: usize) {
        let tail = &self.buffer[self.pos + consumed..];
        let mut buffer = String::with_capacity(text.len() + tail.len());
        buffer.push_str(&text);
        buffer.push_str(tail);
        self.buffer = buffer;
        self.pos = 0;
    }
}

impl Iterator for Events {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        let rest = &self.buffer[self.pos..];
        let ch = rest.chars().next()?;

        let matched = self.matcher.next_match(rest).map(|token| {
            (
                token.kind,
                token.literal.len(),
                token.url.map(str::to_owned),
                self.state.apply(&token),
            )
        });

        if let Some((kind, consumed, url, next_state)) = matched {
            trace!("Matched {:?} ({} bytes)", kind, consumed);
            match (kind, url) {
                (EscapeKind::Hyperlink, Some(url)) => self.reinject(url, consumed),
                _ => {
                    self.pos += consumed;
                    self.state = next_state;
                }
            }
            return Some(Event::Control {
                kind,
                state: self.state,
            });
        }

        self.pos += ch.len_utf8();
        if ch == '\n' {
            Some(Event::LineBreak)
        } else {
            Some(Event::Glyph {
                ch,
                state: self.state,
            })
        }
    }
}

impl FusedIterator for Events {}

/// Number of printable characters in a line once escape sequences are removed
pub fn visible_len(line: &str) -> usize {
    Events::new(line)
        .filter(|event| matches!(event, Event::Glyph { .. }))
        .count()
}

/// The printable text of `input`, with line breaks kept
pub fn strip(input: &str) -> String {
    Events::new(input)
        .filter_map(|event| match event {
            Event::Glyph { ch, .. } => Some(ch),
            Event::LineBreak => Some('\n'),
            Event::Control { .. } => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{self, DEFAULT_FOREGROUND};

    #[test]
    fn test_plain_text() {
        let events: Vec<Event> = Events::new("ab\nc").collect();
        assert_eq!(events.len(), 4);
        assert_eq!(events[2], Event::LineBreak);
        assert!(matches!(events[3], Event::Glyph { ch: 'c', .. }));
    }

    #[test]
    fn test_state_is_threaded() {
        let mut events = Events::new("\x1b[31mA\x1b[0mB");
        assert!(matches!(
            events.next(),
            Some(Event::Control {
                kind: EscapeKind::Color16,
                ..
            })
        ));
        match events.next() {
            Some(Event::Glyph { ch, state }) => {
                assert_eq!(ch, 'A');
                assert_eq!(state.foreground, Some(palette::lookup(31)));
            }
            other => panic!("unexpected {other:?}"),
        }
        events.next();
        match events.next() {
            Some(Event::Glyph { ch, state }) => {
                assert_eq!(ch, 'B');
                assert_eq!(state.foreground, Some(DEFAULT_FOREGROUND));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(events.next(), None);
        assert_eq!(events.next(), None);
    }

    #[test]
    fn test_hyperlink_reinjects_text() {
        let mut events = Events::new("\x1b]8;;file:///tmp/x\x1b\\click\x1b]8;;\x1b\\!");
        assert!(matches!(
            events.next(),
            Some(Event::Control {
                kind: EscapeKind::Hyperlink,
                ..
            })
        ));
        assert_eq!(events.remaining(), "click!");
    }

    #[test]
    fn test_visible_len() {
        assert_eq!(visible_len("\x1b[1mbold\x1b[22m text"), 9);
        assert_eq!(visible_len("\x1b[38;2;1;2;3m"), 0);
        assert_eq!(visible_len("héllo"), 5);
    }

    #[test]
    fn test_unknown_escape_is_literal() {
        assert_eq!(strip("\x1b[5mX"), "\x1b[5mX");
    }
}
