//! Error handling tests for ansishot-ansi

use ansishot_ansi::{
    palette, strip, AnsiError, Color, EscapeKind, EscapeMatcher, Event, Events, RenderState,
};

#[test]
fn test_incomplete_sequences_render_as_text() {
    let incomplete_sequences = [
        "\x1b[",
        "\x1b[3",
        "\x1b[38;2;",
        "\x1b[38;2;1;2",
        "\x1b]",
        "\x1b]0;title",
        "\x1b]8;;file:///tmp\x1b\\text",
        "\x1b(",
    ];

    for seq in &incomplete_sequences {
        // Nothing is recognized, so every character comes back out
        assert_eq!(strip(seq), *seq, "{seq:?}");
    }
}

#[test]
fn test_malformed_color_components_do_not_abort() {
    let input = "\x1b[38;2;999;999;999mA\x1b[48;2;1;2;3m\x1b[38;2;4;5;600mB";
    let glyphs: Vec<(char, RenderState)> = Events::new(input)
        .filter_map(|event| match event {
            Event::Glyph { ch, state } => Some((ch, state)),
            _ => None,
        })
        .collect();

    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs[0].1.foreground, None);
    // The valid background half of the pair still applies
    assert_eq!(glyphs[1].1.background, Some(Color::new(1, 2, 3)));
    assert_eq!(glyphs[1].1.foreground, None);
}

#[test]
fn test_very_long_digit_runs() {
    let long_seq = format!("\x1b[{}m", "9".repeat(10000));
    assert!(EscapeMatcher::new().next_match(&long_seq).is_none());
    assert_eq!(strip(&long_seq).chars().count(), long_seq.chars().count());

    let huge_component = format!("\x1b[38;2;{};0;0mX", "9".repeat(400));
    let token = EscapeMatcher::new().next_match(&huge_component).unwrap();
    assert_eq!(token.kind, EscapeKind::Foreground);
    assert_eq!(RenderState::new().apply(&token), RenderState::new());
}

#[test]
fn test_many_parameters_are_not_a_sequence() {
    let mut many_params = String::from("\x1b[");
    for i in 0..1000 {
        if i > 0 {
            many_params.push(';');
        }
        many_params.push('1');
    }
    many_params.push('m');

    assert!(EscapeMatcher::new().next_match(&many_params).is_none());
}

#[test]
fn test_decoding_errors() {
    assert_eq!(
        Color::from_components("a;b;c"),
        Err(AnsiError::InvalidColorComponent("a".to_string()))
    );
    assert_eq!(
        Color::from_components("1;2;3;4"),
        Err(AnsiError::WrongComponentCount {
            expected: 3,
            got: 4
        })
    );
    assert_eq!(
        palette::parse_code("99999"),
        Err(AnsiError::InvalidColorCode("99999".to_string()))
    );
}

#[test]
fn test_nested_hyperlinks_terminate() {
    let inner = "\x1b]8;;file:///b\x1b\\in\x1b]8;;\x1b\\";
    let outer = format!("\x1b]8;;file:///a\x1b\\{inner}\x1b]8;;\x1b\\");
    // Link text is parsed again, so the inner link unwraps too
    assert_eq!(strip(&outer), "in");
    assert!(Events::new(outer).count() < 200);
}

#[test]
fn test_control_characters_are_literal() {
    let text = "a\tb\rc\x07";
    assert_eq!(strip(text), text);
}
