use mono_parser_core::{Action, Color, Intensity, ParseError, SgrAttribute, Underline};
use pretty_assertions::assert_eq;

use crate::{actions, collect};

fn sgr(attributes: &[SgrAttribute]) -> Vec<Action> {
    attributes.iter().copied().map(Action::SelectGraphicRendition).collect()
}

#[test]
fn test_reset_forms() {
    assert_eq!(actions("\x1b[m"), sgr(&[SgrAttribute::Reset]));
    assert_eq!(actions("\x1b[0m"), sgr(&[SgrAttribute::Reset]));
    assert_eq!(actions("\x1b[;1m"), sgr(&[SgrAttribute::Reset, SgrAttribute::Intensity(Intensity::Bold)]));
}

#[test]
fn test_simple_attributes() {
    assert_eq!(
        actions("\x1b[1;3;4;22;24m"),
        sgr(&[
            SgrAttribute::Intensity(Intensity::Bold),
            SgrAttribute::Italic(true),
            SgrAttribute::Underline(Underline::Single),
            SgrAttribute::Intensity(Intensity::Normal),
            SgrAttribute::Underline(Underline::Off),
        ])
    );
}

#[test]
fn test_basic_and_bright_colors() {
    assert_eq!(
        actions("\x1b[31;42;93;104;39;49m"),
        sgr(&[
            SgrAttribute::Foreground(Color::Base(1)),
            SgrAttribute::Background(Color::Base(2)),
            SgrAttribute::Foreground(Color::Bright(3)),
            SgrAttribute::Background(Color::Bright(4)),
            SgrAttribute::Foreground(Color::Default),
            SgrAttribute::Background(Color::Default),
        ])
    );
}

#[test]
fn test_extended_color_equivalence() {
    let expected = sgr(&[SgrAttribute::Foreground(Color::Extended(196))]);
    assert_eq!(actions("\x1b[38;5;196m"), expected);
    assert_eq!(actions("\x1b[38:5:196m"), expected);
}

#[test]
fn test_truecolor() {
    assert_eq!(actions("\x1b[38;2;10;20;30m"), sgr(&[SgrAttribute::Foreground(Color::Rgb(10, 20, 30))]));
    assert_eq!(actions("\x1b[38:2:10:20:30m"), sgr(&[SgrAttribute::Foreground(Color::Rgb(10, 20, 30))]));
    assert_eq!(actions("\x1b[48:2::10:20:30m"), sgr(&[SgrAttribute::Background(Color::Rgb(10, 20, 30))]));
}

#[test]
fn test_extended_color_ends_scan() {
    assert_eq!(actions("\x1b[38;5;1;1m"), sgr(&[SgrAttribute::Foreground(Color::Extended(1))]));
    assert_eq!(actions("\x1b[38;5;196;1m"), sgr(&[SgrAttribute::Foreground(Color::Extended(196))]));
    assert_eq!(
        actions("\x1b[1;48;2;1;2;3;4m"),
        sgr(&[SgrAttribute::Intensity(Intensity::Bold), SgrAttribute::Background(Color::Rgb(1, 2, 3))])
    );
    assert_eq!(actions("\x1b[38:5:9;1m"), sgr(&[SgrAttribute::Foreground(Color::Extended(9))]));
}

#[test]
fn test_components_clamp() {
    assert_eq!(actions("\x1b[38;2;300;0;999m"), sgr(&[SgrAttribute::Foreground(Color::Rgb(255, 0, 255))]));
    assert_eq!(actions("\x1b[48;5;256m"), sgr(&[SgrAttribute::Background(Color::Extended(255))]));
}

#[test]
fn test_malformed_extended_color_stops_scan() {
    let sink = collect("\x1b[38;7;1m");
    assert!(sink.actions.is_empty());
    assert!(matches!(sink.errors[..], [ParseError::InvalidParameter { .. }]));

    let sink = collect("\x1b[1;38;2;1m");
    assert_eq!(sink.actions, sgr(&[SgrAttribute::Intensity(Intensity::Bold)]));
    assert!(matches!(sink.errors[..], [ParseError::IncompleteSequence { .. }]));
}

#[test]
fn test_underline_styles() {
    assert_eq!(
        actions("\x1b[4:3m\x1b[4:2m\x1b[4:0m"),
        sgr(&[
            SgrAttribute::Underline(Underline::Single),
            SgrAttribute::Underline(Underline::Double),
            SgrAttribute::Underline(Underline::Off),
        ])
    );
}

#[test]
fn test_undefined_code_is_skipped() {
    let sink = collect("\x1b[26;1;200m");
    assert_eq!(sink.actions, sgr(&[SgrAttribute::Intensity(Intensity::Bold)]));
    assert_eq!(sink.errors.len(), 2);
}
