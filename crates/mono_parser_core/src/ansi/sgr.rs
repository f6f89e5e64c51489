//! SGR (Select Graphic Rendition) handling
//!
//! Handles parsing of SGR escape sequences (CSI...m) for text styling and colors.

use crate::{Action, ActionSink, Blink, Color, Frame, Intensity, ParamList, ParseError, SgrAttribute, Underline, params::parse_number};

/// SGR lookup table entry - describes what a particular SGR parameter code means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SgrLutEntry {
    /// Regular SGR attribute that can be directly used
    SetAttribute(SgrAttribute),
    /// Extended foreground color (38) - needs sub-parameters (38;5;n or 38;2;r;g;b)
    ExtendedForeground,
    /// Extended background color (48) - needs sub-parameters (48;5;n or 48;2;r;g;b)
    ExtendedBackground,
    /// Undefined/unsupported SGR code
    Undefined,
}

use SgrLutEntry::{SetAttribute as Set, Undefined};

// SGR lookup table: maps SGR parameter values (0-107) to their meaning
static SGR_LUT: [SgrLutEntry; 108] = [
    Set(SgrAttribute::Reset),                                // 0
    Set(SgrAttribute::Intensity(Intensity::Bold)),           // 1
    Set(SgrAttribute::Intensity(Intensity::Faint)),          // 2
    Set(SgrAttribute::Italic(true)),                         // 3
    Set(SgrAttribute::Underline(Underline::Single)),         // 4
    Set(SgrAttribute::Blink(Blink::Slow)),                   // 5
    Set(SgrAttribute::Blink(Blink::Rapid)),                  // 6
    Set(SgrAttribute::Inverse(true)),                        // 7
    Set(SgrAttribute::Concealed(true)),                      // 8
    Set(SgrAttribute::CrossedOut(true)),                     // 9
    Set(SgrAttribute::Font(0)),                              // 10 - primary font
    Set(SgrAttribute::Font(1)),                              // 11
    Set(SgrAttribute::Font(2)),                              // 12
    Set(SgrAttribute::Font(3)),                              // 13
    Set(SgrAttribute::Font(4)),                              // 14
    Set(SgrAttribute::Font(5)),                              // 15
    Set(SgrAttribute::Font(6)),                              // 16
    Set(SgrAttribute::Font(7)),                              // 17
    Set(SgrAttribute::Font(8)),                              // 18
    Set(SgrAttribute::Font(9)),                              // 19
    Set(SgrAttribute::Fraktur),                              // 20
    Set(SgrAttribute::Underline(Underline::Double)),         // 21
    Set(SgrAttribute::Intensity(Intensity::Normal)),         // 22
    Set(SgrAttribute::Italic(false)),                        // 23
    Set(SgrAttribute::Underline(Underline::Off)),            // 24
    Set(SgrAttribute::Blink(Blink::Off)),                    // 25
    Undefined,                                               // 26 - proportional spacing
    Set(SgrAttribute::Inverse(false)),                       // 27
    Set(SgrAttribute::Concealed(false)),                     // 28
    Set(SgrAttribute::CrossedOut(false)),                    // 29
    Set(SgrAttribute::Foreground(Color::Base(0))),           // 30 - Black
    Set(SgrAttribute::Foreground(Color::Base(1))),           // 31 - Red
    Set(SgrAttribute::Foreground(Color::Base(2))),           // 32 - Green
    Set(SgrAttribute::Foreground(Color::Base(3))),           // 33 - Yellow
    Set(SgrAttribute::Foreground(Color::Base(4))),           // 34 - Blue
    Set(SgrAttribute::Foreground(Color::Base(5))),           // 35 - Magenta
    Set(SgrAttribute::Foreground(Color::Base(6))),           // 36 - Cyan
    Set(SgrAttribute::Foreground(Color::Base(7))),           // 37 - White
    SgrLutEntry::ExtendedForeground,                         // 38
    Set(SgrAttribute::Foreground(Color::Default)),           // 39
    Set(SgrAttribute::Background(Color::Base(0))),           // 40 - Black
    Set(SgrAttribute::Background(Color::Base(1))),           // 41 - Red
    Set(SgrAttribute::Background(Color::Base(2))),           // 42 - Green
    Set(SgrAttribute::Background(Color::Base(3))),           // 43 - Yellow
    Set(SgrAttribute::Background(Color::Base(4))),           // 44 - Blue
    Set(SgrAttribute::Background(Color::Base(5))),           // 45 - Magenta
    Set(SgrAttribute::Background(Color::Base(6))),           // 46 - Cyan
    Set(SgrAttribute::Background(Color::Base(7))),           // 47 - White
    SgrLutEntry::ExtendedBackground,                         // 48
    Set(SgrAttribute::Background(Color::Default)),           // 49
    Undefined,                                               // 50 - disable proportional spacing
    Set(SgrAttribute::Frame(Frame::Framed)),                 // 51
    Set(SgrAttribute::Frame(Frame::Encircled)),              // 52
    Set(SgrAttribute::Overlined(true)),                      // 53
    Set(SgrAttribute::Frame(Frame::Off)),                    // 54
    Set(SgrAttribute::Overlined(false)),                     // 55
    Undefined,                                               // 56
    Undefined,                                               // 57
    Undefined,                                               // 58 - underline color
    Undefined,                                               // 59 - default underline color
    Set(SgrAttribute::IdeogramUnderline),                    // 60
    Set(SgrAttribute::IdeogramDoubleUnderline),              // 61
    Set(SgrAttribute::IdeogramOverline),                     // 62
    Set(SgrAttribute::IdeogramDoubleOverline),               // 63
    Set(SgrAttribute::IdeogramStress),                       // 64
    Set(SgrAttribute::IdeogramAttributesOff),                // 65
    Undefined,
    Undefined,
    Undefined,
    Undefined,
    Undefined, // 66-70
    Undefined,
    Undefined,
    Undefined,
    Undefined,
    Undefined, // 71-75
    Undefined,
    Undefined,
    Undefined,
    Undefined,
    Undefined, // 76-80
    Undefined,
    Undefined,
    Undefined,
    Undefined,
    Undefined, // 81-85
    Undefined,
    Undefined,
    Undefined,
    Undefined,                                               // 86-89
    Set(SgrAttribute::Foreground(Color::Bright(0))),         // 90 - Bright Black
    Set(SgrAttribute::Foreground(Color::Bright(1))),         // 91 - Bright Red
    Set(SgrAttribute::Foreground(Color::Bright(2))),         // 92 - Bright Green
    Set(SgrAttribute::Foreground(Color::Bright(3))),         // 93 - Bright Yellow
    Set(SgrAttribute::Foreground(Color::Bright(4))),         // 94 - Bright Blue
    Set(SgrAttribute::Foreground(Color::Bright(5))),         // 95 - Bright Magenta
    Set(SgrAttribute::Foreground(Color::Bright(6))),         // 96 - Bright Cyan
    Set(SgrAttribute::Foreground(Color::Bright(7))),         // 97 - Bright White
    Undefined,
    Undefined,                                               // 98-99
    Set(SgrAttribute::Background(Color::Bright(0))),         // 100 - Bright Black
    Set(SgrAttribute::Background(Color::Bright(1))),         // 101 - Bright Red
    Set(SgrAttribute::Background(Color::Bright(2))),         // 102 - Bright Green
    Set(SgrAttribute::Background(Color::Bright(3))),         // 103 - Bright Yellow
    Set(SgrAttribute::Background(Color::Bright(4))),         // 104 - Bright Blue
    Set(SgrAttribute::Background(Color::Bright(5))),         // 105 - Bright Magenta
    Set(SgrAttribute::Background(Color::Bright(6))),         // 106 - Bright Cyan
    Set(SgrAttribute::Background(Color::Bright(7))),         // 107 - Bright White
];

fn lookup(code: u16) -> SgrLutEntry {
    SGR_LUT.get(code as usize).copied().unwrap_or(Undefined)
}

/// Parse SGR (Select Graphic Rendition) parameters and emit actions
///
/// Handles CSI...m sequences for text styling and colors, including:
/// - Standard attributes (bold, italic, underline, etc.)
/// - 16-color palette (30-37, 40-47, 90-97, 100-107)
/// - 256-color mode (38;5;n, 48;5;n, 38:5:n)
/// - RGB true color (38;2;r;g;b, 38:2:r:g:b, 38:2::r:g:b)
///
/// An empty parameter list is a reset. An extended color (38 / 48) ends the
/// scan whether or not it resolves: the remaining parameters belong to it.
pub(crate) fn dispatch(params: ParamList, sink: &mut dyn ActionSink) {
    let tokens: Vec<&str> = params.iter().collect();
    if tokens.is_empty() {
        sink.emit(Action::SelectGraphicRendition(SgrAttribute::Reset));
        return;
    }

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        if token.contains(':') {
            if sub_parameter_form(token, sink) == Scan::Stop {
                return;
            }
            i += 1;
            continue;
        }

        // An omitted parameter counts as 0
        let code = parse_number(token).unwrap_or(0);
        match lookup(code) {
            Set(attr) => {
                emit(attr, sink);
                i += 1;
            }
            SgrLutEntry::ExtendedForeground | SgrLutEntry::ExtendedBackground => {
                let args: Vec<u16> = tokens[i + 1..].iter().map(|t| parse_number(t).unwrap_or(0)).collect();
                match extended_color(code, &args) {
                    Ok(color) => emit(color_attribute(code, color), sink),
                    Err(err) => sink.report_error(err),
                }
                return;
            }
            Undefined => {
                sink.report_error(ParseError::InvalidParameter {
                    command: "SelectGraphicRendition",
                    value: code.to_string(),
                    expected: Some("valid SGR attribute code (0-107)".to_string()),
                });
                i += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Continue,
    Stop,
}

/// One `;` token carrying `:` sub-parameters, e.g. `38:2:255:0:0` or `4:3`.
fn sub_parameter_form(token: &str, sink: &mut dyn ActionSink) -> Scan {
    let mut parts = token.split(':');
    let code = parts.next().and_then(parse_number).unwrap_or(0);
    let rest: Vec<&str> = parts.collect();

    match code {
        38 | 48 => {
            // ITU form carries a colour space id in front of the RGB triple
            let args: Vec<u16> = match (rest.first().copied(), rest.len()) {
                (Some("2"), 5..) => std::iter::once(2).chain(rest[2..5].iter().map(|t| parse_number(t).unwrap_or(0))).collect(),
                _ => rest.iter().map(|t| parse_number(t).unwrap_or(0)).collect(),
            };
            match extended_color(code, &args) {
                Ok(color) => emit(color_attribute(code, color), sink),
                Err(err) => sink.report_error(err),
            }
            Scan::Stop
        }
        4 => {
            let style = match rest.first().and_then(|t| parse_number(t)).unwrap_or(1) {
                0 => Underline::Off,
                2 => Underline::Double,
                // curly, dotted and dashed underlines render as single
                _ => Underline::Single,
            };
            emit(SgrAttribute::Underline(style), sink);
            Scan::Continue
        }
        _ => match lookup(code) {
            Set(attr) => {
                emit(attr, sink);
                Scan::Continue
            }
            _ => {
                sink.report_error(ParseError::InvalidParameter {
                    command: "SelectGraphicRendition",
                    value: token.to_string(),
                    expected: None,
                });
                Scan::Continue
            }
        },
    }
}

/// Resolves the arguments following 38 / 48.
fn extended_color(code: u16, args: &[u16]) -> Result<Color, ParseError> {
    let context = if code == 38 {
        "Extended foreground color requires sub-parameters (38;5;n or 38;2;r;g;b)"
    } else {
        "Extended background color requires sub-parameters (48;5;n or 48;2;r;g;b)"
    };
    match args.first() {
        Some(5) => match args.get(1) {
            Some(&index) => Ok(Color::Extended(clamp(index))),
            None => Err(ParseError::IncompleteSequence { context }),
        },
        Some(2) => match args.get(1..4) {
            Some(&[r, g, b]) => Ok(Color::Rgb(clamp(r), clamp(g), clamp(b))),
            _ => Err(ParseError::IncompleteSequence { context }),
        },
        Some(other) => Err(ParseError::InvalidParameter {
            command: "SelectGraphicRendition",
            value: other.to_string(),
            expected: Some("5 (256-color) or 2 (RGB)".to_string()),
        }),
        None => Err(ParseError::IncompleteSequence { context }),
    }
}

fn clamp(value: u16) -> u8 {
    value.min(255) as u8
}

fn color_attribute(code: u16, color: Color) -> SgrAttribute {
    if code == 38 { SgrAttribute::Foreground(color) } else { SgrAttribute::Background(color) }
}

#[inline(always)]
fn emit(attr: SgrAttribute, sink: &mut dyn ActionSink) {
    sink.emit(Action::SelectGraphicRendition(attr));
}
