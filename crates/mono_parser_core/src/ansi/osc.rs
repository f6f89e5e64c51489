//! OSC (Operating System Command) dispatch
//!
//! Format: `ESC ] Ps ; Pt BEL` or `ESC ] Ps ; Pt ESC \`. `Ps` selects the
//! command, `Pt` is split further by each command.

use std::collections::BTreeMap;

use base64::{Engine as _, engine::general_purpose};

use crate::{Action, ActionSink, DynamicColor, EscapeSequence, ParseError};

pub(crate) fn dispatch(sequence: &EscapeSequence, sink: &mut dyn ActionSink) {
    let body = sequence.body();
    let (code_text, args) = match body.split_once(';') {
        Some((code, args)) => (code, Some(args)),
        None => (body, None),
    };

    let Ok(code) = code_text.parse::<u16>() else {
        sink.report_error(ParseError::MalformedSequence {
            description: "OSC command is not numeric",
            sequence: Some(sequence.text.clone()),
        });
        return;
    };

    match code {
        104 => return reset_palette(args, sink),
        105 => return reset_special_colors(args, sink),
        110..=119 => {
            if let Some(color) = DynamicColor::from_u16(code - 100) {
                sink.emit(Action::ResetDynamicColor(color));
            }
            return;
        }
        _ => {}
    }

    let Some(args) = args else {
        sink.report_error(ParseError::MalformedSequence {
            description: "OSC command is missing its argument",
            sequence: Some(sequence.text.clone()),
        });
        return;
    };

    match code {
        0 | 2 => sink.emit(Action::SetWindowTitle(args.to_string())),
        1 => sink.emit(Action::SetIconName(args.to_string())),
        3 => {
            let (name, value) = match args.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (args, None),
            };
            sink.emit(Action::SetXProperty {
                name: name.to_string(),
                value,
            });
        }
        4 => palette_colors(args, sink),
        5 => special_colors(args, sink),
        6 => {
            let mut tokens = args.split(';');
            match tokens.next().and_then(|t| t.parse::<u16>().ok()) {
                Some(index) => sink.emit(Action::EnableSpecialColor {
                    index,
                    enabled: tokens.next().is_none_or(|flag| flag != "0"),
                }),
                None => sink.report_error(ParseError::InvalidParameter {
                    command: "EnableSpecialColor",
                    value: args.to_string(),
                    expected: Some("special color index".to_string()),
                }),
            }
        }
        7 => sink.emit(Action::SetCurrentDirectory(args.to_string())),
        8 => hyperlink(args, sink),
        9 => sink.emit(Action::Notification(args.to_string())),
        10..=19 => dynamic_colors(code, args, sink),
        46 => sink.emit(Action::SetLogFile(args.to_string())),
        50 => sink.emit(Action::SetFont(args.to_string())),
        51 => sink.emit(Action::SetEmojiFont(args.to_string())),
        52 => selection_data(args, sink),
        _ => sink.report_error(ParseError::UnsupportedFeature {
            description: "unknown OSC command",
            sequence: Some(sequence.text.clone()),
        }),
    }
}

/// OSC 4 ; index ; spec [; index ; spec ...]
fn palette_colors(args: &str, sink: &mut dyn ActionSink) {
    let tokens: Vec<&str> = args.split(';').collect();
    for pair in tokens.chunks(2) {
        let [index, spec] = pair else {
            sink.report_error(ParseError::IncompleteSequence {
                context: "OSC 4 palette index without color spec",
            });
            return;
        };
        let Ok(index) = index.parse::<u8>() else {
            sink.report_error(ParseError::InvalidParameter {
                command: "SetPaletteColor",
                value: index.to_string(),
                expected: Some("0-255".to_string()),
            });
            continue;
        };
        if *spec == "?" {
            sink.emit(Action::QueryPaletteColor(index));
        } else {
            sink.emit(Action::SetPaletteColor { index, spec: spec.to_string() });
        }
    }
}

/// OSC 104 [; index ...], no index resets the whole palette. A bad index
/// drops the whole request.
fn reset_palette(args: Option<&str>, sink: &mut dyn ActionSink) {
    let mut indices = Vec::new();
    for token in args.unwrap_or_default().split(';').filter(|t| !t.is_empty()) {
        match token.parse::<u8>() {
            Ok(index) => indices.push(index),
            Err(_) => {
                sink.report_error(ParseError::InvalidParameter {
                    command: "ResetPaletteColors",
                    value: token.to_string(),
                    expected: Some("0-255".to_string()),
                });
                return;
            }
        }
    }
    sink.emit(Action::ResetPaletteColors(indices));
}

/// OSC 5 ; index ; spec [; index ; spec ...]
fn special_colors(args: &str, sink: &mut dyn ActionSink) {
    let tokens: Vec<&str> = args.split(';').collect();
    for pair in tokens.chunks(2) {
        let [index, spec] = pair else {
            sink.report_error(ParseError::IncompleteSequence {
                context: "OSC 5 special color index without color spec",
            });
            return;
        };
        let Ok(index) = index.parse::<u16>() else {
            sink.report_error(ParseError::InvalidParameter {
                command: "SetSpecialColor",
                value: index.to_string(),
                expected: None,
            });
            continue;
        };
        if *spec == "?" {
            sink.emit(Action::QuerySpecialColor(index));
        } else {
            sink.emit(Action::SetSpecialColor { index, spec: spec.to_string() });
        }
    }
}

fn reset_special_colors(args: Option<&str>, sink: &mut dyn ActionSink) {
    let tokens: Vec<&str> = args.unwrap_or_default().split(';').filter(|t| !t.is_empty()).collect();
    if tokens.is_empty() {
        sink.emit(Action::ResetSpecialColor(None));
        return;
    }
    for token in tokens {
        match token.parse::<u16>() {
            Ok(index) => sink.emit(Action::ResetSpecialColor(Some(index))),
            Err(_) => sink.report_error(ParseError::InvalidParameter {
                command: "ResetSpecialColor",
                value: token.to_string(),
                expected: None,
            }),
        }
    }
}

/// OSC 8 ; id=x:key=value ; URI
fn hyperlink(args: &str, sink: &mut dyn ActionSink) {
    let Some((params, uri)) = args.split_once(';') else {
        sink.report_error(ParseError::IncompleteSequence {
            context: "OSC 8 hyperlink without URI",
        });
        return;
    };
    if uri.is_empty() {
        sink.emit(Action::ClearHyperlink);
        return;
    }

    let params: BTreeMap<String, String> = params
        .split(':')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    sink.emit(Action::SetHyperlink { params, uri: uri.to_string() });
}

/// OSC 10-19. Each further spec addresses the next dynamic color.
fn dynamic_colors(code: u16, args: &str, sink: &mut dyn ActionSink) {
    for (offset, spec) in (0u16..).zip(args.split(';')) {
        let Some(color) = DynamicColor::from_u16(code + offset) else {
            sink.report_error(ParseError::OutOfRange {
                parameter: "dynamic color",
                value: i64::from(code + offset),
                min: 10,
                max: 19,
            });
            return;
        };
        if spec == "?" {
            sink.emit(Action::QueryDynamicColor(color));
        } else {
            sink.emit(Action::SetDynamicColor(color, spec.to_string()));
        }
    }
}

/// OSC 52 ; clipboard ; base64 data (or `?` to query). The clipboard name is
/// passed on as received, an empty one included.
fn selection_data(args: &str, sink: &mut dyn ActionSink) {
    let Some((clipboard, data)) = args.split_once(';') else {
        sink.report_error(ParseError::IncompleteSequence {
            context: "OSC 52 without selection data",
        });
        return;
    };
    let clipboard = clipboard.to_string();

    if data == "?" {
        sink.emit(Action::QuerySelectionData(clipboard));
        return;
    }

    match general_purpose::STANDARD.decode(data) {
        Ok(data) => sink.emit(Action::SetSelectionData { clipboard, data }),
        Err(_) => sink.report_error(ParseError::MalformedSequence {
            description: "Invalid base64 in OSC 52 selection data",
            sequence: None,
        }),
    }
}
