//! DCS (Device Control String) dispatch by literal prefix.

use crate::{Action, ActionSink, EscapeSequence, ParseError, StatusStringRequest, params::parse_number};

type DcsHandler = fn(&str, &mut dyn ActionSink);

/// Checked in order, the first matching prefix wins.
static DCS_PREFIXES: &[(&str, DcsHandler)] = &[
    ("$q", request_status_string),
    ("+q", request_terminfo),
    ("1$r", |rest, sink| sink.emit(Action::ReportCursorInformation(rest.to_string()))),
    ("$t", |rest, sink| sink.emit(Action::RestorePresentationState(rest.to_string()))),
    (">|", |rest, sink| sink.emit(Action::ProcessRegis(rest.to_string()))),
    ("=", program_function_key),
    ("+p", program_key_action),
    ("$s", |rest, sink| sink.emit(Action::SelectCharacterProtection(rest.to_string()))),
];

pub(crate) fn dispatch(sequence: &EscapeSequence, sink: &mut dyn ActionSink) {
    let body = sequence.body();

    for (prefix, handler) in DCS_PREFIXES {
        if let Some(rest) = body.strip_prefix(prefix) {
            handler(rest, sink);
            return;
        }
    }

    if let Some((clear, definitions)) = split_user_keys(body) {
        sink.emit(Action::DefineUserKeys {
            clear,
            definitions: definitions.split(';').filter(|d| !d.is_empty()).map(str::to_string).collect(),
        });
        return;
    }

    sink.report_error(ParseError::UnsupportedFeature {
        description: "unknown DCS string",
        sequence: Some(sequence.text.clone()),
    });
}

/// `N*|definitions` with at least one digit
fn split_user_keys(body: &str) -> Option<(u16, &str)> {
    let digits_end = body.find(|ch: char| !ch.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let definitions = body[digits_end..].strip_prefix("*|")?;
    Some((parse_number(&body[..digits_end])?, definitions))
}

fn request_status_string(setting: &str, sink: &mut dyn ActionSink) {
    let request = match setting {
        "m" => StatusStringRequest::GraphicRendition,
        "r" => StatusStringRequest::Margins,
        " q" => StatusStringRequest::CursorStyle,
        "\"p" => StatusStringRequest::ConformanceLevel,
        _ => {
            sink.report_error(ParseError::InvalidParameter {
                command: "RequestStatusString",
                value: setting.to_string(),
                expected: Some("m, r, \" q\" or \"p".to_string()),
            });
            return;
        }
    };
    sink.emit(Action::RequestStatusString(request));
}

fn request_terminfo(names: &str, sink: &mut dyn ActionSink) {
    let decoded: Result<Vec<String>, _> = names.split(';').filter(|n| !n.is_empty()).map(decode_hex_string).collect();
    match decoded {
        Ok(names) if !names.is_empty() => sink.emit(Action::RequestTerminfo(names)),
        Ok(_) => sink.report_error(ParseError::IncompleteSequence {
            context: "XTGETTCAP without capability names",
        }),
        Err(description) => sink.report_error(ParseError::MalformedSequence {
            description,
            sequence: Some(names.to_string()),
        }),
    }
}

fn program_function_key(payload: &str, sink: &mut dyn ActionSink) {
    match payload.split_once('/') {
        Some((key, string)) => sink.emit(Action::ProgramFunctionKey {
            key: key.to_string(),
            string: string.to_string(),
        }),
        None => sink.report_error(ParseError::MalformedSequence {
            description: "DECPFK expects key/string",
            sequence: Some(payload.to_string()),
        }),
    }
}

fn program_key_action(payload: &str, sink: &mut dyn ActionSink) {
    match payload.split_once('/') {
        Some((key, action)) => sink.emit(Action::ProgramKeyAction {
            key: key.to_string(),
            action: action.to_string(),
        }),
        None => sink.report_error(ParseError::MalformedSequence {
            description: "DECPKA expects key/action",
            sequence: Some(payload.to_string()),
        }),
    }
}

fn decode_hex_string(hex: &str) -> Result<String, &'static str> {
    if hex.len() % 2 != 0 {
        return Err("Invalid hex string length");
    }

    let mut result = Vec::with_capacity(hex.len() / 2);
    for chunk in hex.as_bytes().chunks(2) {
        let [high, low] = *chunk else {
            return Err("Invalid hex string length");
        };
        result.push((hex_digit(high)? << 4) | hex_digit(low)?);
    }

    String::from_utf8(result).map_err(|_| "Invalid UTF-8 in decoded string")
}

fn hex_digit(byte: u8) -> Result<u8, &'static str> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err("Invalid hex digit"),
    }
}
