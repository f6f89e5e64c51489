//! CSI dispatch
//!
//! Final bytes `0x40..=0x7E` index a static table of handlers. The body in
//! front of the final byte is split into private marker, parameters and
//! intermediates before the handler runs.

use super::sgr;
use crate::{
    Action, ActionSink, AnsiMode, CaretShape, DecPrivateMode, DeviceAttributes, DeviceStatusReport, EraseInDisplayMode, EraseInLineMode, EscapeSequence,
    ParamList, ParseError, TabClear, WindowOp, sequence::is_intermediate,
};

/// A CSI sequence split into its parts.
pub(crate) struct CsiSequence<'a> {
    /// `<`, `=`, `>` or `?` directly after `ESC [`
    pub marker: Option<char>,
    pub params: ParamList<'a>,
    pub intermediates: &'a str,
    pub final_byte: char,
    pub text: &'a str,
}

impl<'a> CsiSequence<'a> {
    fn split(sequence: &'a EscapeSequence) -> Result<Self, ParseError> {
        let body = sequence.body();
        let final_byte = sequence.final_char().unwrap_or_default();

        let (marker, rest) = match body.chars().next() {
            Some(ch @ '<'..='?') => (Some(ch), &body[1..]),
            _ => (None, body),
        };
        let params_end = rest.find(|ch: char| !(ch.is_ascii_digit() || ch == ';' || ch == ':')).unwrap_or(rest.len());
        let (params, intermediates) = rest.split_at(params_end);
        if !intermediates.chars().all(is_intermediate) {
            return Err(ParseError::MalformedSequence {
                description: "unexpected character in CSI parameters",
                sequence: Some(sequence.text.clone()),
            });
        }

        Ok(Self {
            marker,
            params: ParamList::new(params),
            intermediates,
            final_byte,
            text: &sequence.text,
        })
    }

    fn is_plain(&self) -> bool {
        self.marker.is_none() && self.intermediates.is_empty()
    }

    fn unsupported(&self, sink: &mut dyn ActionSink) {
        sink.report_error(ParseError::UnsupportedFeature {
            description: "unsupported CSI sequence",
            sequence: Some(self.text.to_string()),
        });
    }
}

type CsiHandler = fn(&CsiSequence, &mut dyn ActionSink);

#[derive(Clone, Copy)]
struct CsiEntry {
    name: &'static str,
    handler: CsiHandler,
    /// Handler only accepts sequences without marker and intermediates
    plain_only: bool,
}

const fn plain(name: &'static str, handler: CsiHandler) -> Option<CsiEntry> {
    Some(CsiEntry {
        name,
        handler,
        plain_only: true,
    })
}

const fn marked(name: &'static str, handler: CsiHandler) -> Option<CsiEntry> {
    Some(CsiEntry {
        name,
        handler,
        plain_only: false,
    })
}

const fn slot(final_byte: u8) -> usize {
    (final_byte - 0x40) as usize
}

static CSI_TABLE: [Option<CsiEntry>; 63] = build_table();

const fn build_table() -> [Option<CsiEntry>; 63] {
    let mut table: [Option<CsiEntry>; 63] = [None; 63];
    table[slot(b'@')] = plain("ICH", |seq, sink| sink.emit(Action::InsertCharacters(seq.params.count(0))));
    table[slot(b'A')] = plain("CUU", |seq, sink| sink.emit(Action::CursorUp(seq.params.count(0))));
    table[slot(b'B')] = plain("CUD", |seq, sink| sink.emit(Action::CursorDown(seq.params.count(0))));
    table[slot(b'C')] = plain("CUF", |seq, sink| sink.emit(Action::CursorForward(seq.params.count(0))));
    table[slot(b'D')] = plain("CUB", |seq, sink| sink.emit(Action::CursorBackward(seq.params.count(0))));
    table[slot(b'E')] = plain("CNL", |seq, sink| sink.emit(Action::CursorNextLine(seq.params.count(0))));
    table[slot(b'F')] = plain("CPL", |seq, sink| sink.emit(Action::CursorPreviousLine(seq.params.count(0))));
    table[slot(b'G')] = plain("CHA", |seq, sink| sink.emit(Action::CursorHorizontalAbsolute(seq.params.count(0))));
    table[slot(b'H')] = plain("CUP", cursor_position);
    table[slot(b'I')] = plain("CHT", |seq, sink| sink.emit(Action::CursorForwardTabulation(seq.params.count(0))));
    table[slot(b'J')] = marked("ED", erase_in_display);
    table[slot(b'K')] = marked("EL", erase_in_line);
    table[slot(b'L')] = plain("IL", |seq, sink| sink.emit(Action::InsertLines(seq.params.count(0))));
    table[slot(b'M')] = plain("DL", |seq, sink| sink.emit(Action::DeleteLines(seq.params.count(0))));
    table[slot(b'P')] = plain("DCH", |seq, sink| sink.emit(Action::DeleteCharacters(seq.params.count(0))));
    table[slot(b'S')] = plain("SU", |seq, sink| sink.emit(Action::ScrollUp(seq.params.count(0))));
    table[slot(b'T')] = plain("SD", |seq, sink| sink.emit(Action::ScrollDown(seq.params.count(0))));
    table[slot(b'X')] = plain("ECH", |seq, sink| sink.emit(Action::EraseCharacters(seq.params.count(0))));
    table[slot(b'Z')] = plain("CBT", |seq, sink| sink.emit(Action::CursorBackwardTabulation(seq.params.count(0))));
    table[slot(b'`')] = plain("HPA", |seq, sink| sink.emit(Action::CursorHorizontalAbsolute(seq.params.count(0))));
    table[slot(b'a')] = plain("HPR", |seq, sink| sink.emit(Action::CharacterPositionRelative(seq.params.count(0))));
    table[slot(b'b')] = plain("REP", |seq, sink| sink.emit(Action::RepeatPrecedingCharacter(seq.params.count(0))));
    table[slot(b'c')] = marked("DA", device_attributes);
    table[slot(b'd')] = plain("VPA", |seq, sink| sink.emit(Action::LinePositionAbsolute(seq.params.count(0))));
    table[slot(b'e')] = plain("VPR", |seq, sink| sink.emit(Action::LinePositionRelative(seq.params.count(0))));
    table[slot(b'f')] = plain("HVP", cursor_position);
    table[slot(b'g')] = plain("TBC", tab_clear);
    table[slot(b'h')] = marked("SM", |seq, sink| set_modes(seq, sink, true));
    table[slot(b'l')] = marked("RM", |seq, sink| set_modes(seq, sink, false));
    table[slot(b'm')] = marked("SGR", select_graphic_rendition);
    table[slot(b'n')] = marked("DSR", device_status_report);
    table[slot(b'p')] = marked("DECSTR/DECSCL/DECRQM", p_sequences);
    table[slot(b'q')] = marked("DECSCUSR", cursor_style);
    table[slot(b'r')] = marked("DECSTBM", scrolling_region);
    table[slot(b's')] = plain("SCOSC", |_, sink| sink.emit(Action::SaveCursorPosition));
    table[slot(b't')] = plain("XTWINOPS", window_manipulation);
    table[slot(b'u')] = plain("SCORC", |_, sink| sink.emit(Action::RestoreCursorPosition));
    table[slot(b'x')] = plain("DECREQTPARM", |seq, sink| sink.emit(Action::RequestTerminalParameters(seq.params.value_or(0, 0))));
    table[slot(b'{')] = marked("DECSLE", select_locator_events);
    table[slot(b'|')] = marked("DECRQLP", request_locator_position);
    table
}

pub(crate) fn dispatch(sequence: &EscapeSequence, sink: &mut dyn ActionSink) {
    let csi = match CsiSequence::split(sequence) {
        Ok(csi) => csi,
        Err(err) => {
            sink.report_error(err);
            return;
        }
    };

    let entry = (csi.final_byte as usize).checked_sub(0x40).and_then(|idx| CSI_TABLE.get(idx)).copied().flatten();
    match entry {
        Some(entry) if entry.plain_only && !csi.is_plain() => {
            log::trace!("{} does not take a marker or intermediates", entry.name);
            csi.unsupported(sink)
        }
        Some(entry) => {
            log::trace!("CSI {} {:?}", entry.name, csi.params.as_str());
            (entry.handler)(&csi, sink)
        }
        None => sink.report_error(ParseError::UnsupportedFeature {
            description: "unknown CSI final byte",
            sequence: Some(sequence.text.clone()),
        }),
    }
}

fn cursor_position(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    sink.emit(Action::CursorPosition {
        row: seq.params.count(0),
        col: seq.params.count(1),
    });
}

fn erase_in_display(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    let selective = match (seq.marker, seq.intermediates) {
        (None, "") => false,
        (Some('?'), "") => true,
        _ => return seq.unsupported(sink),
    };
    let n = seq.params.value_or(0, 0);
    match EraseInDisplayMode::from_u16(n) {
        Some(mode) => sink.emit(Action::EraseInDisplay { mode, selective }),
        None => sink.report_error(ParseError::InvalidParameter {
            command: "EraseInDisplay",
            value: n.to_string(),
            expected: Some("0, 1, 2 or 3".to_string()),
        }),
    }
}

fn erase_in_line(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    let selective = match (seq.marker, seq.intermediates) {
        (None, "") => false,
        (Some('?'), "") => true,
        _ => return seq.unsupported(sink),
    };
    let n = seq.params.value_or(0, 0);
    match EraseInLineMode::from_u16(n) {
        Some(mode) => sink.emit(Action::EraseInLine { mode, selective }),
        None => sink.report_error(ParseError::InvalidParameter {
            command: "EraseInLine",
            value: n.to_string(),
            expected: Some("0, 1 or 2".to_string()),
        }),
    }
}

fn tab_clear(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    let n = seq.params.value_or(0, 0);
    match TabClear::from_u16(n) {
        Some(clear) => sink.emit(Action::ClearTabStop(clear)),
        None => sink.report_error(ParseError::InvalidParameter {
            command: "ClearTabStop",
            value: n.to_string(),
            expected: Some("0 or 3".to_string()),
        }),
    }
}

fn device_attributes(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    if !seq.intermediates.is_empty() {
        return seq.unsupported(sink);
    }
    let kind = match seq.marker {
        None => DeviceAttributes::Primary,
        Some('>') => DeviceAttributes::Secondary,
        Some('=') => DeviceAttributes::Tertiary,
        _ => return seq.unsupported(sink),
    };
    let n = seq.params.value_or(0, 0);
    if n != 0 {
        sink.report_error(ParseError::InvalidParameter {
            command: "DeviceAttributes",
            value: n.to_string(),
            expected: Some("0".to_string()),
        });
        return;
    }
    sink.emit(Action::DeviceAttributes(kind));
}

fn set_modes(seq: &CsiSequence, sink: &mut dyn ActionSink, set: bool) {
    if !seq.intermediates.is_empty() {
        return seq.unsupported(sink);
    }
    let private = match seq.marker {
        None => false,
        Some('?') => true,
        _ => return seq.unsupported(sink),
    };
    if seq.params.is_empty() {
        sink.report_error(ParseError::IncompleteSequence {
            context: "SM/RM without a mode",
        });
        return;
    }

    let command = match (private, set) {
        (false, true) => "SetMode",
        (false, false) => "ResetMode",
        (true, true) => "SetDecPrivateMode",
        (true, false) => "ResetDecPrivateMode",
    };
    for token in seq.params.iter() {
        let n = crate::params::parse_number(token);
        let action = if private {
            n.and_then(DecPrivateMode::from_u16).map(|mode| {
                if set {
                    Action::SetDecPrivateMode(mode)
                } else {
                    Action::ResetDecPrivateMode(mode)
                }
            })
        } else {
            n.and_then(AnsiMode::from_u16).map(|mode| if set { Action::SetMode(mode) } else { Action::ResetMode(mode) })
        };
        match action {
            Some(action) => sink.emit(action),
            None => sink.report_error(ParseError::InvalidParameter {
                command,
                value: token.to_string(),
                expected: None,
            }),
        }
    }
}

fn select_graphic_rendition(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    if !seq.is_plain() {
        return seq.unsupported(sink);
    }
    sgr::dispatch(seq.params, sink);
}

fn device_status_report(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    if !seq.intermediates.is_empty() {
        return seq.unsupported(sink);
    }
    let private = match seq.marker {
        None => false,
        Some('?') => true,
        _ => return seq.unsupported(sink),
    };
    let n = seq.params.value_or(0, 0);
    match DeviceStatusReport::from_u16(n, private) {
        Some(report) => sink.emit(Action::DeviceStatusReport(report)),
        None => sink.report_error(ParseError::InvalidParameter {
            command: "DeviceStatusReport",
            value: n.to_string(),
            expected: Some(if private { "6, 15, 25 or 26" } else { "5 or 6" }.to_string()),
        }),
    }
}

fn p_sequences(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    match (seq.marker, seq.intermediates) {
        (None, "!") => sink.emit(Action::SoftReset),
        (None, "\"") => sink.emit(Action::SetConformanceLevel {
            level: seq.params.value_or(0, 65),
            eight_bit_controls: seq.params.value_or(1, 0) != 1,
        }),
        (None | Some('?'), "$") => sink.emit(Action::RequestMode {
            mode: seq.params.value_or(0, 0),
            private: seq.marker.is_some(),
        }),
        _ => seq.unsupported(sink),
    }
}

fn cursor_style(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    if seq.marker.is_some() || !matches!(seq.intermediates, "" | " ") {
        return seq.unsupported(sink);
    }
    let (blinking, shape) = match seq.params.value_or(0, 0) {
        0 | 1 => (true, CaretShape::Block),
        2 => (false, CaretShape::Block),
        3 => (true, CaretShape::Underline),
        4 => (false, CaretShape::Underline),
        5 => (true, CaretShape::Bar),
        6 => (false, CaretShape::Bar),
        n => {
            sink.report_error(ParseError::InvalidParameter {
                command: "SetCursorStyle",
                value: n.to_string(),
                expected: Some("0-6".to_string()),
            });
            return;
        }
    };
    sink.emit(Action::SetCursorStyle { blinking, shape });
}

fn scrolling_region(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    if !seq.is_plain() {
        return seq.unsupported(sink);
    }
    let top = seq.params.count(0);
    let bottom = seq.params.number(1).filter(|&bottom| bottom > 0);
    if let Some(bottom) = bottom {
        if bottom < top {
            sink.report_error(ParseError::OutOfRange {
                parameter: "DECSTBM bottom",
                value: i64::from(bottom),
                min: i64::from(top),
                max: i64::from(u16::MAX),
            });
            return;
        }
    }
    sink.emit(Action::SetScrollingRegion { top, bottom });
}

fn window_manipulation(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    let params = &seq.params;
    let op = match params.value_or(0, 0) {
        1 => WindowOp::Deiconify,
        2 => WindowOp::Iconify,
        3 => WindowOp::Move {
            x: params.value_or(1, 0),
            y: params.value_or(2, 0),
        },
        4 => WindowOp::ResizePixels {
            height: params.value_or(1, 0),
            width: params.value_or(2, 0),
        },
        5 => WindowOp::Raise,
        6 => WindowOp::Lower,
        7 => WindowOp::Refresh,
        8 => WindowOp::ResizeChars {
            rows: params.value_or(1, 0),
            columns: params.value_or(2, 0),
        },
        9 => WindowOp::Maximize(params.value_or(1, 0) != 0),
        10 => WindowOp::FullScreen(params.value_or(1, 0)),
        11 => WindowOp::ReportState,
        13 => WindowOp::ReportPosition,
        14 => WindowOp::ReportSizePixels,
        18 => WindowOp::ReportSizeChars,
        19 => WindowOp::ReportScreenSizeChars,
        20 => WindowOp::ReportIconLabel,
        21 => WindowOp::ReportTitle,
        22 => WindowOp::PushTitle,
        23 => WindowOp::PopTitle,
        n if n >= 24 => WindowOp::ResizeLines(n),
        _ => WindowOp::Other(params.numbers(0)),
    };
    sink.emit(Action::WindowManipulation(op));
}

fn select_locator_events(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    if seq.marker.is_some() || !matches!(seq.intermediates, "" | "'") {
        return seq.unsupported(sink);
    }
    let events = if seq.params.is_empty() { vec![0] } else { seq.params.numbers(0) };
    sink.emit(Action::SelectLocatorEvents(events));
}

fn request_locator_position(seq: &CsiSequence, sink: &mut dyn ActionSink) {
    if seq.marker.is_some() || !matches!(seq.intermediates, "" | "'") {
        return seq.unsupported(sink);
    }
    sink.emit(Action::RequestLocatorPosition(seq.params.value_or(0, 0)));
}
