use mono_parser_core::{
    Action, AnsiMode, CaretShape, DecPrivateMode, DeviceAttributes, DeviceStatusReport, EraseInDisplayMode, EraseInLineMode, ParseError, TabClear, WindowOp,
};
use pretty_assertions::assert_eq;

use crate::{actions, collect};

#[test]
fn test_cursor_movement_defaults() {
    assert_eq!(
        actions("\x1b[A\x1b[0B\x1b[5C\x1b[D"),
        vec![Action::CursorUp(1), Action::CursorDown(1), Action::CursorForward(5), Action::CursorBackward(1)]
    );
}

#[test]
fn test_cursor_position_synonyms() {
    assert_eq!(
        actions("\x1b[H\x1b[5;10H\x1b[5;10f\x1b[;7H\x1b[0;0f"),
        vec![
            Action::CursorPosition { row: 1, col: 1 },
            Action::CursorPosition { row: 5, col: 10 },
            Action::CursorPosition { row: 5, col: 10 },
            Action::CursorPosition { row: 1, col: 7 },
            Action::CursorPosition { row: 1, col: 1 },
        ]
    );
}

#[test]
fn test_line_and_column_positioning() {
    assert_eq!(
        actions("\x1b[3G\x1b[4`\x1b[2E\x1b[F\x1b[3a\x1b[4d\x1b[e"),
        vec![
            Action::CursorHorizontalAbsolute(3),
            Action::CursorHorizontalAbsolute(4),
            Action::CursorNextLine(2),
            Action::CursorPreviousLine(1),
            Action::CharacterPositionRelative(3),
            Action::LinePositionAbsolute(4),
            Action::LinePositionRelative(1),
        ]
    );
}

#[test]
fn test_tabulation() {
    assert_eq!(
        actions("\x1b[2I\x1b[Z\x1b[g\x1b[3g"),
        vec![
            Action::CursorForwardTabulation(2),
            Action::CursorBackwardTabulation(1),
            Action::ClearTabStop(TabClear::CurrentColumn),
            Action::ClearTabStop(TabClear::All),
        ]
    );
}

#[test]
fn test_save_restore_cursor_position() {
    assert_eq!(actions("\x1b[s\x1b[u"), vec![Action::SaveCursorPosition, Action::RestoreCursorPosition]);
}

#[test]
fn test_erase() {
    assert_eq!(
        actions("\x1b[J\x1b[1J\x1b[2J\x1b[3J\x1b[?2J\x1b[K\x1b[?1K"),
        vec![
            Action::EraseInDisplay {
                mode: EraseInDisplayMode::CursorToEnd,
                selective: false
            },
            Action::EraseInDisplay {
                mode: EraseInDisplayMode::StartToCursor,
                selective: false
            },
            Action::EraseInDisplay {
                mode: EraseInDisplayMode::All,
                selective: false
            },
            Action::EraseInDisplay {
                mode: EraseInDisplayMode::AllAndScrollback,
                selective: false
            },
            Action::EraseInDisplay {
                mode: EraseInDisplayMode::All,
                selective: true
            },
            Action::EraseInLine {
                mode: EraseInLineMode::CursorToEnd,
                selective: false
            },
            Action::EraseInLine {
                mode: EraseInLineMode::StartToCursor,
                selective: true
            },
        ]
    );
}

#[test]
fn test_invalid_erase_mode() {
    let sink = collect("\x1b[5J");
    assert!(sink.actions.is_empty());
    match &sink.errors[..] {
        [ParseError::InvalidParameter { command, value, .. }] => {
            assert_eq!(*command, "EraseInDisplay");
            assert_eq!(value, "5");
        }
        other => panic!("Expected InvalidParameter error, got {other:?}"),
    }
}

#[test]
fn test_insert_delete_scroll() {
    assert_eq!(
        actions("\x1b[@\x1b[2P\x1b[3X\x1b[4L\x1b[5M\x1b[6S\x1b[T\x1b[2b"),
        vec![
            Action::InsertCharacters(1),
            Action::DeleteCharacters(2),
            Action::EraseCharacters(3),
            Action::InsertLines(4),
            Action::DeleteLines(5),
            Action::ScrollUp(6),
            Action::ScrollDown(1),
            Action::RepeatPrecedingCharacter(2),
        ]
    );
}

#[test]
fn test_modes_one_action_per_parameter() {
    assert_eq!(
        actions("\x1b[4h\x1b[4l\x1b[?25;1049h\x1b[?7l"),
        vec![
            Action::SetMode(AnsiMode::InsertReplace),
            Action::ResetMode(AnsiMode::InsertReplace),
            Action::SetDecPrivateMode(DecPrivateMode::CursorVisible),
            Action::SetDecPrivateMode(DecPrivateMode::AlternateScreenSaveCursor),
            Action::ResetDecPrivateMode(DecPrivateMode::AutoWrap),
        ]
    );
}

#[test]
fn test_unknown_mode_is_skipped() {
    let sink = collect("\x1b[?9999;2004h");
    assert_eq!(sink.actions, vec![Action::SetDecPrivateMode(DecPrivateMode::BracketedPaste)]);
    assert_eq!(sink.errors.len(), 1);
}

#[test]
fn test_scrolling_region() {
    assert_eq!(
        actions("\x1b[r\x1b[5;20r\x1b[0;0r"),
        vec![
            Action::SetScrollingRegion { top: 1, bottom: None },
            Action::SetScrollingRegion { top: 5, bottom: Some(20) },
            Action::SetScrollingRegion { top: 1, bottom: None },
        ]
    );

    let sink = collect("\x1b[20;5r");
    assert!(sink.actions.is_empty());
    assert!(matches!(sink.errors[..], [ParseError::OutOfRange { .. }]));
}

#[test]
fn test_cursor_style() {
    assert_eq!(
        actions("\x1b[ q\x1b[2 q\x1b[5 q\x1b[6q"),
        vec![
            Action::SetCursorStyle {
                blinking: true,
                shape: CaretShape::Block
            },
            Action::SetCursorStyle {
                blinking: false,
                shape: CaretShape::Block
            },
            Action::SetCursorStyle {
                blinking: true,
                shape: CaretShape::Bar
            },
            Action::SetCursorStyle {
                blinking: false,
                shape: CaretShape::Bar
            },
        ]
    );
}

#[test]
fn test_device_attributes() {
    assert_eq!(
        actions("\x1b[c\x1b[0c\x1b[>c\x1b[=c"),
        vec![
            Action::DeviceAttributes(DeviceAttributes::Primary),
            Action::DeviceAttributes(DeviceAttributes::Primary),
            Action::DeviceAttributes(DeviceAttributes::Secondary),
            Action::DeviceAttributes(DeviceAttributes::Tertiary),
        ]
    );
}

#[test]
fn test_device_status_report() {
    assert_eq!(
        actions("\x1b[5n\x1b[6n\x1b[?6n\x1b[?26n"),
        vec![
            Action::DeviceStatusReport(DeviceStatusReport::OperatingStatus),
            Action::DeviceStatusReport(DeviceStatusReport::CursorPosition),
            Action::DeviceStatusReport(DeviceStatusReport::ExtendedCursorPosition),
            Action::DeviceStatusReport(DeviceStatusReport::Keyboard),
        ]
    );
    assert_eq!(collect("\x1b[7n").errors.len(), 1);
}

#[test]
fn test_p_with_intermediates() {
    assert_eq!(
        actions("\x1b[!p\x1b[64;1\"p\x1b[?25$p\x1b[4$p"),
        vec![
            Action::SoftReset,
            Action::SetConformanceLevel {
                level: 64,
                eight_bit_controls: false
            },
            Action::RequestMode { mode: 25, private: true },
            Action::RequestMode { mode: 4, private: false },
        ]
    );
}

#[test]
fn test_window_manipulation() {
    assert_eq!(
        actions("\x1b[8;24;80t\x1b[22;0t\x1b[18t\x1b[3;10;20t\x1b[30t"),
        vec![
            Action::WindowManipulation(WindowOp::ResizeChars { rows: 24, columns: 80 }),
            Action::WindowManipulation(WindowOp::PushTitle),
            Action::WindowManipulation(WindowOp::ReportSizeChars),
            Action::WindowManipulation(WindowOp::Move { x: 10, y: 20 }),
            Action::WindowManipulation(WindowOp::ResizeLines(30)),
        ]
    );
}

#[test]
fn test_terminal_and_locator_requests() {
    assert_eq!(
        actions("\x1b[1x\x1b[1;2'{\x1b[1'|"),
        vec![
            Action::RequestTerminalParameters(1),
            Action::SelectLocatorEvents(vec![1, 2]),
            Action::RequestLocatorPosition(1),
        ]
    );
}

#[test]
fn test_parameters_saturate() {
    assert_eq!(actions("\x1b[99999999A"), vec![Action::CursorUp(u16::MAX)]);
}

#[test]
fn test_malformed_parameters() {
    let sink = collect("\x1b[1?2B");
    assert!(sink.actions.is_empty());
    assert!(matches!(sink.errors[..], [ParseError::MalformedSequence { .. }]));
}

#[test]
fn test_marker_on_plain_operation() {
    let sink = collect("\x1b[?5A\x1b[>1m");
    assert!(sink.actions.is_empty());
    assert_eq!(sink.errors.len(), 2);
}
