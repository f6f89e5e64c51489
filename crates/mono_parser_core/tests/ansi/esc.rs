use mono_parser_core::{Action, CharsetSlot, LineAttribute};
use pretty_assertions::assert_eq;

use crate::{actions, collect};

#[test]
fn test_two_character_escapes() {
    assert_eq!(
        actions("\x1bD\x1bE\x1bH\x1bM\x1bN\x1bO\x1b7\x1b8\x1b=\x1b>\x1bc"),
        vec![
            Action::Index,
            Action::NextLine,
            Action::SetTabStop,
            Action::ReverseIndex,
            Action::SingleShift(CharsetSlot::G2),
            Action::SingleShift(CharsetSlot::G3),
            Action::SaveCursor,
            Action::RestoreCursor,
            Action::SetKeypadApplicationMode,
            Action::SetKeypadNumericMode,
            Action::FullReset,
        ]
    );
}

#[test]
fn test_line_attributes() {
    assert_eq!(
        actions("\x1b#3\x1b#4\x1b#5\x1b#6\x1b#8"),
        vec![
            Action::SetLineAttribute(LineAttribute::DoubleHeightTop),
            Action::SetLineAttribute(LineAttribute::DoubleHeightBottom),
            Action::SetLineAttribute(LineAttribute::SingleWidth),
            Action::SetLineAttribute(LineAttribute::DoubleWidth),
            Action::ScreenAlignmentTest,
        ]
    );
}

#[test]
fn test_designate_charset() {
    assert_eq!(
        actions("\x1b(0\x1b)B\x1b*A\x1b+<x"),
        vec![
            Action::DesignateCharset { slot: CharsetSlot::G0, charset: '0' },
            Action::DesignateCharset { slot: CharsetSlot::G1, charset: 'B' },
            Action::DesignateCharset { slot: CharsetSlot::G2, charset: 'A' },
            Action::DesignateCharset { slot: CharsetSlot::G3, charset: '<' },
            Action::Print("x".to_string()),
        ]
    );
}

#[test]
fn test_unknown_escape() {
    let sink = collect("\x1bZok");
    assert_eq!(sink.actions, vec![Action::Print("ok".to_string())]);
    assert_eq!(sink.errors.len(), 1);

    let sink = collect("\x1b#9");
    assert!(sink.actions.is_empty());
    assert_eq!(sink.errors.len(), 1);
}

#[test]
fn test_application_program_string_is_consumed() {
    let sink = collect("\x1b_Gf=100;AAAA\x1b\\after");
    assert_eq!(sink.actions, vec![Action::Print("after".to_string())]);
    assert_eq!(sink.errors.len(), 1);
}
