use crate::{Action, ActionSink, CharsetSlot, EscapeSequence, LineAttribute, ParseError};

/// Simple escapes, `body` is everything after ESC.
pub(crate) fn dispatch(sequence: &EscapeSequence, sink: &mut dyn ActionSink) {
    let body = sequence.body();
    let action = match body {
        "D" => Action::Index,
        "E" => Action::NextLine,
        "H" => Action::SetTabStop,
        "M" => Action::ReverseIndex,
        "N" => Action::SingleShift(CharsetSlot::G2),
        "O" => Action::SingleShift(CharsetSlot::G3),
        "7" => Action::SaveCursor,
        "8" => Action::RestoreCursor,
        "=" => Action::SetKeypadApplicationMode,
        ">" => Action::SetKeypadNumericMode,
        "c" => Action::FullReset,
        "#3" => Action::SetLineAttribute(LineAttribute::DoubleHeightTop),
        "#4" => Action::SetLineAttribute(LineAttribute::DoubleHeightBottom),
        "#5" => Action::SetLineAttribute(LineAttribute::SingleWidth),
        "#6" => Action::SetLineAttribute(LineAttribute::DoubleWidth),
        "#8" => Action::ScreenAlignmentTest,
        // stray string terminator
        "\\" => return,
        _ => match designate_charset(body) {
            Some(action) => action,
            None => {
                sink.report_error(ParseError::UnsupportedFeature {
                    description: "unknown escape sequence",
                    sequence: Some(sequence.text.clone()),
                });
                return;
            }
        },
    };
    sink.emit(action);
}

/// SCS: `(`, `)`, `*` or `+` followed by one charset designator
fn designate_charset(body: &str) -> Option<Action> {
    let mut chars = body.chars();
    let slot = match chars.next()? {
        '(' => CharsetSlot::G0,
        ')' => CharsetSlot::G1,
        '*' => CharsetSlot::G2,
        '+' => CharsetSlot::G3,
        _ => return None,
    };
    let charset = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(Action::DesignateCharset { slot, charset })
}
