use mono_parser_core::{Action, OutputParser, ParserState, StatusStringRequest};
use pretty_assertions::assert_eq;

use crate::{actions, collect};

#[test]
fn test_request_status_string() {
    assert_eq!(
        actions("\x1bP$qm\x1b\\\x1bP$qr\x1b\\\x1bP$q q\x1b\\\x1bP$q\"p\x1b\\"),
        vec![
            Action::RequestStatusString(StatusStringRequest::GraphicRendition),
            Action::RequestStatusString(StatusStringRequest::Margins),
            Action::RequestStatusString(StatusStringRequest::CursorStyle),
            Action::RequestStatusString(StatusStringRequest::ConformanceLevel),
        ]
    );
    let sink = collect("\x1bP$qx\x1b\\");
    assert!(sink.actions.is_empty());
    assert_eq!(sink.errors.len(), 1);
}

#[test]
fn test_request_terminfo() {
    assert_eq!(
        actions("\x1bP+q544e;636F6C6F7273\x1b\\"),
        vec![Action::RequestTerminfo(vec!["TN".to_string(), "colors".to_string()])]
    );
    for input in ["\x1bP+qZZ\x1b\\", "\x1bP+q+f\x1b\\", "\x1bP+q544e;-1\x1b\\"] {
        let sink = collect(input);
        assert!(sink.actions.is_empty(), "{input:?}");
        assert_eq!(sink.errors.len(), 1, "{input:?}");
    }
}

#[test]
fn test_reports_and_graphics() {
    assert_eq!(
        actions("\x1bP1$r1;1;1;1;@;@;0;0;@;BBBB\x1b\\\x1bP$t1;2\x1b\\\x1bP>|P[100,100]\x1b\\\x1bP$s1\x1b\\"),
        vec![
            Action::ReportCursorInformation("1;1;1;1;@;@;0;0;@;BBBB".to_string()),
            Action::RestorePresentationState("1;2".to_string()),
            Action::ProcessRegis("P[100,100]".to_string()),
            Action::SelectCharacterProtection("1".to_string()),
        ]
    );
}

#[test]
fn test_key_programming() {
    assert_eq!(
        actions("\x1bP=12/hello\x1b\\\x1bP+p12/3\x1b\\\x1bP1*|17/6869;18/7468\x1b\\"),
        vec![
            Action::ProgramFunctionKey {
                key: "12".to_string(),
                string: "hello".to_string(),
            },
            Action::ProgramKeyAction {
                key: "12".to_string(),
                action: "3".to_string(),
            },
            Action::DefineUserKeys {
                clear: 1,
                definitions: vec!["17/6869".to_string(), "18/7468".to_string()],
            },
        ]
    );
}

#[test]
fn test_malformed_dcs() {
    for input in ["\x1bP=12\x1b\\", "\x1bP+p12\x1b\\", "\x1bPzz\x1b\\", "\x1bP*|17/41\x1b\\"] {
        let sink = collect(input);
        assert!(sink.actions.is_empty(), "{input:?}");
        assert_eq!(sink.errors.len(), 1, "{input:?}");
    }
}

#[test]
fn test_bel_does_not_end_dcs() {
    let mut parser = OutputParser::new();
    assert!(parser.parse("\x1bP$qm\x07").is_empty());
    assert_eq!(parser.state(), ParserState::Dcs);
    // the BEL is part of the payload, so the request is no longer recognized
    assert!(parser.parse("\x1b\\").is_empty());
    assert_eq!(parser.state(), ParserState::Ground);
}
