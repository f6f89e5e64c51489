use std::collections::BTreeMap;

use base64::{Engine as _, engine::general_purpose};
use mono_parser_core::{Action, DynamicColor, ParseError};
use pretty_assertions::assert_eq;

use crate::{actions, collect};

#[test]
fn test_titles() {
    assert_eq!(actions("\x1b]0;hello\x07"), vec![Action::SetWindowTitle("hello".to_string())]);
    assert_eq!(actions("\x1b]2;a;b\x1b\\"), vec![Action::SetWindowTitle("a;b".to_string())]);
    assert_eq!(actions("\x1b]1;icon\x07"), vec![Action::SetIconName("icon".to_string())]);
    assert_eq!(actions("\x1b]2;\x07"), vec![Action::SetWindowTitle(String::new())]);
}

#[test]
fn test_x_property() {
    assert_eq!(
        actions("\x1b]3;WM_NAME=x\x07\x1b]3;WM_NAME\x07"),
        vec![
            Action::SetXProperty {
                name: "WM_NAME".to_string(),
                value: Some("x".to_string()),
            },
            Action::SetXProperty {
                name: "WM_NAME".to_string(),
                value: None,
            },
        ]
    );
}

#[test]
fn test_palette() {
    assert_eq!(
        actions("\x1b]4;1;rgb:ff/00/00;2;?\x07"),
        vec![
            Action::SetPaletteColor {
                index: 1,
                spec: "rgb:ff/00/00".to_string()
            },
            Action::QueryPaletteColor(2),
        ]
    );
    assert_eq!(actions("\x1b]104\x07"), vec![Action::ResetPaletteColors(vec![])]);
    assert_eq!(actions("\x1b]104;1;3\x07"), vec![Action::ResetPaletteColors(vec![1, 3])]);
}

#[test]
fn test_palette_reset_with_bad_index() {
    for input in ["\x1b]104;abc\x07", "\x1b]104;1;300\x07"] {
        let sink = collect(input);
        assert!(sink.actions.is_empty(), "{input:?}");
        assert!(matches!(sink.errors[..], [ParseError::InvalidParameter { .. }]), "{input:?}");
    }
}

#[test]
fn test_palette_index_without_spec() {
    let sink = collect("\x1b]4;1;red;2\x07");
    assert_eq!(
        sink.actions,
        vec![Action::SetPaletteColor {
            index: 1,
            spec: "red".to_string()
        }]
    );
    assert_eq!(sink.errors.len(), 1);
}

#[test]
fn test_special_colors() {
    assert_eq!(
        actions("\x1b]5;0;red\x07\x1b]5;1;?\x07\x1b]105\x07\x1b]105;2\x07\x1b]6;1;0\x07\x1b]6;2\x07"),
        vec![
            Action::SetSpecialColor {
                index: 0,
                spec: "red".to_string()
            },
            Action::QuerySpecialColor(1),
            Action::ResetSpecialColor(None),
            Action::ResetSpecialColor(Some(2)),
            Action::EnableSpecialColor { index: 1, enabled: false },
            Action::EnableSpecialColor { index: 2, enabled: true },
        ]
    );
}

#[test]
fn test_current_directory_and_notification() {
    assert_eq!(
        actions("\x1b]7;file://host/tmp\x07\x1b]9;build done\x1b\\"),
        vec![
            Action::SetCurrentDirectory("file://host/tmp".to_string()),
            Action::Notification("build done".to_string()),
        ]
    );
}

#[test]
fn test_hyperlink() {
    let mut params = BTreeMap::new();
    params.insert("id".to_string(), "1".to_string());
    params.insert("foo".to_string(), "bar".to_string());

    assert_eq!(
        actions("\x1b]8;id=1:foo=bar;https://example.com/a;b\x1b\\text\x1b]8;;\x1b\\"),
        vec![
            Action::SetHyperlink {
                params,
                uri: "https://example.com/a;b".to_string(),
            },
            Action::Print("text".to_string()),
            Action::ClearHyperlink,
        ]
    );
}

#[test]
fn test_dynamic_colors() {
    assert_eq!(
        actions("\x1b]10;?\x07\x1b]11;#000000;#ffffff\x07\x1b]112\x07"),
        vec![
            Action::QueryDynamicColor(DynamicColor::Foreground),
            Action::SetDynamicColor(DynamicColor::Background, "#000000".to_string()),
            Action::SetDynamicColor(DynamicColor::Cursor, "#ffffff".to_string()),
            Action::ResetDynamicColor(DynamicColor::Cursor),
        ]
    );

    let sink = collect("\x1b]19;a;b\x07");
    assert_eq!(sink.actions, vec![Action::SetDynamicColor(DynamicColor::HighlightForeground, "a".to_string())]);
    assert!(matches!(sink.errors[..], [ParseError::OutOfRange { .. }]));
}

#[test]
fn test_log_and_fonts() {
    assert_eq!(
        actions("\x1b]46;/tmp/log\x07\x1b]50;Monospace 12\x07\x1b]51;Noto Color Emoji\x07"),
        vec![
            Action::SetLogFile("/tmp/log".to_string()),
            Action::SetFont("Monospace 12".to_string()),
            Action::SetEmojiFont("Noto Color Emoji".to_string()),
        ]
    );
}

#[test]
fn test_clipboard_set_and_query() {
    assert_eq!(
        actions("\x1b]52;c;aGVsbG8=\x07"),
        vec![Action::SetSelectionData {
            clipboard: "c".to_string(),
            data: b"hello".to_vec(),
        }]
    );
    assert_eq!(actions("\x1b]52;c;?\x07"), vec![Action::QuerySelectionData("c".to_string())]);
    assert_eq!(actions("\x1b]52;;?\x07"), vec![Action::QuerySelectionData(String::new())]);
    assert_eq!(
        actions("\x1b]52;;aGk=\x07"),
        vec![Action::SetSelectionData {
            clipboard: String::new(),
            data: b"hi".to_vec(),
        }]
    );
}

#[test]
fn test_clipboard_round_trip() {
    let data: Vec<u8> = vec![0, 1, 2, 0x1b, 0x07, 0xff, b';', b'?'];
    let input = format!("\x1b]52;p;{}\x1b\\", general_purpose::STANDARD.encode(&data));
    assert_eq!(
        actions(&input),
        vec![Action::SetSelectionData {
            clipboard: "p".to_string(),
            data,
        }]
    );
}

#[test]
fn test_clipboard_invalid_base64() {
    let sink = collect("\x1b]52;c;!!!\x07");
    assert!(sink.actions.is_empty());
    assert!(matches!(sink.errors[..], [ParseError::MalformedSequence { .. }]));
}

#[test]
fn test_malformed_osc() {
    for input in ["\x1b]777;x\x07", "\x1b]abc;x\x07", "\x1b]0\x07", "\x1b]\x07", "\x1b]8;nouri\x07"] {
        let sink = collect(input);
        assert!(sink.actions.is_empty(), "{input:?}");
        assert_eq!(sink.errors.len(), 1, "{input:?}");
    }
}

#[test]
fn test_esc_inside_osc_is_data() {
    assert_eq!(actions("\x1b]2;a\x1bb\x07"), vec![Action::SetWindowTitle("a\x1bb".to_string())]);
}
