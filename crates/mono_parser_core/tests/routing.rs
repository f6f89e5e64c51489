use std::collections::BTreeMap;

use mono_parser_core::{ActionTarget, Capability, OutputControl, OutputParser, WindowControl, WindowOp, route};
use pretty_assertions::assert_eq;

/// Implements only the output and window groups.
#[derive(Default)]
struct TitleRecorder {
    text: String,
    bells: usize,
    link: Option<String>,
    titles: Vec<String>,
    window_ops: Vec<WindowOp>,
}

impl OutputControl for TitleRecorder {
    fn print(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn bell(&mut self) {
        self.bells += 1;
    }

    fn set_hyperlink(&mut self, _params: &BTreeMap<String, String>, uri: &str) {
        self.link = Some(uri.to_string());
    }

    fn clear_hyperlink(&mut self) {
        self.link = None;
    }

    fn process_regis(&mut self, _commands: &str) {}
}

impl WindowControl for TitleRecorder {
    fn set_window_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn set_icon_name(&mut self, _name: &str) {}
    fn set_x_property(&mut self, _name: &str, _value: Option<&str>) {}
    fn set_current_directory(&mut self, _url: &str) {}
    fn notify(&mut self, _message: &str) {}
    fn set_log_file(&mut self, _path: &str) {}
    fn set_font(&mut self, _font: &str) {}
    fn set_emoji_font(&mut self, _font: &str) {}

    fn window_manipulation(&mut self, op: &WindowOp) {
        self.window_ops.push(op.clone());
    }
}

impl ActionTarget for TitleRecorder {
    fn output(&mut self) -> Option<&mut dyn OutputControl> {
        Some(self)
    }

    fn window(&mut self) -> Option<&mut dyn WindowControl> {
        Some(self)
    }
}

#[test]
fn test_route_to_implemented_groups() {
    let mut target = TitleRecorder::default();
    let actions = OutputParser::new().parse("\x1b]2;build\x07hello\x07\x1b]8;;https://x.org\x1b\\\x1b[22;0t");

    let routed: Vec<bool> = actions.iter().map(|action| route(action, &mut target)).collect();
    assert!(routed.iter().all(|r| *r));

    assert_eq!(target.titles, vec!["build".to_string()]);
    assert_eq!(target.text, "hello");
    assert_eq!(target.bells, 1);
    assert_eq!(target.link.as_deref(), Some("https://x.org"));
    assert_eq!(target.window_ops, vec![WindowOp::PushTitle]);
}

#[test]
fn test_route_reports_missing_group() {
    let mut target = TitleRecorder::default();
    let actions = OutputParser::new().parse("a\r\n\x1b[2J\x1b[31m\x1b[6n");

    let routed: Vec<(Capability, bool)> = actions.iter().map(|action| (action.capability(), route(action, &mut target))).collect();
    assert_eq!(
        routed,
        vec![
            (Capability::Output, true),
            (Capability::Cursor, false),
            (Capability::Cursor, false),
            (Capability::Erase, false),
            (Capability::Color, false),
            (Capability::Report, false),
        ]
    );
    assert_eq!(target.text, "a");
}

#[test]
fn test_capability_groups() {
    let parse = |input: &str| OutputParser::new().parse(input).iter().map(|a| a.capability()).collect::<Vec<_>>();

    assert_eq!(parse("\x1b[?25h\x1b(0\x1bc"), vec![Capability::Mode, Capability::Mode, Capability::Mode]);
    assert_eq!(parse("\x1b]52;c;?\x07"), vec![Capability::Clipboard]);
    assert_eq!(parse("\x1bP=1/x\x1b\\\x1bP1*|17/41\x1b\\"), vec![Capability::KeyProgramming, Capability::KeyProgramming]);
    assert_eq!(parse("\x1b]4;1;?\x07\x1b]10;?\x07"), vec![Capability::Color, Capability::Color]);
    assert_eq!(parse("\x1b[K\x1b#8"), vec![Capability::Erase, Capability::Erase]);
}
