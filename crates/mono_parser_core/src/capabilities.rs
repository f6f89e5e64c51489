//! Capability groups an action owner implements, and the router that applies
//! an [`Action`] to exactly one method of exactly one group.
//!
//! An owner only implements the groups it cares about and exposes them through
//! [`ActionTarget`]. Actions for a missing group are dropped by [`route`].

use std::collections::BTreeMap;

use crate::{
    Action, AnsiMode, CaretShape, CharsetSlot, DecPrivateMode, DeviceAttributes, DeviceStatusReport, DynamicColor, EraseInDisplayMode, EraseInLineMode,
    LineAttribute, SgrAttribute, StatusStringRequest, TabClear, WindowOp,
};

/// Text output and inline objects
pub trait OutputControl {
    fn print(&mut self, text: &str);
    fn bell(&mut self);
    fn set_hyperlink(&mut self, params: &BTreeMap<String, String>, uri: &str);
    fn clear_hyperlink(&mut self);
    fn process_regis(&mut self, commands: &str);
}

/// Cursor motion, tab stops and index operations
pub trait CursorControl {
    fn backspace(&mut self);
    fn tab(&mut self);
    fn line_feed(&mut self);
    fn form_feed(&mut self);
    fn carriage_return(&mut self);
    fn cursor_up(&mut self, n: u16);
    fn cursor_down(&mut self, n: u16);
    fn cursor_forward(&mut self, n: u16);
    fn cursor_backward(&mut self, n: u16);
    fn cursor_next_line(&mut self, n: u16);
    fn cursor_previous_line(&mut self, n: u16);
    /// 1-based column
    fn cursor_horizontal_absolute(&mut self, col: u16);
    /// 1-based row and column
    fn cursor_position(&mut self, row: u16, col: u16);
    fn character_position_relative(&mut self, n: u16);
    /// 1-based row
    fn line_position_absolute(&mut self, row: u16);
    fn line_position_relative(&mut self, n: u16);
    fn forward_tabulation(&mut self, n: u16);
    fn backward_tabulation(&mut self, n: u16);
    fn clear_tab_stop(&mut self, clear: TabClear);
    fn set_tab_stop(&mut self);
    fn save_cursor(&mut self);
    fn restore_cursor(&mut self);
    fn save_cursor_position(&mut self);
    fn restore_cursor_position(&mut self);
    fn index(&mut self);
    fn reverse_index(&mut self);
    fn next_line(&mut self);
}

pub trait EraseControl {
    fn erase_in_display(&mut self, mode: EraseInDisplayMode, selective: bool);
    fn erase_in_line(&mut self, mode: EraseInLineMode, selective: bool);
    fn erase_characters(&mut self, n: u16);
    fn insert_characters(&mut self, n: u16);
    fn delete_characters(&mut self, n: u16);
    fn insert_lines(&mut self, n: u16);
    fn delete_lines(&mut self, n: u16);
    fn scroll_up(&mut self, n: u16);
    fn scroll_down(&mut self, n: u16);
    fn repeat_preceding_character(&mut self, n: u16);
    fn screen_alignment_test(&mut self);
}

pub trait ModeControl {
    fn set_mode(&mut self, mode: AnsiMode);
    fn reset_mode(&mut self, mode: AnsiMode);
    fn set_dec_private_mode(&mut self, mode: DecPrivateMode);
    fn reset_dec_private_mode(&mut self, mode: DecPrivateMode);
    /// `bottom: None` means the last line of the screen
    fn set_scrolling_region(&mut self, top: u16, bottom: Option<u16>);
    fn set_cursor_style(&mut self, blinking: bool, shape: CaretShape);
    fn set_keypad_application_mode(&mut self);
    fn set_keypad_numeric_mode(&mut self);
    fn single_shift(&mut self, slot: CharsetSlot);
    fn designate_charset(&mut self, slot: CharsetSlot, charset: char);
    fn set_line_attribute(&mut self, attribute: LineAttribute);
    fn full_reset(&mut self);
    fn soft_reset(&mut self);
    fn set_conformance_level(&mut self, level: u16, eight_bit_controls: bool);
    fn select_character_protection(&mut self, attributes: &str);
}

/// Rendition attributes, palette and dynamic colors
pub trait ColorControl {
    fn select_graphic_rendition(&mut self, attribute: SgrAttribute);
    fn set_palette_color(&mut self, index: u8, spec: &str);
    fn query_palette_color(&mut self, index: u8);
    /// An empty slice resets the whole palette
    fn reset_palette_colors(&mut self, indices: &[u8]);
    fn set_special_color(&mut self, index: u16, spec: &str);
    fn query_special_color(&mut self, index: u16);
    fn reset_special_color(&mut self, index: Option<u16>);
    fn enable_special_color(&mut self, index: u16, enabled: bool);
    fn set_dynamic_color(&mut self, color: DynamicColor, spec: &str);
    fn query_dynamic_color(&mut self, color: DynamicColor);
    fn reset_dynamic_color(&mut self, color: DynamicColor);
}

pub trait WindowControl {
    fn set_window_title(&mut self, title: &str);
    fn set_icon_name(&mut self, name: &str);
    fn set_x_property(&mut self, name: &str, value: Option<&str>);
    fn set_current_directory(&mut self, url: &str);
    fn notify(&mut self, message: &str);
    fn set_log_file(&mut self, path: &str);
    fn set_font(&mut self, font: &str);
    fn set_emoji_font(&mut self, font: &str);
    fn window_manipulation(&mut self, op: &WindowOp);
}

/// Requests the terminal answers on the input side
pub trait ReportControl {
    fn device_attributes(&mut self, kind: DeviceAttributes);
    fn device_status_report(&mut self, report: DeviceStatusReport);
    fn request_mode(&mut self, mode: u16, private: bool);
    fn request_terminal_parameters(&mut self, n: u16);
    fn select_locator_events(&mut self, events: &[u16]);
    fn request_locator_position(&mut self, n: u16);
    fn request_status_string(&mut self, request: StatusStringRequest);
    fn request_terminfo(&mut self, names: &[String]);
    fn report_cursor_information(&mut self, report: &str);
    fn restore_presentation_state(&mut self, state: &str);
}

pub trait ClipboardControl {
    /// `data` is already base64-decoded
    fn set_selection_data(&mut self, clipboard: &str, data: &[u8]);
    fn query_selection_data(&mut self, clipboard: &str);
}

pub trait KeyProgramming {
    fn program_function_key(&mut self, key: &str, string: &str);
    fn program_key_action(&mut self, key: &str, action: &str);
    fn define_user_keys(&mut self, clear: u16, definitions: &[String]);
}

/// Owner of terminal state. Every group defaults to "not implemented".
pub trait ActionTarget {
    fn output(&mut self) -> Option<&mut dyn OutputControl> {
        None
    }
    fn cursor(&mut self) -> Option<&mut dyn CursorControl> {
        None
    }
    fn erase(&mut self) -> Option<&mut dyn EraseControl> {
        None
    }
    fn mode(&mut self) -> Option<&mut dyn ModeControl> {
        None
    }
    fn color(&mut self) -> Option<&mut dyn ColorControl> {
        None
    }
    fn window(&mut self) -> Option<&mut dyn WindowControl> {
        None
    }
    fn report(&mut self) -> Option<&mut dyn ReportControl> {
        None
    }
    fn clipboard(&mut self) -> Option<&mut dyn ClipboardControl> {
        None
    }
    fn key_programming(&mut self) -> Option<&mut dyn KeyProgramming> {
        None
    }
}

fn apply<G: ?Sized>(group: Option<&mut G>, f: impl FnOnce(&mut G)) -> bool {
    match group {
        Some(group) => {
            f(group);
            true
        }
        None => false,
    }
}

/// Applies `action` to its capability group on `target`.
///
/// Returns `false` when the target does not implement that group.
pub fn route(action: &Action, target: &mut dyn ActionTarget) -> bool {
    let routed = match action {
        Action::Print(text) => apply(target.output(), |g| g.print(text)),
        Action::Bell => apply(target.output(), |g| g.bell()),
        Action::SetHyperlink { params, uri } => apply(target.output(), |g| g.set_hyperlink(params, uri)),
        Action::ClearHyperlink => apply(target.output(), |g| g.clear_hyperlink()),
        Action::ProcessRegis(commands) => apply(target.output(), |g| g.process_regis(commands)),

        Action::Backspace => apply(target.cursor(), |g| g.backspace()),
        Action::Tab => apply(target.cursor(), |g| g.tab()),
        Action::LineFeed => apply(target.cursor(), |g| g.line_feed()),
        Action::FormFeed => apply(target.cursor(), |g| g.form_feed()),
        Action::CarriageReturn => apply(target.cursor(), |g| g.carriage_return()),
        Action::CursorUp(n) => apply(target.cursor(), |g| g.cursor_up(*n)),
        Action::CursorDown(n) => apply(target.cursor(), |g| g.cursor_down(*n)),
        Action::CursorForward(n) => apply(target.cursor(), |g| g.cursor_forward(*n)),
        Action::CursorBackward(n) => apply(target.cursor(), |g| g.cursor_backward(*n)),
        Action::CursorNextLine(n) => apply(target.cursor(), |g| g.cursor_next_line(*n)),
        Action::CursorPreviousLine(n) => apply(target.cursor(), |g| g.cursor_previous_line(*n)),
        Action::CursorHorizontalAbsolute(col) => apply(target.cursor(), |g| g.cursor_horizontal_absolute(*col)),
        Action::CursorPosition { row, col } => apply(target.cursor(), |g| g.cursor_position(*row, *col)),
        Action::CharacterPositionRelative(n) => apply(target.cursor(), |g| g.character_position_relative(*n)),
        Action::LinePositionAbsolute(row) => apply(target.cursor(), |g| g.line_position_absolute(*row)),
        Action::LinePositionRelative(n) => apply(target.cursor(), |g| g.line_position_relative(*n)),
        Action::CursorForwardTabulation(n) => apply(target.cursor(), |g| g.forward_tabulation(*n)),
        Action::CursorBackwardTabulation(n) => apply(target.cursor(), |g| g.backward_tabulation(*n)),
        Action::ClearTabStop(clear) => apply(target.cursor(), |g| g.clear_tab_stop(*clear)),
        Action::SetTabStop => apply(target.cursor(), |g| g.set_tab_stop()),
        Action::SaveCursor => apply(target.cursor(), |g| g.save_cursor()),
        Action::RestoreCursor => apply(target.cursor(), |g| g.restore_cursor()),
        Action::SaveCursorPosition => apply(target.cursor(), |g| g.save_cursor_position()),
        Action::RestoreCursorPosition => apply(target.cursor(), |g| g.restore_cursor_position()),
        Action::Index => apply(target.cursor(), |g| g.index()),
        Action::ReverseIndex => apply(target.cursor(), |g| g.reverse_index()),
        Action::NextLine => apply(target.cursor(), |g| g.next_line()),

        Action::EraseInDisplay { mode, selective } => apply(target.erase(), |g| g.erase_in_display(*mode, *selective)),
        Action::EraseInLine { mode, selective } => apply(target.erase(), |g| g.erase_in_line(*mode, *selective)),
        Action::EraseCharacters(n) => apply(target.erase(), |g| g.erase_characters(*n)),
        Action::InsertCharacters(n) => apply(target.erase(), |g| g.insert_characters(*n)),
        Action::DeleteCharacters(n) => apply(target.erase(), |g| g.delete_characters(*n)),
        Action::InsertLines(n) => apply(target.erase(), |g| g.insert_lines(*n)),
        Action::DeleteLines(n) => apply(target.erase(), |g| g.delete_lines(*n)),
        Action::ScrollUp(n) => apply(target.erase(), |g| g.scroll_up(*n)),
        Action::ScrollDown(n) => apply(target.erase(), |g| g.scroll_down(*n)),
        Action::RepeatPrecedingCharacter(n) => apply(target.erase(), |g| g.repeat_preceding_character(*n)),
        Action::ScreenAlignmentTest => apply(target.erase(), |g| g.screen_alignment_test()),

        Action::SetMode(mode) => apply(target.mode(), |g| g.set_mode(*mode)),
        Action::ResetMode(mode) => apply(target.mode(), |g| g.reset_mode(*mode)),
        Action::SetDecPrivateMode(mode) => apply(target.mode(), |g| g.set_dec_private_mode(*mode)),
        Action::ResetDecPrivateMode(mode) => apply(target.mode(), |g| g.reset_dec_private_mode(*mode)),
        Action::SetScrollingRegion { top, bottom } => apply(target.mode(), |g| g.set_scrolling_region(*top, *bottom)),
        Action::SetCursorStyle { blinking, shape } => apply(target.mode(), |g| g.set_cursor_style(*blinking, *shape)),
        Action::SetKeypadApplicationMode => apply(target.mode(), |g| g.set_keypad_application_mode()),
        Action::SetKeypadNumericMode => apply(target.mode(), |g| g.set_keypad_numeric_mode()),
        Action::SingleShift(slot) => apply(target.mode(), |g| g.single_shift(*slot)),
        Action::DesignateCharset { slot, charset } => apply(target.mode(), |g| g.designate_charset(*slot, *charset)),
        Action::SetLineAttribute(attribute) => apply(target.mode(), |g| g.set_line_attribute(*attribute)),
        Action::FullReset => apply(target.mode(), |g| g.full_reset()),
        Action::SoftReset => apply(target.mode(), |g| g.soft_reset()),
        Action::SetConformanceLevel { level, eight_bit_controls } => apply(target.mode(), |g| g.set_conformance_level(*level, *eight_bit_controls)),
        Action::SelectCharacterProtection(attributes) => apply(target.mode(), |g| g.select_character_protection(attributes)),

        Action::SelectGraphicRendition(attribute) => apply(target.color(), |g| g.select_graphic_rendition(*attribute)),
        Action::SetPaletteColor { index, spec } => apply(target.color(), |g| g.set_palette_color(*index, spec)),
        Action::QueryPaletteColor(index) => apply(target.color(), |g| g.query_palette_color(*index)),
        Action::ResetPaletteColors(indices) => apply(target.color(), |g| g.reset_palette_colors(indices)),
        Action::SetSpecialColor { index, spec } => apply(target.color(), |g| g.set_special_color(*index, spec)),
        Action::QuerySpecialColor(index) => apply(target.color(), |g| g.query_special_color(*index)),
        Action::ResetSpecialColor(index) => apply(target.color(), |g| g.reset_special_color(*index)),
        Action::EnableSpecialColor { index, enabled } => apply(target.color(), |g| g.enable_special_color(*index, *enabled)),
        Action::SetDynamicColor(color, spec) => apply(target.color(), |g| g.set_dynamic_color(*color, spec)),
        Action::QueryDynamicColor(color) => apply(target.color(), |g| g.query_dynamic_color(*color)),
        Action::ResetDynamicColor(color) => apply(target.color(), |g| g.reset_dynamic_color(*color)),

        Action::SetWindowTitle(title) => apply(target.window(), |g| g.set_window_title(title)),
        Action::SetIconName(name) => apply(target.window(), |g| g.set_icon_name(name)),
        Action::SetXProperty { name, value } => apply(target.window(), |g| g.set_x_property(name, value.as_deref())),
        Action::SetCurrentDirectory(url) => apply(target.window(), |g| g.set_current_directory(url)),
        Action::Notification(message) => apply(target.window(), |g| g.notify(message)),
        Action::SetLogFile(path) => apply(target.window(), |g| g.set_log_file(path)),
        Action::SetFont(font) => apply(target.window(), |g| g.set_font(font)),
        Action::SetEmojiFont(font) => apply(target.window(), |g| g.set_emoji_font(font)),
        Action::WindowManipulation(op) => apply(target.window(), |g| g.window_manipulation(op)),

        Action::DeviceAttributes(kind) => apply(target.report(), |g| g.device_attributes(*kind)),
        Action::DeviceStatusReport(report) => apply(target.report(), |g| g.device_status_report(*report)),
        Action::RequestMode { mode, private } => apply(target.report(), |g| g.request_mode(*mode, *private)),
        Action::RequestTerminalParameters(n) => apply(target.report(), |g| g.request_terminal_parameters(*n)),
        Action::SelectLocatorEvents(events) => apply(target.report(), |g| g.select_locator_events(events)),
        Action::RequestLocatorPosition(n) => apply(target.report(), |g| g.request_locator_position(*n)),
        Action::RequestStatusString(request) => apply(target.report(), |g| g.request_status_string(*request)),
        Action::RequestTerminfo(names) => apply(target.report(), |g| g.request_terminfo(names)),
        Action::ReportCursorInformation(report) => apply(target.report(), |g| g.report_cursor_information(report)),
        Action::RestorePresentationState(state) => apply(target.report(), |g| g.restore_presentation_state(state)),

        Action::SetSelectionData { clipboard, data } => apply(target.clipboard(), |g| g.set_selection_data(clipboard, data)),
        Action::QuerySelectionData(clipboard) => apply(target.clipboard(), |g| g.query_selection_data(clipboard)),

        Action::ProgramFunctionKey { key, string } => apply(target.key_programming(), |g| g.program_function_key(key, string)),
        Action::ProgramKeyAction { key, action } => apply(target.key_programming(), |g| g.program_key_action(key, action)),
        Action::DefineUserKeys { clear, definitions } => apply(target.key_programming(), |g| g.define_user_keys(*clear, definitions)),
    };

    if !routed {
        log::trace!("{:?} capability not implemented, dropping {:?}", action.capability(), action);
    }
    routed
}
