//! Reference state owner.
//!
//! `Transcript` implements every capability group with a small
//! screen model: a growing list of lines, a cursor and tab stops. Everything
//! that is not text is recorded as plain state, and requests that need an
//! answer on the input side append the reply to [`Transcript::replies`].

use std::collections::{BTreeMap, BTreeSet};

use base64::{Engine as _, engine::general_purpose};
use mono_parser_core::{
    ActionTarget, AnsiMode, CaretShape, CharsetSlot, ClipboardControl, ColorControl, CursorControl, DecPrivateMode, DeviceAttributes, DeviceStatusReport,
    DynamicColor, EraseControl, EraseInDisplayMode, EraseInLineMode, KeyProgramming, LineAttribute, ModeControl, OutputControl, ReportControl, SgrAttribute,
    StatusStringRequest, TabClear, WindowControl, WindowOp,
};

pub const ROWS: u16 = 24;
pub const COLUMNS: u16 = 80;
const TAB_WIDTH: usize = 8;
/// Lines kept in the transcript. Older lines are dropped from the top.
pub const SCROLLBACK_LINES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorStyle {
    pub blinking: bool,
    pub shape: CaretShape,
}

impl Default for CursorStyle {
    fn default() -> Self {
        Self {
            blinking: true,
            shape: CaretShape::Block,
        }
    }
}

impl CursorStyle {
    /// DECSCUSR parameter
    fn to_decscusr(&self) -> u16 {
        let base = match self.shape {
            CaretShape::Block => 1,
            CaretShape::Underline => 3,
            CaretShape::Bar => 5,
        };
        if self.blinking { base } else { base + 1 }
    }
}

#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<Vec<char>>,
    row: usize,
    col: usize,
    saved_cursor: Option<(usize, usize)>,
    last_char: Option<char>,
    /// `None` means a stop every eight columns
    tab_stops: Option<BTreeSet<usize>>,

    // output
    pub bells: usize,
    pub hyperlink: Option<String>,
    pub regis: Vec<String>,

    // modes
    ansi_modes: BTreeSet<u16>,
    dec_modes: BTreeSet<u16>,
    pub scrolling_region: Option<(u16, Option<u16>)>,
    pub cursor_style: CursorStyle,
    pub keypad_application: bool,
    pub charsets: [Option<char>; 4],
    pub single_shift: Option<CharsetSlot>,
    pub line_attributes: BTreeMap<usize, LineAttribute>,
    pub conformance_level: Option<(u16, bool)>,
    pub character_protection: Option<String>,

    // colors
    pub sgr_log: Vec<SgrAttribute>,
    pub palette: BTreeMap<u8, String>,
    pub special_colors: BTreeMap<u16, String>,
    pub disabled_special_colors: BTreeSet<u16>,
    pub dynamic_colors: BTreeMap<u16, String>,

    // window
    pub title: Option<String>,
    pub icon_name: Option<String>,
    title_stack: Vec<String>,
    pub x_properties: BTreeMap<String, String>,
    pub cwd: Option<String>,
    pub notifications: Vec<String>,
    pub log_file: Option<String>,
    pub font: Option<String>,
    pub emoji_font: Option<String>,
    pub window_ops: Vec<WindowOp>,

    // reports
    pub locator_events: Vec<u16>,
    pub cursor_information: Option<String>,
    pub presentation_state: Option<String>,
    /// Answers the terminal would write back to the program
    pub replies: Vec<String>,

    pub clipboard: BTreeMap<String, Vec<u8>>,

    pub function_keys: BTreeMap<String, String>,
    pub key_actions: BTreeMap<String, String>,
    pub user_keys: BTreeMap<String, String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen text, trailing blanks of every line trimmed.
    pub fn text(&self) -> String {
        let lines: Vec<String> = self.lines.iter().map(|line| line.iter().collect::<String>().trim_end().to_string()).collect();
        lines.join("\n")
    }

    /// 0-based row and column
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn is_ansi_mode_set(&self, mode: AnsiMode) -> bool {
        self.ansi_modes.contains(&(mode as u16))
    }

    pub fn is_dec_mode_set(&self, mode: DecPrivateMode) -> bool {
        self.dec_modes.contains(&(mode as u16))
    }

    fn line_mut(&mut self) -> &mut Vec<char> {
        if self.lines.len() <= self.row {
            self.lines.resize_with(self.row + 1, Vec::new);
        }
        &mut self.lines[self.row]
    }

    fn put_char(&mut self, ch: char) {
        let col = self.col;
        let insert = self.is_ansi_mode_set(AnsiMode::InsertReplace);
        let line = self.line_mut();
        if line.len() < col {
            line.resize(col, ' ');
        }
        if insert || col == line.len() {
            line.insert(col, ch);
        } else {
            line[col] = ch;
        }
        self.col += 1;
        self.last_char = Some(ch);
    }

    fn next_tab_stop(&self) -> usize {
        match &self.tab_stops {
            Some(stops) => stops.range(self.col + 1..).next().copied().unwrap_or(usize::from(COLUMNS) - 1).max(self.col),
            None => (self.col / TAB_WIDTH + 1) * TAB_WIDTH,
        }
    }

    fn previous_tab_stop(&self) -> usize {
        match &self.tab_stops {
            Some(stops) => stops.range(..self.col).next_back().copied().unwrap_or(0),
            None => self.col.saturating_sub(1) / TAB_WIDTH * TAB_WIDTH,
        }
    }

    fn advance_rows(&mut self, n: usize) {
        self.row += n;
        if self.row < SCROLLBACK_LINES {
            return;
        }
        let excess = self.row + 1 - SCROLLBACK_LINES;
        self.lines.drain(..excess.min(self.lines.len()));
        self.row -= excess;
        self.saved_cursor = self.saved_cursor.map(|(row, col)| (row.saturating_sub(excess), col));
        self.line_attributes = std::mem::take(&mut self.line_attributes)
            .into_iter()
            .filter_map(|(row, attribute)| Some((row.checked_sub(excess)?, attribute)))
            .collect();
    }

    fn reply(&mut self, reply: String) {
        log::trace!("reply {reply:?}");
        self.replies.push(reply);
    }
}

impl OutputControl for Transcript {
    fn print(&mut self, text: &str) {
        for ch in text.chars() {
            self.put_char(ch);
        }
    }

    fn bell(&mut self) {
        self.bells += 1;
    }

    fn set_hyperlink(&mut self, _params: &BTreeMap<String, String>, uri: &str) {
        self.hyperlink = Some(uri.to_string());
    }

    fn clear_hyperlink(&mut self) {
        self.hyperlink = None;
    }

    fn process_regis(&mut self, commands: &str) {
        self.regis.push(commands.to_string());
    }
}

impl CursorControl for Transcript {
    fn backspace(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    fn tab(&mut self) {
        self.col = self.next_tab_stop();
    }

    fn line_feed(&mut self) {
        self.advance_rows(1);
        if self.is_ansi_mode_set(AnsiMode::AutomaticNewline) {
            self.col = 0;
        }
    }

    fn form_feed(&mut self) {
        self.line_feed();
    }

    fn carriage_return(&mut self) {
        self.col = 0;
    }

    fn cursor_up(&mut self, n: u16) {
        self.row = self.row.saturating_sub(usize::from(n));
    }

    fn cursor_down(&mut self, n: u16) {
        self.advance_rows(usize::from(n));
    }

    fn cursor_forward(&mut self, n: u16) {
        self.col += usize::from(n);
    }

    fn cursor_backward(&mut self, n: u16) {
        self.col = self.col.saturating_sub(usize::from(n));
    }

    fn cursor_next_line(&mut self, n: u16) {
        self.cursor_down(n);
        self.col = 0;
    }

    fn cursor_previous_line(&mut self, n: u16) {
        self.cursor_up(n);
        self.col = 0;
    }

    fn cursor_horizontal_absolute(&mut self, col: u16) {
        self.col = usize::from(col.saturating_sub(1));
    }

    fn cursor_position(&mut self, row: u16, col: u16) {
        self.row = usize::from(row.saturating_sub(1));
        self.col = usize::from(col.saturating_sub(1));
    }

    fn character_position_relative(&mut self, n: u16) {
        self.cursor_forward(n);
    }

    fn line_position_absolute(&mut self, row: u16) {
        self.row = usize::from(row.saturating_sub(1));
    }

    fn line_position_relative(&mut self, n: u16) {
        self.cursor_down(n);
    }

    fn forward_tabulation(&mut self, n: u16) {
        for _ in 0..n {
            self.tab();
        }
    }

    fn backward_tabulation(&mut self, n: u16) {
        for _ in 0..n {
            self.col = self.previous_tab_stop();
        }
    }

    fn clear_tab_stop(&mut self, clear: TabClear) {
        match clear {
            TabClear::CurrentColumn => {
                let col = self.col;
                let stops = self
                    .tab_stops
                    .get_or_insert_with(|| (TAB_WIDTH..usize::from(COLUMNS)).step_by(TAB_WIDTH).collect());
                stops.remove(&col);
            }
            TabClear::All => self.tab_stops = Some(BTreeSet::new()),
        }
    }

    fn set_tab_stop(&mut self) {
        let col = self.col;
        self.tab_stops
            .get_or_insert_with(|| (TAB_WIDTH..usize::from(COLUMNS)).step_by(TAB_WIDTH).collect())
            .insert(col);
    }

    fn save_cursor(&mut self) {
        self.saved_cursor = Some((self.row, self.col));
    }

    fn restore_cursor(&mut self) {
        if let Some((row, col)) = self.saved_cursor {
            self.row = row;
            self.col = col;
        }
    }

    fn save_cursor_position(&mut self) {
        self.save_cursor();
    }

    fn restore_cursor_position(&mut self) {
        self.restore_cursor();
    }

    fn index(&mut self) {
        self.advance_rows(1);
    }

    fn reverse_index(&mut self) {
        if self.row == 0 {
            self.lines.insert(0, Vec::new());
            self.lines.truncate(SCROLLBACK_LINES);
        } else {
            self.row -= 1;
        }
    }

    fn next_line(&mut self) {
        self.advance_rows(1);
        self.col = 0;
    }
}

impl EraseControl for Transcript {
    fn erase_in_display(&mut self, mode: EraseInDisplayMode, _selective: bool) {
        match mode {
            EraseInDisplayMode::CursorToEnd => {
                let (row, col) = (self.row, self.col);
                if let Some(line) = self.lines.get_mut(row) {
                    line.truncate(col);
                }
                self.lines.truncate(row + 1);
            }
            EraseInDisplayMode::StartToCursor => {
                for line in self.lines.iter_mut().take(self.row) {
                    line.clear();
                }
                self.erase_in_line(EraseInLineMode::StartToCursor, false);
            }
            EraseInDisplayMode::All | EraseInDisplayMode::AllAndScrollback => self.lines.clear(),
        }
    }

    fn erase_in_line(&mut self, mode: EraseInLineMode, _selective: bool) {
        let col = self.col;
        let Some(line) = self.lines.get_mut(self.row) else {
            return;
        };
        match mode {
            EraseInLineMode::CursorToEnd => line.truncate(col),
            EraseInLineMode::StartToCursor => {
                let end = (col + 1).min(line.len());
                line[..end].fill(' ');
            }
            EraseInLineMode::All => line.clear(),
        }
    }

    fn erase_characters(&mut self, n: u16) {
        let col = self.col;
        if let Some(line) = self.lines.get_mut(self.row) {
            let end = (col + usize::from(n)).min(line.len());
            if col < end {
                line[col..end].fill(' ');
            }
        }
    }

    fn insert_characters(&mut self, n: u16) {
        let col = self.col;
        if let Some(line) = self.lines.get_mut(self.row) {
            if col <= line.len() {
                line.splice(col..col, std::iter::repeat_n(' ', usize::from(n)));
            }
        }
    }

    fn delete_characters(&mut self, n: u16) {
        let col = self.col;
        if let Some(line) = self.lines.get_mut(self.row) {
            let end = (col + usize::from(n)).min(line.len());
            if col < end {
                line.drain(col..end);
            }
        }
    }

    fn insert_lines(&mut self, n: u16) {
        if self.row <= self.lines.len() {
            let row = self.row;
            self.lines.splice(row..row, std::iter::repeat_n(Vec::new(), usize::from(n)));
            self.lines.truncate(SCROLLBACK_LINES);
        }
    }

    fn delete_lines(&mut self, n: u16) {
        let end = (self.row + usize::from(n)).min(self.lines.len());
        if self.row < end {
            self.lines.drain(self.row..end);
        }
    }

    fn scroll_up(&mut self, n: u16) {
        let end = usize::from(n).min(self.lines.len());
        self.lines.drain(..end);
    }

    fn scroll_down(&mut self, n: u16) {
        self.lines.splice(0..0, std::iter::repeat_n(Vec::new(), usize::from(n)));
    }

    fn repeat_preceding_character(&mut self, n: u16) {
        if let Some(ch) = self.last_char {
            for _ in 0..n {
                self.put_char(ch);
            }
        }
    }

    fn screen_alignment_test(&mut self) {
        self.lines = vec![vec!['E'; usize::from(COLUMNS)]; usize::from(ROWS)];
        self.row = 0;
        self.col = 0;
    }
}

impl ModeControl for Transcript {
    fn set_mode(&mut self, mode: AnsiMode) {
        self.ansi_modes.insert(mode as u16);
    }

    fn reset_mode(&mut self, mode: AnsiMode) {
        self.ansi_modes.remove(&(mode as u16));
    }

    fn set_dec_private_mode(&mut self, mode: DecPrivateMode) {
        self.dec_modes.insert(mode as u16);
    }

    fn reset_dec_private_mode(&mut self, mode: DecPrivateMode) {
        self.dec_modes.remove(&(mode as u16));
    }

    fn set_scrolling_region(&mut self, top: u16, bottom: Option<u16>) {
        self.scrolling_region = Some((top, bottom));
        self.row = 0;
        self.col = 0;
    }

    fn set_cursor_style(&mut self, blinking: bool, shape: CaretShape) {
        self.cursor_style = CursorStyle { blinking, shape };
    }

    fn set_keypad_application_mode(&mut self) {
        self.keypad_application = true;
    }

    fn set_keypad_numeric_mode(&mut self) {
        self.keypad_application = false;
    }

    fn single_shift(&mut self, slot: CharsetSlot) {
        self.single_shift = Some(slot);
    }

    fn designate_charset(&mut self, slot: CharsetSlot, charset: char) {
        self.charsets[slot as usize] = Some(charset);
    }

    fn set_line_attribute(&mut self, attribute: LineAttribute) {
        self.line_attributes.insert(self.row, attribute);
    }

    fn full_reset(&mut self) {
        let replies = std::mem::take(&mut self.replies);
        *self = Self::default();
        self.replies = replies;
    }

    fn soft_reset(&mut self) {
        self.ansi_modes.clear();
        self.dec_modes.clear();
        self.scrolling_region = None;
        self.saved_cursor = None;
        self.keypad_application = false;
        self.charsets = [None; 4];
        self.single_shift = None;
        self.cursor_style = CursorStyle::default();
    }

    fn set_conformance_level(&mut self, level: u16, eight_bit_controls: bool) {
        self.conformance_level = Some((level, eight_bit_controls));
    }

    fn select_character_protection(&mut self, attributes: &str) {
        self.character_protection = Some(attributes.to_string());
    }
}

impl ColorControl for Transcript {
    fn select_graphic_rendition(&mut self, attribute: SgrAttribute) {
        self.sgr_log.push(attribute);
    }

    fn set_palette_color(&mut self, index: u8, spec: &str) {
        self.palette.insert(index, spec.to_string());
    }

    fn query_palette_color(&mut self, index: u8) {
        if let Some(spec) = self.palette.get(&index) {
            let reply = format!("\x1b]4;{index};{spec}\x1b\\");
            self.reply(reply);
        }
    }

    fn reset_palette_colors(&mut self, indices: &[u8]) {
        if indices.is_empty() {
            self.palette.clear();
        }
        for index in indices {
            self.palette.remove(index);
        }
    }

    fn set_special_color(&mut self, index: u16, spec: &str) {
        self.special_colors.insert(index, spec.to_string());
    }

    fn query_special_color(&mut self, index: u16) {
        if let Some(spec) = self.special_colors.get(&index) {
            let reply = format!("\x1b]5;{index};{spec}\x1b\\");
            self.reply(reply);
        }
    }

    fn reset_special_color(&mut self, index: Option<u16>) {
        match index {
            Some(index) => {
                self.special_colors.remove(&index);
            }
            None => self.special_colors.clear(),
        }
    }

    fn enable_special_color(&mut self, index: u16, enabled: bool) {
        if enabled {
            self.disabled_special_colors.remove(&index);
        } else {
            self.disabled_special_colors.insert(index);
        }
    }

    fn set_dynamic_color(&mut self, color: DynamicColor, spec: &str) {
        self.dynamic_colors.insert(color as u16, spec.to_string());
    }

    fn query_dynamic_color(&mut self, color: DynamicColor) {
        let code = color as u16;
        if let Some(spec) = self.dynamic_colors.get(&code) {
            let reply = format!("\x1b]{code};{spec}\x1b\\");
            self.reply(reply);
        }
    }

    fn reset_dynamic_color(&mut self, color: DynamicColor) {
        self.dynamic_colors.remove(&(color as u16));
    }
}

impl WindowControl for Transcript {
    fn set_window_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn set_icon_name(&mut self, name: &str) {
        self.icon_name = Some(name.to_string());
    }

    fn set_x_property(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.x_properties.insert(name.to_string(), value.to_string());
            }
            None => {
                self.x_properties.remove(name);
            }
        }
    }

    fn set_current_directory(&mut self, url: &str) {
        self.cwd = Some(url.to_string());
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }

    fn set_log_file(&mut self, path: &str) {
        self.log_file = Some(path.to_string());
    }

    fn set_font(&mut self, font: &str) {
        self.font = Some(font.to_string());
    }

    fn set_emoji_font(&mut self, font: &str) {
        self.emoji_font = Some(font.to_string());
    }

    fn window_manipulation(&mut self, op: &WindowOp) {
        match op {
            WindowOp::PushTitle => {
                let title = self.title.clone().unwrap_or_default();
                self.title_stack.push(title);
            }
            WindowOp::PopTitle => {
                if let Some(title) = self.title_stack.pop() {
                    self.title = Some(title);
                }
            }
            WindowOp::ReportTitle => {
                let reply = format!("\x1b]l{}\x1b\\", self.title.as_deref().unwrap_or_default());
                self.reply(reply);
            }
            WindowOp::ReportIconLabel => {
                let reply = format!("\x1b]L{}\x1b\\", self.icon_name.as_deref().unwrap_or_default());
                self.reply(reply);
            }
            WindowOp::ReportSizeChars | WindowOp::ReportScreenSizeChars => {
                let code = if matches!(op, WindowOp::ReportSizeChars) { 8 } else { 9 };
                self.reply(format!("\x1b[{code};{ROWS};{COLUMNS}t"));
            }
            WindowOp::ReportState => self.reply("\x1b[1t".to_string()),
            _ => {}
        }
        self.window_ops.push(op.clone());
    }
}

impl ReportControl for Transcript {
    fn device_attributes(&mut self, kind: DeviceAttributes) {
        let reply = match kind {
            // VT220 with ANSI color
            DeviceAttributes::Primary => "\x1b[?62;22c",
            DeviceAttributes::Secondary => "\x1b[>1;10;0c",
            DeviceAttributes::Tertiary => "\x1bP!|00000000\x1b\\",
        };
        self.reply(reply.to_string());
    }

    fn device_status_report(&mut self, report: DeviceStatusReport) {
        let (row, col) = (self.row + 1, self.col + 1);
        let reply = match report {
            DeviceStatusReport::OperatingStatus => "\x1b[0n".to_string(),
            DeviceStatusReport::CursorPosition => format!("\x1b[{row};{col}R"),
            DeviceStatusReport::ExtendedCursorPosition => format!("\x1b[?{row};{col};1R"),
            // no printer
            DeviceStatusReport::PrinterStatus => "\x1b[?13n".to_string(),
            DeviceStatusReport::UserDefinedKeys => "\x1b[?20n".to_string(),
            DeviceStatusReport::Keyboard => "\x1b[?27;1;0;0n".to_string(),
        };
        self.reply(reply);
    }

    fn request_mode(&mut self, mode: u16, private: bool) {
        let set = if private { self.dec_modes.contains(&mode) } else { self.ansi_modes.contains(&mode) };
        let status = if set { 1 } else { 2 };
        let marker = if private { "?" } else { "" };
        self.reply(format!("\x1b[{marker}{mode};{status}$y"));
    }

    fn request_terminal_parameters(&mut self, n: u16) {
        // no parity, 8 bits, 38400 baud
        self.reply(format!("\x1b[{};1;1;128;128;1;0x", n.saturating_add(2)));
    }

    fn select_locator_events(&mut self, events: &[u16]) {
        self.locator_events = events.to_vec();
    }

    fn request_locator_position(&mut self, _n: u16) {
        // locator unavailable
        self.reply("\x1b[0&w".to_string());
    }

    fn request_status_string(&mut self, request: StatusStringRequest) {
        let setting = match request {
            StatusStringRequest::GraphicRendition => "0m".to_string(),
            StatusStringRequest::Margins => {
                let (top, bottom) = self.scrolling_region.unwrap_or((1, None));
                format!("{top};{}r", bottom.unwrap_or(ROWS))
            }
            StatusStringRequest::CursorStyle => format!("{} q", self.cursor_style.to_decscusr()),
            StatusStringRequest::ConformanceLevel => {
                let (level, eight_bit) = self.conformance_level.unwrap_or((65, false));
                format!("{level};{}\"p", if eight_bit { 0 } else { 1 })
            }
        };
        self.reply(format!("\x1bP1$r{setting}\x1b\\"));
    }

    fn request_terminfo(&mut self, names: &[String]) {
        for name in names {
            let value = match name.as_str() {
                "TN" | "name" => Some("mono"),
                "Co" | "colors" => Some("256"),
                _ => None,
            };
            let reply = match value {
                Some(value) => format!("\x1bP1+r{}={}\x1b\\", encode_hex(name), encode_hex(value)),
                None => "\x1bP0+r\x1b\\".to_string(),
            };
            self.reply(reply);
        }
    }

    fn report_cursor_information(&mut self, report: &str) {
        self.cursor_information = Some(report.to_string());
    }

    fn restore_presentation_state(&mut self, state: &str) {
        self.presentation_state = Some(state.to_string());
    }
}

/// Selection xterm uses when OSC 52 names none
const DEFAULT_SELECTION: &str = "s0";

fn selection_name(clipboard: &str) -> &str {
    if clipboard.is_empty() { DEFAULT_SELECTION } else { clipboard }
}

impl ClipboardControl for Transcript {
    fn set_selection_data(&mut self, clipboard: &str, data: &[u8]) {
        self.clipboard.insert(selection_name(clipboard).to_string(), data.to_vec());
    }

    fn query_selection_data(&mut self, clipboard: &str) {
        let clipboard = selection_name(clipboard);
        let data = self.clipboard.get(clipboard).map(|data| general_purpose::STANDARD.encode(data)).unwrap_or_default();
        self.reply(format!("\x1b]52;{clipboard};{data}\x1b\\"));
    }
}

impl KeyProgramming for Transcript {
    fn program_function_key(&mut self, key: &str, string: &str) {
        self.function_keys.insert(key.to_string(), string.to_string());
    }

    fn program_key_action(&mut self, key: &str, action: &str) {
        self.key_actions.insert(key.to_string(), action.to_string());
    }

    fn define_user_keys(&mut self, clear: u16, definitions: &[String]) {
        // Pc = 0 clears all keys before loading
        if clear == 0 {
            self.user_keys.clear();
        }
        for definition in definitions {
            match definition.split_once('/') {
                Some((key, value)) => {
                    self.user_keys.insert(key.to_string(), value.to_string());
                }
                None => log::debug!("DECUDK definition without '/': {definition}"),
            }
        }
    }
}

impl ActionTarget for Transcript {
    fn output(&mut self) -> Option<&mut dyn OutputControl> {
        Some(self)
    }
    fn cursor(&mut self) -> Option<&mut dyn CursorControl> {
        Some(self)
    }
    fn erase(&mut self) -> Option<&mut dyn EraseControl> {
        Some(self)
    }
    fn mode(&mut self) -> Option<&mut dyn ModeControl> {
        Some(self)
    }
    fn color(&mut self) -> Option<&mut dyn ColorControl> {
        Some(self)
    }
    fn window(&mut self) -> Option<&mut dyn WindowControl> {
        Some(self)
    }
    fn report(&mut self) -> Option<&mut dyn ReportControl> {
        Some(self)
    }
    fn clipboard(&mut self) -> Option<&mut dyn ClipboardControl> {
        Some(self)
    }
    fn key_programming(&mut self) -> Option<&mut dyn KeyProgramming> {
        Some(self)
    }
}

fn encode_hex(text: &str) -> String {
    text.bytes().map(|b| format!("{b:02X}")).collect()
}
