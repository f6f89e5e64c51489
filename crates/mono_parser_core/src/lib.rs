//! Terminal output interpreter: turns the character stream of a shell session
//! into an ordered list of typed [`Action`]s.
//!
//! The parser never applies anything itself. Every completed escape sequence is
//! handed to an [`ActionSink`]; the [`capabilities`] module routes actions to the
//! grouped interfaces implemented by whatever owns the terminal state.

use serde::Serialize;

mod action;
pub use action::{Action, Capability};

mod ansi;
pub use ansi::{OutputParser, ParserState};

pub mod capabilities;
pub use capabilities::{
    ActionTarget, ClipboardControl, ColorControl, CursorControl, EraseControl, KeyProgramming, ModeControl, OutputControl, ReportControl, WindowControl, route,
};

pub mod control_codes;

mod errors;
pub use errors::{ErrorLevel, ParseError, print_char_value};

mod params;
pub use params::ParamList;

mod sequence;
pub use sequence::{EscapeSequence, SequenceKind};

/// Erase in Display mode for ED command (ESC[nJ)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EraseInDisplayMode {
    /// Clear from cursor to end of display
    CursorToEnd = 0,
    /// Clear from start of display to cursor
    StartToCursor = 1,
    /// Clear entire display
    All = 2,
    /// Clear entire display and scrollback buffer
    AllAndScrollback = 3,
}

impl EraseInDisplayMode {
    fn from_u16(n: u16) -> Option<Self> {
        match n {
            0 => Some(Self::CursorToEnd),
            1 => Some(Self::StartToCursor),
            2 => Some(Self::All),
            3 => Some(Self::AllAndScrollback),
            _ => None,
        }
    }
}

/// Erase in Line mode for EL command (ESC[nK)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EraseInLineMode {
    /// Clear from cursor to end of line
    CursorToEnd = 0,
    /// Clear from start of line to cursor
    StartToCursor = 1,
    /// Clear entire line
    All = 2,
}

impl EraseInLineMode {
    fn from_u16(n: u16) -> Option<Self> {
        match n {
            0 => Some(Self::CursorToEnd),
            1 => Some(Self::StartToCursor),
            2 => Some(Self::All),
            _ => None,
        }
    }
}

/// Tabulation Clear target for TBC (ESC[ng)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TabClear {
    /// Clear the tab stop at the cursor column
    CurrentColumn = 0,
    /// Clear every tab stop
    All = 3,
}

impl TabClear {
    fn from_u16(n: u16) -> Option<Self> {
        match n {
            0 => Some(Self::CurrentColumn),
            3 => Some(Self::All),
            _ => None,
        }
    }
}

/// ANSI Mode for SM/RM commands (ESC[nh / ESC[nl)
/// Standard ANSI modes - distinct from DEC private modes (which use ESC[?nh)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnsiMode {
    /// KAM - Keyboard Action Mode (Mode 2)
    KeyboardAction = 2,
    /// IRM - Insert/Replace Mode (Mode 4)
    /// When set: newly received characters are inserted, pushing existing characters to the right
    /// When reset: newly received characters replace (overwrite) existing characters
    InsertReplace = 4,
    /// SRM - Send/Receive Mode (Mode 12), local echo
    SendReceive = 12,
    /// LNM - Automatic Newline (Mode 20)
    AutomaticNewline = 20,
}

impl AnsiMode {
    fn from_u16(n: u16) -> Option<Self> {
        match n {
            2 => Some(Self::KeyboardAction),
            4 => Some(Self::InsertReplace),
            12 => Some(Self::SendReceive),
            20 => Some(Self::AutomaticNewline),
            _ => None,
        }
    }
}

/// DEC Private Mode for DECSET/DECRST commands (ESC[?nh / ESC[?nl)
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecPrivateMode {
    /// DECCKM - Application Cursor Keys (Mode 1)
    CursorKeys = 1,
    /// DECANM - ANSI/VT52 Mode (Mode 2)
    Vt52 = 2,
    /// DECCOLM - 132 Column Mode (Mode 3)
    Column132 = 3,
    /// DECSCLM - Smooth Scroll (Mode 4)
    SmoothScroll = 4,
    /// DECSCNM - Reverse Video (Mode 5)
    ReverseVideo = 5,
    /// DECOM - Origin Mode (Mode 6)
    /// When set: cursor addressing is relative to scrolling region
    OriginMode = 6,
    /// DECAWM - Auto Wrap Mode (Mode 7)
    AutoWrap = 7,
    /// DECARM - Auto Repeat Keys (Mode 8)
    AutoRepeat = 8,
    /// X10 Mouse (Mode 9)
    X10Mouse = 9,
    /// att610 - Blinking Cursor (Mode 12)
    BlinkingCursor = 12,
    /// DECTCEM - Text Cursor Enable Mode (Mode 25)
    CursorVisible = 25,
    /// Reverse Wraparound (Mode 45)
    ReverseWraparound = 45,
    /// Alternate Screen Buffer (Mode 47)
    AlternateScreen = 47,
    /// DECLRMM - Left/Right Margin Mode (Mode 69)
    LeftRightMargin = 69,
    /// VT200 Mouse (Mode 1000)
    VT200Mouse = 1000,
    /// VT200 Highlight Mouse (Mode 1001)
    VT200HighlightMouse = 1001,
    /// Button Event Mouse (Mode 1002)
    ButtonEventMouse = 1002,
    /// Any Event Mouse (Mode 1003)
    AnyEventMouse = 1003,
    /// Focus Event (Mode 1004)
    FocusEvent = 1004,
    /// UTF-8 Extended Mouse Mode (Mode 1005)
    ExtendedMouseUTF8 = 1005,
    /// SGR Extended Mouse Mode (Mode 1006)
    ExtendedMouseSGR = 1006,
    /// Alternate Scroll (Mode 1007)
    AlternateScroll = 1007,
    /// URXVT Extended Mouse Mode (Mode 1015)
    ExtendedMouseURXVT = 1015,
    /// Pixel Position Mouse Mode (Mode 1016)
    ExtendedMousePixel = 1016,
    /// Alternate Screen Buffer, cleared on exit (Mode 1047)
    AlternateScreenClear = 1047,
    /// Save cursor as in DECSC (Mode 1048)
    SaveCursor = 1048,
    /// Save cursor and switch to a cleared alternate screen (Mode 1049)
    AlternateScreenSaveCursor = 1049,
    /// Bracketed Paste (Mode 2004)
    BracketedPaste = 2004,
    /// Synchronized Output (Mode 2026)
    SynchronizedOutput = 2026,
}

impl DecPrivateMode {
    fn from_u16(n: u16) -> Option<Self> {
        match n {
            1 => Some(Self::CursorKeys),
            2 => Some(Self::Vt52),
            3 => Some(Self::Column132),
            4 => Some(Self::SmoothScroll),
            5 => Some(Self::ReverseVideo),
            6 => Some(Self::OriginMode),
            7 => Some(Self::AutoWrap),
            8 => Some(Self::AutoRepeat),
            9 => Some(Self::X10Mouse),
            12 => Some(Self::BlinkingCursor),
            25 => Some(Self::CursorVisible),
            45 => Some(Self::ReverseWraparound),
            47 => Some(Self::AlternateScreen),
            69 => Some(Self::LeftRightMargin),
            1000 => Some(Self::VT200Mouse),
            1001 => Some(Self::VT200HighlightMouse),
            1002 => Some(Self::ButtonEventMouse),
            1003 => Some(Self::AnyEventMouse),
            1004 => Some(Self::FocusEvent),
            1005 => Some(Self::ExtendedMouseUTF8),
            1006 => Some(Self::ExtendedMouseSGR),
            1007 => Some(Self::AlternateScroll),
            1015 => Some(Self::ExtendedMouseURXVT),
            1016 => Some(Self::ExtendedMousePixel),
            1047 => Some(Self::AlternateScreenClear),
            1048 => Some(Self::SaveCursor),
            1049 => Some(Self::AlternateScreenSaveCursor),
            2004 => Some(Self::BracketedPaste),
            2026 => Some(Self::SynchronizedOutput),
            _ => None,
        }
    }
}

/// Color values for foreground and background SGR attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Color {
    /// Basic 8 colors, index 0-7 (SGR 30-37 / 40-47)
    Base(u8),
    /// Bright variants of the basic colors, index 0-7 (SGR 90-97 / 100-107)
    Bright(u8),
    /// 256-color palette index (SGR 38;5;n / 48;5;n)
    Extended(u8),
    /// Truecolor (SGR 38;2;r;g;b / 48;2;r;g;b)
    Rgb(u8, u8, u8),
    /// Default/terminal color
    Default,
}

/// Intensity level for text display
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intensity {
    /// Normal intensity (default)
    Normal,
    /// Bold or increased intensity
    Bold,
    /// Faint, decreased intensity or second color
    Faint,
}

/// Underline style for text
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Underline {
    Off,
    Single,
    Double,
}

/// Blink rate for text
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Blink {
    /// Not blinking (steady)
    Off,
    /// Slowly blinking (less than 150 per minute)
    Slow,
    /// Rapidly blinking (150 per minute or more)
    Rapid,
}

/// Frame or encircle style for text
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Frame {
    Off,
    Framed,
    Encircled,
}

/// SGR (Select Graphic Rendition) attributes for ESC[...m sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SgrAttribute {
    /// Reset all attributes to default
    Reset,

    /// Set text intensity (normal, bold, or faint)
    Intensity(Intensity),

    /// Italic text (true = italic, false = neither italic nor fraktur)
    Italic(bool),

    /// Fraktur (Gothic) font
    Fraktur,

    /// Underline style (off, single, or double)
    Underline(Underline),

    /// Crossed out / strike-through
    CrossedOut(bool),

    /// Blink rate (off, slow, or rapid)
    Blink(Blink),

    /// Inverse/reverse video
    Inverse(bool),
    /// Concealed/hidden
    Concealed(bool),

    /// Frame or encircle style (off, framed, or encircled)
    Frame(Frame),
    /// Overlined text
    Overlined(bool),

    /// Font selection (0 = primary/default, 1-9 = alternative fonts)
    Font(u8),

    /// Set foreground color
    Foreground(Color),
    /// Set background color
    Background(Color),

    // Ideogram attributes (60-65)
    IdeogramUnderline,
    IdeogramDoubleUnderline,
    IdeogramOverline,
    IdeogramDoubleOverline,
    IdeogramStress,
    IdeogramAttributesOff,
}

/// Caret (cursor) shape for DECSCUSR
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CaretShape {
    #[default]
    Block,
    Underline,
    Bar,
}

/// DEC line size attributes (ESC # 3 .. ESC # 6)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineAttribute {
    /// DECDHL top half
    DoubleHeightTop,
    /// DECDHL bottom half
    DoubleHeightBottom,
    /// DECSWL
    SingleWidth,
    /// DECDWL
    DoubleWidth,
}

/// Character set slot addressed by SCS designations and single shifts
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CharsetSlot {
    G0,
    G1,
    G2,
    G3,
}

/// Which device attribute report was requested (ESC[c, ESC[>c, ESC[=c)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceAttributes {
    Primary,
    Secondary,
    Tertiary,
}

/// Device Status Report type for DSR command (ESC[nn / ESC[?nn)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceStatusReport {
    /// Report operating status (reply: ESC[0n = OK)
    OperatingStatus,
    /// Report cursor position (reply: ESC[{row};{col}R)
    CursorPosition,
    /// DECXCPR - cursor position including page (ESC[?6n)
    ExtendedCursorPosition,
    /// Printer status (ESC[?15n)
    PrinterStatus,
    /// User defined key lock status (ESC[?25n)
    UserDefinedKeys,
    /// Keyboard language (ESC[?26n)
    Keyboard,
}

impl DeviceStatusReport {
    fn from_u16(n: u16, private: bool) -> Option<Self> {
        match (private, n) {
            (false, 5) => Some(Self::OperatingStatus),
            (false, 6) => Some(Self::CursorPosition),
            (true, 6) => Some(Self::ExtendedCursorPosition),
            (true, 15) => Some(Self::PrinterStatus),
            (true, 25) => Some(Self::UserDefinedKeys),
            (true, 26) => Some(Self::Keyboard),
            _ => None,
        }
    }
}

/// Dynamic colors addressed by OSC 10-19 and reset by OSC 110-119
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DynamicColor {
    Foreground = 10,
    Background = 11,
    Cursor = 12,
    MouseForeground = 13,
    MouseBackground = 14,
    TektronixForeground = 15,
    TektronixBackground = 16,
    HighlightBackground = 17,
    TektronixCursor = 18,
    HighlightForeground = 19,
}

impl DynamicColor {
    fn from_u16(n: u16) -> Option<Self> {
        match n {
            10 => Some(Self::Foreground),
            11 => Some(Self::Background),
            12 => Some(Self::Cursor),
            13 => Some(Self::MouseForeground),
            14 => Some(Self::MouseBackground),
            15 => Some(Self::TektronixForeground),
            16 => Some(Self::TektronixBackground),
            17 => Some(Self::HighlightBackground),
            18 => Some(Self::TektronixCursor),
            19 => Some(Self::HighlightForeground),
            _ => None,
        }
    }
}

/// Setting requested through DECRQSS (DCS $ q ... ST)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusStringRequest {
    /// `m` - current SGR attributes
    GraphicRendition,
    /// `r` - top and bottom margins
    Margins,
    /// ` q` - cursor style
    CursorStyle,
    /// `"p` - conformance level
    ConformanceLevel,
}

/// Window manipulation requests (XTWINOPS, ESC[...t)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WindowOp {
    /// 1 - De-iconify window
    Deiconify,
    /// 2 - Iconify window
    Iconify,
    /// 3;x;y - Move window to pixel position
    Move { x: u16, y: u16 },
    /// 4;height;width - Resize window in pixels
    ResizePixels { height: u16, width: u16 },
    /// 5 - Raise window to the front
    Raise,
    /// 6 - Lower window to the bottom
    Lower,
    /// 7 - Refresh window
    Refresh,
    /// 8;rows;columns - Resize text area in characters
    ResizeChars { rows: u16, columns: u16 },
    /// 9;n - Maximize (1) or restore (0)
    Maximize(bool),
    /// 10;n - Full-screen on (1), off (0) or toggle (2)
    FullScreen(u16),
    /// 11 - Report window state
    ReportState,
    /// 13 - Report window position
    ReportPosition,
    /// 14 - Report text area size in pixels
    ReportSizePixels,
    /// 18 - Report text area size in characters
    ReportSizeChars,
    /// 19 - Report screen size in characters
    ReportScreenSizeChars,
    /// 20 - Report icon label
    ReportIconLabel,
    /// 21 - Report window title
    ReportTitle,
    /// 22 - Push title on the title stack
    PushTitle,
    /// 23 - Pop title from the title stack
    PopTitle,
    /// 24 and larger - resize to that many lines (DECSLPP)
    ResizeLines(u16),
    /// Anything else, parameters forwarded verbatim
    Other(Vec<u16>),
}

/// Receiver of everything the parser produces.
///
/// Actions arrive in stream order. Diagnostics are never part of the action
/// stream; they go to [`ActionSink::report_error`].
pub trait ActionSink {
    fn emit(&mut self, action: Action);

    /// Report a parsing diagnostic. Default implementation logs it.
    fn report_error(&mut self, error: ParseError) {
        log::debug!("{error}");
    }
}

impl ActionSink for Vec<Action> {
    fn emit(&mut self, action: Action) {
        self.push(action);
    }
}
