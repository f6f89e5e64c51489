use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    AnsiMode, CaretShape, CharsetSlot, DecPrivateMode, DeviceAttributes, DeviceStatusReport, DynamicColor, EraseInDisplayMode, EraseInLineMode, LineAttribute,
    SgrAttribute, StatusStringRequest, TabClear, WindowOp,
};

/// One terminal effect decoded from the output stream.
///
/// Variants are grouped by the capability interface that applies them, see
/// [`Action::capability`] and [`crate::route`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Action {
    // Output
    /// A run of literal text
    Print(String),
    /// BEL (0x07)
    Bell,
    /// OSC 8 - start a hyperlink: ESC]8;{params};{uri}BEL
    SetHyperlink { params: BTreeMap<String, String>, uri: String },
    /// OSC 8 with an empty URI - end the current hyperlink
    ClearHyperlink,
    /// DECREGIS - ReGIS graphics: DCS >| {commands} ST
    ProcessRegis(String),

    // Cursor
    /// BS (0x08)
    Backspace,
    /// HT (0x09)
    Tab,
    /// LF (0x0A)
    LineFeed,
    /// FF (0x0C)
    FormFeed,
    /// CR (0x0D)
    CarriageReturn,
    /// CUU - ESC[{n}A
    CursorUp(u16),
    /// CUD - ESC[{n}B
    CursorDown(u16),
    /// CUF - ESC[{n}C
    CursorForward(u16),
    /// CUB - ESC[{n}D
    CursorBackward(u16),
    /// CNL - ESC[{n}E
    CursorNextLine(u16),
    /// CPL - ESC[{n}F
    CursorPreviousLine(u16),
    /// CHA / HPA - ESC[{n}G or ESC[{n}`
    CursorHorizontalAbsolute(u16),
    /// CUP / HVP - ESC[{row};{col}H or ESC[{row};{col}f
    CursorPosition { row: u16, col: u16 },
    /// HPR - ESC[{n}a
    CharacterPositionRelative(u16),
    /// VPA - ESC[{n}d
    LinePositionAbsolute(u16),
    /// VPR - ESC[{n}e
    LinePositionRelative(u16),
    /// CHT - ESC[{n}I
    CursorForwardTabulation(u16),
    /// CBT - ESC[{n}Z
    CursorBackwardTabulation(u16),
    /// TBC - ESC[{n}g
    ClearTabStop(TabClear),
    /// HTS - ESC H
    SetTabStop,
    /// DECSC - ESC 7
    SaveCursor,
    /// DECRC - ESC 8
    RestoreCursor,
    /// SCOSC - ESC[s
    SaveCursorPosition,
    /// SCORC - ESC[u
    RestoreCursorPosition,
    /// IND - ESC D
    Index,
    /// RI - ESC M
    ReverseIndex,
    /// NEL - ESC E
    NextLine,

    // Erase
    /// ED / DECSED - ESC[{n}J, ESC[?{n}J
    EraseInDisplay { mode: EraseInDisplayMode, selective: bool },
    /// EL / DECSEL - ESC[{n}K, ESC[?{n}K
    EraseInLine { mode: EraseInLineMode, selective: bool },
    /// ECH - ESC[{n}X
    EraseCharacters(u16),
    /// ICH - ESC[{n}@
    InsertCharacters(u16),
    /// DCH - ESC[{n}P
    DeleteCharacters(u16),
    /// IL - ESC[{n}L
    InsertLines(u16),
    /// DL - ESC[{n}M
    DeleteLines(u16),
    /// SU - ESC[{n}S
    ScrollUp(u16),
    /// SD - ESC[{n}T
    ScrollDown(u16),
    /// REP - ESC[{n}b
    RepeatPrecedingCharacter(u16),
    /// DECALN - ESC # 8
    ScreenAlignmentTest,

    // Mode
    /// SM - ESC[{n}h, one action per mode
    SetMode(AnsiMode),
    /// RM - ESC[{n}l, one action per mode
    ResetMode(AnsiMode),
    /// DECSET - ESC[?{n}h, one action per mode
    SetDecPrivateMode(DecPrivateMode),
    /// DECRST - ESC[?{n}l, one action per mode
    ResetDecPrivateMode(DecPrivateMode),
    /// DECSTBM - ESC[{top};{bottom}r, `bottom: None` means the last line
    SetScrollingRegion { top: u16, bottom: Option<u16> },
    /// DECSCUSR - ESC[{n} q
    SetCursorStyle { blinking: bool, shape: CaretShape },
    /// DECKPAM - ESC =
    SetKeypadApplicationMode,
    /// DECKPNM - ESC >
    SetKeypadNumericMode,
    /// SS2 / SS3 - ESC N, ESC O
    SingleShift(CharsetSlot),
    /// SCS - ESC ( C, ESC ) C, ESC * C, ESC + C
    DesignateCharset { slot: CharsetSlot, charset: char },
    /// DECDHL / DECSWL / DECDWL - ESC # 3 .. ESC # 6
    SetLineAttribute(LineAttribute),
    /// RIS - ESC c
    FullReset,
    /// DECSTR - ESC[!p
    SoftReset,
    /// DECSCL - ESC[{level};{c1}"p
    SetConformanceLevel { level: u16, eight_bit_controls: bool },
    /// DECSCA - DCS $s {attributes} ST
    SelectCharacterProtection(String),

    // Color
    /// SGR - ESC[{param}m, one action per attribute
    SelectGraphicRendition(SgrAttribute),
    /// OSC 4 - ESC]4;{index};{spec}BEL
    SetPaletteColor { index: u8, spec: String },
    /// OSC 4 with `?` as spec
    QueryPaletteColor(u8),
    /// OSC 104 - empty list resets the whole palette
    ResetPaletteColors(Vec<u8>),
    /// OSC 5 - ESC]5;{index};{spec}BEL
    SetSpecialColor { index: u16, spec: String },
    /// OSC 5 with `?` as spec
    QuerySpecialColor(u16),
    /// OSC 105 - `None` resets every special color
    ResetSpecialColor(Option<u16>),
    /// OSC 6 - ESC]6;{index};{flag}BEL
    EnableSpecialColor { index: u16, enabled: bool },
    /// OSC 10-19
    SetDynamicColor(DynamicColor, String),
    /// OSC 10-19 with `?` as spec
    QueryDynamicColor(DynamicColor),
    /// OSC 110-119
    ResetDynamicColor(DynamicColor),

    // Window
    /// OSC 0 / OSC 2
    SetWindowTitle(String),
    /// OSC 1
    SetIconName(String),
    /// OSC 3 - `value: None` deletes the property
    SetXProperty { name: String, value: Option<String> },
    /// OSC 7 - current directory, usually a `file://host/path` URL
    SetCurrentDirectory(String),
    /// OSC 9 - desktop notification
    Notification(String),
    /// OSC 46
    SetLogFile(String),
    /// OSC 50
    SetFont(String),
    /// OSC 51
    SetEmojiFont(String),
    /// XTWINOPS - ESC[{Ps};{Ps};{Ps}t
    WindowManipulation(WindowOp),

    // Report
    /// DA - ESC[c, ESC[>c, ESC[=c
    DeviceAttributes(DeviceAttributes),
    /// DSR - ESC[{n}n, ESC[?{n}n
    DeviceStatusReport(DeviceStatusReport),
    /// DECRQM - ESC[{mode}$p, ESC[?{mode}$p
    RequestMode { mode: u16, private: bool },
    /// DECREQTPARM - ESC[{n}x
    RequestTerminalParameters(u16),
    /// DECSLE - ESC[{Pm}{
    SelectLocatorEvents(Vec<u16>),
    /// DECRQLP - ESC[{n}|
    RequestLocatorPosition(u16),
    /// DECRQSS - DCS $q {setting} ST
    RequestStatusString(StatusStringRequest),
    /// XTGETTCAP - DCS +q {hex names} ST, names already hex-decoded
    RequestTerminfo(Vec<String>),
    /// DECCIR - DCS 1$r {report} ST
    ReportCursorInformation(String),
    /// DECRSPS - DCS $t {state} ST
    RestorePresentationState(String),

    // Clipboard
    /// OSC 52 - payload already base64-decoded
    SetSelectionData { clipboard: String, data: Vec<u8> },
    /// OSC 52 with `?` as payload
    QuerySelectionData(String),

    // Key programming
    /// DECPFK - DCS ={key}/{string} ST
    ProgramFunctionKey { key: String, string: String },
    /// DECPKA - DCS +p{key}/{action} ST
    ProgramKeyAction { key: String, action: String },
    /// DECUDK - DCS {clear}*|{definitions} ST
    DefineUserKeys { clear: u16, definitions: Vec<String> },
}

/// The capability group an [`Action`] is applied through.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Capability {
    Output,
    Cursor,
    Erase,
    Mode,
    Color,
    Window,
    Report,
    Clipboard,
    KeyProgramming,
}

impl Action {
    pub fn capability(&self) -> Capability {
        match self {
            Action::Print(_) | Action::Bell | Action::SetHyperlink { .. } | Action::ClearHyperlink | Action::ProcessRegis(_) => Capability::Output,

            Action::Backspace
            | Action::Tab
            | Action::LineFeed
            | Action::FormFeed
            | Action::CarriageReturn
            | Action::CursorUp(_)
            | Action::CursorDown(_)
            | Action::CursorForward(_)
            | Action::CursorBackward(_)
            | Action::CursorNextLine(_)
            | Action::CursorPreviousLine(_)
            | Action::CursorHorizontalAbsolute(_)
            | Action::CursorPosition { .. }
            | Action::CharacterPositionRelative(_)
            | Action::LinePositionAbsolute(_)
            | Action::LinePositionRelative(_)
            | Action::CursorForwardTabulation(_)
            | Action::CursorBackwardTabulation(_)
            | Action::ClearTabStop(_)
            | Action::SetTabStop
            | Action::SaveCursor
            | Action::RestoreCursor
            | Action::SaveCursorPosition
            | Action::RestoreCursorPosition
            | Action::Index
            | Action::ReverseIndex
            | Action::NextLine => Capability::Cursor,

            Action::EraseInDisplay { .. }
            | Action::EraseInLine { .. }
            | Action::EraseCharacters(_)
            | Action::InsertCharacters(_)
            | Action::DeleteCharacters(_)
            | Action::InsertLines(_)
            | Action::DeleteLines(_)
            | Action::ScrollUp(_)
            | Action::ScrollDown(_)
            | Action::RepeatPrecedingCharacter(_)
            | Action::ScreenAlignmentTest => Capability::Erase,

            Action::SetMode(_)
            | Action::ResetMode(_)
            | Action::SetDecPrivateMode(_)
            | Action::ResetDecPrivateMode(_)
            | Action::SetScrollingRegion { .. }
            | Action::SetCursorStyle { .. }
            | Action::SetKeypadApplicationMode
            | Action::SetKeypadNumericMode
            | Action::SingleShift(_)
            | Action::DesignateCharset { .. }
            | Action::SetLineAttribute(_)
            | Action::FullReset
            | Action::SoftReset
            | Action::SetConformanceLevel { .. }
            | Action::SelectCharacterProtection(_) => Capability::Mode,

            Action::SelectGraphicRendition(_)
            | Action::SetPaletteColor { .. }
            | Action::QueryPaletteColor(_)
            | Action::ResetPaletteColors(_)
            | Action::SetSpecialColor { .. }
            | Action::QuerySpecialColor(_)
            | Action::ResetSpecialColor(_)
            | Action::EnableSpecialColor { .. }
            | Action::SetDynamicColor(..)
            | Action::QueryDynamicColor(_)
            | Action::ResetDynamicColor(_) => Capability::Color,

            Action::SetWindowTitle(_)
            | Action::SetIconName(_)
            | Action::SetXProperty { .. }
            | Action::SetCurrentDirectory(_)
            | Action::Notification(_)
            | Action::SetLogFile(_)
            | Action::SetFont(_)
            | Action::SetEmojiFont(_)
            | Action::WindowManipulation(_) => Capability::Window,

            Action::DeviceAttributes(_)
            | Action::DeviceStatusReport(_)
            | Action::RequestMode { .. }
            | Action::RequestTerminalParameters(_)
            | Action::SelectLocatorEvents(_)
            | Action::RequestLocatorPosition(_)
            | Action::RequestStatusString(_)
            | Action::RequestTerminfo(_)
            | Action::ReportCursorInformation(_)
            | Action::RestorePresentationState(_) => Capability::Report,

            Action::SetSelectionData { .. } | Action::QuerySelectionData(_) => Capability::Clipboard,

            Action::ProgramFunctionKey { .. } | Action::ProgramKeyAction { .. } | Action::DefineUserKeys { .. } => Capability::KeyProgramming,
        }
    }
}
