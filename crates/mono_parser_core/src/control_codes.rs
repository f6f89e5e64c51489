// Control characters the driver reacts to in ground state
pub const BELL: char = '\x07';
pub const BACKSPACE: char = '\x08';
pub const TAB: char = '\x09';
pub const LINE_FEED: char = '\x0A';
pub const FORM_FEED: char = '\x0C';
pub const CARRIAGE_RETURN: char = '\x0D';
pub const CANCEL: char = '\x18';
pub const SUBSTITUTE: char = '\x1A';
pub const ESC: char = '\x1B';

/// String Terminator (ESC \)
pub const ST: &str = "\x1B\\";
