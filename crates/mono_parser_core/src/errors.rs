//! Parser diagnostics and error level definitions
//!
//! Nothing in here is ever returned as an `Err`: malformed input is absorbed and
//! reported through [`crate::ActionSink::report_error`].

use std::fmt::Display;

use thiserror::Error;

/// Error severity level for diagnostic reporting
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorLevel {
    /// Informational message (e.g., unrecognized but harmless sequences)
    Info = 0,
    /// Warning about potentially problematic input (parsing continues)
    Warning = 1,
    /// Error in parsing that may cause incorrect behavior
    Error = 2,
}

impl ErrorLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl Display for ErrorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parser diagnostic with context information
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Invalid parameter value for a command
    #[error("Invalid parameter value '{value}' for command '{command}'{}", expected_hint(.expected))]
    InvalidParameter {
        command: &'static str,
        value: String,
        /// Expected range or valid values (optional)
        expected: Option<String>,
    },
    /// A sequence was cut short, e.g. by ESC or CAN in the middle of a CSI
    #[error("Incomplete sequence: {context}")]
    IncompleteSequence { context: &'static str },
    /// Malformed escape sequence
    #[error("Malformed sequence: {description}{}", sequence_hint(.sequence))]
    MalformedSequence {
        description: &'static str,
        /// The problematic byte or sequence (for debugging)
        sequence: Option<String>,
    },
    /// Recognized shape, but no action is defined for it
    #[error("Unsupported feature: {description}{}", sequence_hint(.sequence))]
    UnsupportedFeature { description: &'static str, sequence: Option<String> },
    /// Out of range value that was clamped or ignored
    #[error("Parameter '{parameter}' value {value} out of range [{min}, {max}]")]
    OutOfRange { parameter: &'static str, value: i64, min: i64, max: i64 },
}

fn expected_hint(expected: &Option<String>) -> String {
    expected.as_ref().map(|exp| format!(" (expected: {exp})")).unwrap_or_default()
}

fn sequence_hint(sequence: &Option<String>) -> String {
    sequence.as_ref().map(|seq| format!(" (sequence: {})", escape_sequence_text(seq))).unwrap_or_default()
}

impl ParseError {
    /// Returns the suggested error level for this error type
    pub fn level(&self) -> ErrorLevel {
        match self {
            Self::InvalidParameter { .. } => ErrorLevel::Error,
            Self::IncompleteSequence { .. } => ErrorLevel::Warning,
            Self::MalformedSequence { .. } => ErrorLevel::Error,
            Self::UnsupportedFeature { .. } => ErrorLevel::Info,
            Self::OutOfRange { .. } => ErrorLevel::Warning,
        }
    }

    /// Short name of the diagnostic kind
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "invalid parameter",
            Self::IncompleteSequence { .. } => "incomplete sequence",
            Self::MalformedSequence { .. } => "malformed sequence",
            Self::UnsupportedFeature { .. } => "unsupported feature",
            Self::OutOfRange { .. } => "out of range",
        }
    }
}

/// Renders raw sequence text with control characters made visible.
fn escape_sequence_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_control() {
            result.push_str(&print_char_value(ch));
        } else {
            result.push(ch);
        }
    }
    result
}

/// Format a character for human-readable error messages.
///
/// - Printable ASCII (0x20-0x7E): "0x41 ('A')"
/// - Control characters with names: "0x0A (LF)", "0x1B (ESC)", etc.
/// - Anything else: "U+00E9"
pub fn print_char_value(ch: char) -> String {
    let name = match ch {
        '\x00' => "NUL",
        '\x07' => "BEL",
        '\x08' => "BS",
        '\x09' => "TAB",
        '\x0A' => "LF",
        '\x0B' => "VT",
        '\x0C' => "FF",
        '\x0D' => "CR",
        '\x0E' => "SO",
        '\x0F' => "SI",
        '\x18' => "CAN",
        '\x1A' => "SUB",
        '\x1B' => "ESC",
        '\x7F' => "DEL",
        '\x20'..='\x7E' => return format!("0x{:02X} ('{}')", ch as u32, ch),
        _ if (ch as u32) < 0x20 => return format!("0x{:02X}", ch as u32),
        _ => return format!("U+{:04X}", ch as u32),
    };
    format!("0x{:02X} ({})", ch as u32, name)
}
