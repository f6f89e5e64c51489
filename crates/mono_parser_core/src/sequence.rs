use crate::control_codes::{BELL, ESC, ST};

/// Kind of an escape sequence, decided by its introducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// `ESC [`
    Csi,
    /// `ESC ]`
    Osc,
    /// `ESC P`
    Dcs,
    /// Two character escapes, or ESC + intermediates + final (`ESC # 8`)
    Simple,
    /// APC (`ESC _`), PM (`ESC ^`) and SOS (`ESC X`)
    String,
}

impl SequenceKind {
    /// Classifies accumulated sequence text. Needs at least ESC and the
    /// introducer character, returns `None` before that.
    pub fn classify(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        if chars.next()? != ESC {
            return None;
        }
        Some(match chars.next()? {
            '[' => Self::Csi,
            ']' => Self::Osc,
            'P' => Self::Dcs,
            '_' | '^' | 'X' => Self::String,
            _ => Self::Simple,
        })
    }

    /// Terminator classifier: is `text` (introducer included, newest
    /// character last) a finished sequence of this kind?
    pub fn is_complete(self, text: &str) -> bool {
        let Some(last) = text.chars().next_back() else {
            return false;
        };
        match self {
            Self::Csi => text.len() > 2 && is_final_byte(last),
            Self::Osc => text.len() > 2 && (last == BELL || (text.len() > 3 && text.ends_with(ST))),
            Self::Dcs | Self::String => text.len() > 3 && text.ends_with(ST),
            Self::Simple => {
                let mut chars = text.chars().skip(1);
                match chars.next() {
                    None => false,
                    Some(second) if is_intermediate(second) => text.len() > 2 && !is_intermediate(last),
                    Some(_) => true,
                }
            }
        }
    }
}

/// ECMA-48 final byte range of a control sequence.
pub(crate) fn is_final_byte(ch: char) -> bool {
    ('\x40'..='\x7E').contains(&ch)
}

pub(crate) fn is_intermediate(ch: char) -> bool {
    ('\x20'..='\x2F').contains(&ch)
}

/// A completed escape sequence, raw text including introducer and terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeSequence {
    pub kind: SequenceKind,
    pub text: String,
}

impl EscapeSequence {
    pub fn new(kind: SequenceKind, text: String) -> Self {
        Self { kind, text }
    }

    /// Text between the introducer and the terminator.
    ///
    /// For CSI the final byte is excluded, for simple escapes everything after
    /// ESC is returned.
    pub fn body(&self) -> &str {
        let text = self.text.as_str();
        match self.kind {
            SequenceKind::Simple => text.get(1..).unwrap_or_default(),
            SequenceKind::Csi => {
                let end = text.len().saturating_sub(1);
                text.get(2..end).unwrap_or_default()
            }
            SequenceKind::Osc => {
                let inner = text.get(2..).unwrap_or_default();
                inner.strip_suffix(ST).or_else(|| inner.strip_suffix(BELL)).unwrap_or(inner)
            }
            SequenceKind::Dcs | SequenceKind::String => {
                let inner = text.get(2..).unwrap_or_default();
                inner.strip_suffix(ST).unwrap_or(inner)
            }
        }
    }

    /// Last character of the sequence, the final byte for CSI.
    pub fn final_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }
}
