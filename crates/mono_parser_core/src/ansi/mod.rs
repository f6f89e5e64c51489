//! Stream driver
//!
//! Consumes shell output one character at a time. Literal text is collected
//! into runs. Anything that starts with ESC is accumulated in the pending
//! buffer until its terminator arrives.
//! The pending buffer survives across calls, so a sequence may be split over
//! any number of reads.

mod csi;
mod dcs;
mod esc;
mod osc;
mod sgr;

use crate::{
    Action, ActionSink, EscapeSequence, ParseError, SequenceKind,
    control_codes::{BACKSPACE, BELL, CANCEL, CARRIAGE_RETURN, ESC, FORM_FEED, LINE_FEED, SUBSTITUTE, TAB},
    sequence::is_final_byte,
};

/// Longest CSI or simple escape that is buffered before it is skipped.
const MAX_CONTROL_LENGTH: usize = 512;
/// Longest OSC / DCS / APC string that is buffered before it is skipped.
const MAX_STRING_LENGTH: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ParserState {
    #[default]
    Ground = 0,
    /// ESC seen, possibly followed by intermediates
    Escape = 1,
    Csi = 2,
    Osc = 3,
    Dcs = 4,
    /// APC, PM or SOS string
    String = 5,
}

#[derive(Default)]
pub struct OutputParser {
    state: ParserState,
    pending: String,
    /// Set while an overlong sequence is skipped up to its terminator
    discarding: bool,
}

impl OutputParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn is_in_escape_sequence(&self) -> bool {
        self.state != ParserState::Ground
    }

    /// Partial sequence text carried over from previous calls.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Drops any partial sequence and returns to ground state.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.discarding = false;
        self.state = ParserState::Ground;
    }

    /// Parses one chunk of output and returns the completed actions.
    ///
    /// Diagnostics are logged and not part of the result.
    pub fn parse(&mut self, chunk: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        self.feed(chunk, &mut actions);
        actions
    }

    /// Parses one chunk of output, forwarding actions and diagnostics to `sink`
    /// in stream order.
    pub fn feed(&mut self, chunk: &str, sink: &mut dyn ActionSink) {
        let mut run_start: Option<usize> = None;

        for (idx, ch) in chunk.char_indices() {
            if self.state != ParserState::Ground {
                self.advance(ch, sink);
                continue;
            }
            match ch {
                ESC => {
                    flush_text(chunk, &mut run_start, idx, sink);
                    self.pending.push(ESC);
                    self.state = ParserState::Escape;
                }
                BELL | BACKSPACE | TAB | LINE_FEED | FORM_FEED | CARRIAGE_RETURN => {
                    flush_text(chunk, &mut run_start, idx, sink);
                    execute_control(ch, sink);
                }
                _ => {
                    run_start.get_or_insert(idx);
                }
            }
        }

        flush_text(chunk, &mut run_start, chunk.len(), sink);
    }

    /// One character while inside a sequence.
    fn advance(&mut self, ch: char, sink: &mut dyn ActionSink) {
        if ch == CANCEL || ch == SUBSTITUTE {
            sink.report_error(ParseError::IncompleteSequence {
                context: "sequence cancelled by CAN/SUB",
            });
            self.reset();
            return;
        }

        if self.discarding {
            self.skip_overlong(ch);
            return;
        }

        match self.state {
            ParserState::Ground => {}
            ParserState::Escape => {
                if ch == ESC {
                    self.restart_escape(sink);
                } else if is_executed_control(ch) {
                    execute_control(ch, sink);
                } else {
                    self.pending.push(ch);
                    self.state = match SequenceKind::classify(&self.pending) {
                        Some(SequenceKind::Csi) => ParserState::Csi,
                        Some(SequenceKind::Osc) => ParserState::Osc,
                        Some(SequenceKind::Dcs) => ParserState::Dcs,
                        Some(SequenceKind::String) => ParserState::String,
                        Some(SequenceKind::Simple) | None => ParserState::Escape,
                    };
                    if self.state == ParserState::Escape {
                        self.complete_if_terminated(SequenceKind::Simple, sink);
                    }
                }
            }
            ParserState::Csi => {
                if ch == ESC {
                    self.restart_escape(sink);
                } else if is_executed_control(ch) {
                    execute_control(ch, sink);
                } else {
                    self.pending.push(ch);
                    self.complete_if_terminated(SequenceKind::Csi, sink);
                }
            }
            ParserState::Osc => {
                self.pending.push(ch);
                self.complete_if_terminated(SequenceKind::Osc, sink);
            }
            ParserState::Dcs => {
                self.pending.push(ch);
                self.complete_if_terminated(SequenceKind::Dcs, sink);
            }
            ParserState::String => {
                self.pending.push(ch);
                self.complete_if_terminated(SequenceKind::String, sink);
            }
        }
    }

    fn restart_escape(&mut self, sink: &mut dyn ActionSink) {
        sink.report_error(ParseError::IncompleteSequence {
            context: "sequence interrupted by ESC",
        });
        self.pending.clear();
        self.pending.push(ESC);
        self.state = ParserState::Escape;
    }

    fn complete_if_terminated(&mut self, kind: SequenceKind, sink: &mut dyn ActionSink) {
        if kind.is_complete(&self.pending) {
            let sequence = EscapeSequence::new(kind, std::mem::take(&mut self.pending));
            self.state = ParserState::Ground;
            dispatch(&sequence, sink);
            return;
        }

        let limit = match kind {
            SequenceKind::Csi | SequenceKind::Simple => MAX_CONTROL_LENGTH,
            SequenceKind::Osc | SequenceKind::Dcs | SequenceKind::String => MAX_STRING_LENGTH,
        };
        if self.pending.len() > limit {
            sink.report_error(ParseError::OutOfRange {
                parameter: "sequence length",
                value: self.pending.len() as i64,
                min: 0,
                max: limit as i64,
            });
            let last = self.pending.chars().next_back();
            self.pending.clear();
            self.pending.extend(last);
            self.discarding = true;
        }
    }

    /// While discarding only the newest character is kept in `pending`, enough
    /// to spot a split `ESC \`.
    fn skip_overlong(&mut self, ch: char) {
        let after_esc = self.pending.ends_with(ESC);
        let terminated = match self.state {
            ParserState::Csi | ParserState::Escape => is_final_byte(ch) || ch == ESC,
            ParserState::Osc => ch == BELL || (after_esc && ch == '\\'),
            ParserState::Dcs | ParserState::String => after_esc && ch == '\\',
            ParserState::Ground => true,
        };
        self.pending.clear();
        if terminated {
            self.discarding = false;
            if ch == ESC {
                self.pending.push(ESC);
                self.state = ParserState::Escape;
            } else {
                self.state = ParserState::Ground;
            }
        } else {
            self.pending.push(ch);
        }
    }
}

fn dispatch(sequence: &EscapeSequence, sink: &mut dyn ActionSink) {
    match sequence.kind {
        SequenceKind::Csi => csi::dispatch(sequence, sink),
        SequenceKind::Osc => osc::dispatch(sequence, sink),
        SequenceKind::Dcs => dcs::dispatch(sequence, sink),
        SequenceKind::Simple => esc::dispatch(sequence, sink),
        SequenceKind::String => sink.report_error(ParseError::UnsupportedFeature {
            description: "APC / PM / SOS strings are not interpreted",
            sequence: None,
        }),
    }
}

fn flush_text(chunk: &str, run_start: &mut Option<usize>, end: usize, sink: &mut dyn ActionSink) {
    if let Some(start) = run_start.take() {
        if end > start {
            sink.emit(Action::Print(chunk[start..end].to_string()));
        }
    }
}

fn is_executed_control(ch: char) -> bool {
    matches!(ch, BELL | BACKSPACE | TAB | LINE_FEED | FORM_FEED | CARRIAGE_RETURN)
}

#[inline(always)]
fn execute_control(ch: char, sink: &mut dyn ActionSink) {
    let action = match ch {
        BELL => Action::Bell,
        BACKSPACE => Action::Backspace,
        TAB => Action::Tab,
        LINE_FEED => Action::LineFeed,
        FORM_FEED => Action::FormFeed,
        CARRIAGE_RETURN => Action::CarriageReturn,
        _ => return,
    };
    sink.emit(action);
}
