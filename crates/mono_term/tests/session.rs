use std::{
    collections::VecDeque,
    io::{self, Cursor, Read},
    thread,
    time::Duration,
};

use mono_parser_core::{Action, Color, SgrAttribute};
use mono_term::{Session, SessionError, SessionEvent, Transcript};
use pretty_assertions::assert_eq;

/// Hands out one prepared chunk per `read` call, then an optional error.
struct ChunkReader {
    chunks: VecDeque<Vec<u8>>,
    fail_at_end: bool,
}

impl ChunkReader {
    fn new(chunks: &[&[u8]]) -> Self {
        Self {
            chunks: chunks.iter().map(|chunk| chunk.to_vec()).collect(),
            fail_at_end: false,
        }
    }
}

impl Read for ChunkReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.chunks.pop_front() {
            Some(chunk) => {
                assert!(chunk.len() <= buf.len());
                buf[..chunk.len()].copy_from_slice(&chunk);
                Ok(chunk.len())
            }
            None if self.fail_at_end => Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed")),
            None => Ok(0),
        }
    }
}

/// Endless output, one byte per read with a pause in between.
struct SlowReader;

impl Read for SlowReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        thread::sleep(Duration::from_millis(20));
        buf[0] = b'x';
        Ok(1)
    }
}

fn collect_events(session: &Session) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    for event in session.events() {
        let done = !matches!(event, SessionEvent::Actions(_));
        events.push(event);
        if done {
            break;
        }
    }
    events
}

#[test]
fn test_batches_in_stream_order() {
    let reader = ChunkReader::new(&[b"ab\x1b[3", b"1mc", b"\x1b]0;t\x07"]);
    let session = Session::spawn(reader, 64).unwrap();

    assert_eq!(
        collect_events(&session),
        vec![
            SessionEvent::Actions(vec![Action::Print("ab".to_string())]),
            SessionEvent::Actions(vec![
                Action::SelectGraphicRendition(SgrAttribute::Foreground(Color::Base(1))),
                Action::Print("c".to_string()),
            ]),
            SessionEvent::Actions(vec![Action::SetWindowTitle("t".to_string())]),
            SessionEvent::Closed,
        ]
    );
}

#[test]
fn test_utf8_split_across_reads() {
    let crab = "🦀".as_bytes();
    let reader = ChunkReader::new(&[&crab[..1], &crab[1..3], &crab[3..]]);
    let session = Session::spawn(reader, 64).unwrap();

    assert_eq!(
        collect_events(&session),
        vec![SessionEvent::Actions(vec![Action::Print("🦀".to_string())]), SessionEvent::Closed]
    );
}

#[test]
fn test_truncated_utf8_at_end() {
    let reader = ChunkReader::new(&[b"x\xe2\x82"]);
    let session = Session::spawn(reader, 64).unwrap();

    assert_eq!(
        collect_events(&session),
        vec![
            SessionEvent::Actions(vec![Action::Print("x".to_string())]),
            SessionEvent::Actions(vec![Action::Print("\u{fffd}".to_string())]),
            SessionEvent::Closed,
        ]
    );
}

#[test]
fn test_reader_failure() {
    let mut reader = ChunkReader::new(&[b"hi"]);
    reader.fail_at_end = true;
    let mut session = Session::spawn(reader, 64).unwrap();

    let mut transcript = Transcript::new();
    match session.run_into(&mut transcript) {
        Err(SessionError::ReaderFailed(message)) => assert!(message.contains("pipe closed")),
        other => panic!("Expected ReaderFailed, got {other:?}"),
    }
    assert_eq!(transcript.text(), "hi");
    assert!(session.is_finished());
}

#[test]
fn test_run_into_transcript() {
    let output = b"first line\r\n\x1b]2;build\x07\x1b]7;file://host/src\x07second\x1b[1;7Hx".to_vec();
    let mut session = Session::spawn(Cursor::new(output), 5).unwrap();

    let mut transcript = Transcript::new();
    session.run_into(&mut transcript).unwrap();

    assert_eq!(transcript.text(), "first xine\nsecond");
    assert_eq!(transcript.title.as_deref(), Some("build"));
    assert_eq!(transcript.cwd.as_deref(), Some("file://host/src"));
    assert!(session.is_finished());
    assert!(!session.drain_into(&mut transcript).unwrap());
}

#[test]
fn test_drain_into_until_closed() {
    let mut session = Session::spawn(Cursor::new(b"abc\x07".to_vec()), 2).unwrap();
    let mut transcript = Transcript::new();

    while session.drain_into(&mut transcript).unwrap() {
        std::thread::yield_now();
    }
    assert_eq!(transcript.text(), "abc");
    assert_eq!(transcript.bells, 1);
}

#[test]
fn test_stop_ends_run_cleanly() {
    let mut session = Session::spawn(SlowReader, 16).unwrap();
    thread::sleep(Duration::from_millis(50));
    session.stop();

    let mut transcript = Transcript::new();
    session.run_into(&mut transcript).unwrap();
    assert!(session.is_finished());
    assert!(transcript.text().chars().all(|ch| ch == 'x'));
    assert!(!session.drain_into(&mut transcript).unwrap());
}

#[test]
fn test_stop_sends_stopped_event() {
    let session = Session::spawn(SlowReader, 16).unwrap();
    session.stop();
    assert_eq!(collect_events(&session).last(), Some(&SessionEvent::Stopped));
}
