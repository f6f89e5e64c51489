//! Reader thread around [`OutputParser`].
//!
//! The thread owns the parser and the UTF-8 decoder. Every read produces one
//! batch of actions which is sent to the single consumer over a channel, so
//! batches arrive in stream order. The consumer applies them to its state on
//! its own thread.

use std::{
    io::{ErrorKind, Read},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, TryRecvError},
    },
    thread,
};

use mono_parser_core::{Action, ActionTarget, OutputParser, route};

use crate::{SessionError, SessionResult, Utf8Decoder};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Actions completed by one read, in stream order
    Actions(Vec<Action>),
    /// The reader reached end of stream
    Closed,
    /// The reader ended after [`Session::stop`]
    Stopped,
    /// The reader failed, no further events follow
    Failed(String),
}

pub struct Session {
    events: Receiver<SessionEvent>,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
    finished: bool,
}

impl Session {
    /// Starts the reader thread.
    ///
    /// # Errors
    ///
    /// Fails if the thread can't be spawned.
    pub fn spawn(mut reader: impl Read + Send + 'static, buffer_size: usize) -> SessionResult<Self> {
        let (tx, rx) = mpsc::channel::<SessionEvent>();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();
        let buffer_size = buffer_size.max(1);

        let handle = thread::Builder::new()
            .name("session_reader".to_string())
            .spawn(move || {
                let mut parser = OutputParser::new();
                let mut decoder = Utf8Decoder::new();
                let mut data = vec![0; buffer_size];

                while !stop_flag.load(Ordering::Relaxed) {
                    match reader.read(&mut data) {
                        Ok(0) => {
                            if let Some(ch) = decoder.finish() {
                                let actions = parser.parse(ch.encode_utf8(&mut [0; 4]));
                                let _ = tx.send(SessionEvent::Actions(actions));
                            }
                            if parser.is_in_escape_sequence() {
                                log::debug!("stream closed inside a sequence: {:?}", parser.pending());
                            }
                            let _ = tx.send(SessionEvent::Closed);
                            return;
                        }
                        Ok(size) => {
                            let text = decoder.decode(&data[..size]);
                            let actions = parser.parse(&text);
                            if actions.is_empty() {
                                continue;
                            }
                            if tx.send(SessionEvent::Actions(actions)).is_err() {
                                log::debug!("session consumer is gone, stopping reader");
                                return;
                            }
                        }
                        Err(err) if err.kind() == ErrorKind::Interrupted => {}
                        Err(err) => {
                            log::error!("session reader failed: {err}");
                            let _ = tx.send(SessionEvent::Failed(err.to_string()));
                            return;
                        }
                    }
                }
                log::info!("session reader stopped");
                let _ = tx.send(SessionEvent::Stopped);
            })
            .map_err(SessionError::ThreadSpawn)?;

        Ok(Self {
            events: rx,
            stop,
            handle: Some(handle),
            finished: false,
        })
    }

    /// Asks the reader to stop. Takes effect once the current read returns.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn events(&self) -> &Receiver<SessionEvent> {
        &self.events
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Routes every batch that has arrived so far, without blocking.
    ///
    /// Returns `Ok(false)` once the stream has closed or the reader stopped.
    ///
    /// # Errors
    ///
    /// Fails if the reader reported an error or went away without closing.
    pub fn drain_into(&mut self, target: &mut dyn ActionTarget) -> SessionResult<bool> {
        while !self.finished {
            match self.events.try_recv() {
                Ok(event) => self.apply(event, target)?,
                Err(TryRecvError::Empty) => return Ok(true),
                Err(TryRecvError::Disconnected) => return self.disconnected(),
            }
        }
        Ok(false)
    }

    /// Blocks and routes batches until the stream closes or the reader stops.
    ///
    /// # Errors
    ///
    /// Same as [`Session::drain_into`].
    pub fn run_into(&mut self, target: &mut dyn ActionTarget) -> SessionResult<()> {
        while !self.finished {
            match self.events.recv() {
                Ok(event) => self.apply(event, target)?,
                Err(_) => {
                    self.disconnected()?;
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, event: SessionEvent, target: &mut dyn ActionTarget) -> SessionResult<()> {
        match event {
            SessionEvent::Actions(actions) => {
                for action in &actions {
                    route(action, target);
                }
            }
            SessionEvent::Closed | SessionEvent::Stopped => {
                self.finished = true;
                self.join();
            }
            SessionEvent::Failed(message) => {
                self.finished = true;
                self.join();
                return Err(SessionError::ReaderFailed(message));
            }
        }
        Ok(())
    }

    fn disconnected(&mut self) -> SessionResult<bool> {
        self.finished = true;
        self.join();
        Err(SessionError::Disconnected)
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("session reader panicked");
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
