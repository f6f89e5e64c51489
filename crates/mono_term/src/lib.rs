//! Session plumbing around `mono_parser_core`: options, a UTF-8 decoder for the
//! raw output stream, the reader thread and a reference action target.

mod errors;
pub use errors::{SessionError, SessionResult};

mod options;
pub use options::Options;

mod session;
pub use session::{Session, SessionEvent};

pub mod transcript;
pub use transcript::Transcript;

mod utf8;
pub use utf8::Utf8Decoder;
