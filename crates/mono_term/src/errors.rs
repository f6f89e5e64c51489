use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid options file: {0}")]
    OptionsDecode(#[from] toml::de::Error),

    #[error("Could not serialize options: {0}")]
    OptionsEncode(#[from] toml::ser::Error),

    #[error("Reader thread disconnected")]
    Disconnected,

    #[error("Reading session output failed: {0}")]
    ReaderFailed(String),

    #[error("Could not start reader thread: {0}")]
    ThreadSpawn(std::io::Error),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
