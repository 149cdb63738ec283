use std::{fmt, io};

/// Failure reported by a single sink. Never surfaced to `emit` callers; the
/// logger forwards it to its error handler instead.
#[derive(Debug)]
pub enum SinkError {
    Io(io::Error),
    /// The sink panicked while handling a record.
    Panicked,
    /// The host platform's debug channel rejected the line.
    Platform(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Io(e) => write!(f, "IO error: {}", e),
            SinkError::Panicked => write!(f, "panicked"),
            SinkError::Platform(s) => write!(f, "platform debug output failed: {}", s),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        SinkError::Io(e)
    }
}
