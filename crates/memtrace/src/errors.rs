use std::{error::Error, fmt::Display};

#[derive(Debug)]
pub enum TraceError {
    /// The underlying reader failed.
    Io(std::io::Error),
    /// A line could not be parsed into an event. Lines are numbered from 1.
    Malformed { line: usize, reason: String },
}

impl Error for TraceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TraceError::Io(err) => Some(err),
            TraceError::Malformed { .. } => None,
        }
    }
}

impl Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceError::Io(err) => write!(f, "Cannot read trace: {}", err),
            TraceError::Malformed { line, reason } => {
                write!(f, "Badly formatted trace at line {}: {}", line, reason)
            }
        }
    }
}

impl From<std::io::Error> for TraceError {
    fn from(err: std::io::Error) -> Self {
        TraceError::Io(err)
    }
}
