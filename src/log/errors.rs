//! Logging-related error types

use std::{error::Error, fmt, io};

/// Errors that can occur while writing the debug log
#[derive(Debug)]
pub enum LogError {
    /// I/O error when writing to the log file
    IoError(io::Error),
    /// The log directory could not be located or created
    DirectoryCreationError(String),
    /// The background writer could not be reached
    WorkerError(String),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::IoError(err) => write!(f, "I/O error: {}", err),
            LogError::DirectoryCreationError(msg) => write!(f, "Failed to create directory: {}", msg),
            LogError::WorkerError(msg) => write!(f, "Log writer error: {}", msg),
        }
    }
}

impl Error for LogError {}

impl From<io::Error> for LogError {
    fn from(err: io::Error) -> Self {
        LogError::IoError(err)
    }
}
