use std::{error::Error, fmt, io, path::PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    IoError(io::Error),
    /// A settings file given explicitly does not exist.
    NotFound(PathBuf),
    /// The settings file is not valid YAML or has unknown keys.
    ParseError { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigError::NotFound(path) => write!(f, "settings file {} does not exist", path.display()),
            ConfigError::ParseError { path, message } => write!(f, "error parsing {}: {}", path.display(), message),
        }
    }
}

impl Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(error: io::Error) -> Self {
        ConfigError::IoError(error)
    }
}
