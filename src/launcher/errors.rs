use crate::connections::Leaf;
use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum LaunchError {
    /// The leaf lacks a field needed to launch it.
    MissingTarget { name: String, field: &'static str },
    /// No leaf matches the requested target.
    UnknownTarget(String),
    /// A bare name matched more than one leaf.
    AmbiguousTarget { target: String, matches: Vec<String> },
    /// The launch program could not be found or started.
    Spawn(io::Error),
}

impl LaunchError {
    pub(crate) fn missing_target(leaf: &Leaf, field: &'static str) -> Self {
        LaunchError::MissingTarget {
            name: leaf.name.clone(),
            field,
        }
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::MissingTarget { name, field } => write!(f, "connection '{}' has no {}", name, field),
            LaunchError::UnknownTarget(target) => write!(f, "no connection named '{}'", target),
            LaunchError::AmbiguousTarget { target, matches } => {
                write!(f, "'{}' matches several connections: {}", target, matches.join(", "))
            }
            LaunchError::Spawn(err) => write!(f, "failed to start session: {}", err),
        }
    }
}

impl Error for LaunchError {}

impl From<io::Error> for LaunchError {
    fn from(err: io::Error) -> Self {
        LaunchError::Spawn(err)
    }
}
