//! Multi-source connection loading
//!
//! Each source is read and parsed on its own. A bad source becomes a
//! [`LoadWarning`] and the remaining sources still load. Progress goes to the
//! [`LoadReporter`] the caller hands in; the loader itself never logs.

use super::model::{ConnectionNode, Forest};
use super::parser::{ParsedDocument, parse_document};
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// Non-fatal problem found while loading one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    FileNotFound(PathBuf),
    Unreadable { path: PathBuf, error: String },
    ParseFailure { path: PathBuf, error: String },
    InvalidShape(PathBuf),
    SkippedEntries { path: PathBuf, count: usize },
}

impl LoadWarning {
    pub fn path(&self) -> &Path {
        match self {
            LoadWarning::FileNotFound(path)
            | LoadWarning::InvalidShape(path)
            | LoadWarning::Unreadable { path, .. }
            | LoadWarning::ParseFailure { path, .. }
            | LoadWarning::SkippedEntries { path, .. } => path,
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::FileNotFound(path) => write!(f, "{}: file not found", path.display()),
            LoadWarning::Unreadable { path, error } => write!(f, "{}: unable to read file: {}", path.display(), error),
            LoadWarning::ParseFailure { path, error } => write!(f, "{}: invalid YAML: {}", path.display(), error),
            LoadWarning::InvalidShape(path) => write!(f, "{}: missing a top-level `connections` list", path.display()),
            LoadWarning::SkippedEntries { path, count } => {
                write!(f, "{}: skipped {} non-mapping entr{}", path.display(), count, if *count == 1 { "y" } else { "ies" })
            }
        }
    }
}

/// The forest built from every readable source plus what went wrong with the rest.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub forest: Forest,
    pub warnings: Vec<LoadWarning>,
}

/// Receives load progress as each source is handled.
pub trait LoadReporter {
    fn source_loaded(&mut self, _path: &Path, _roots: usize) {}
    fn warning(&mut self, _warning: &LoadWarning) {}
}

impl LoadReporter for () {}

/// Load every source in order and concatenate their connections.
pub fn load<P: AsRef<Path>>(sources: &[P]) -> LoadReport {
    load_with(sources, &mut ())
}

/// [`load`], telling `reporter` about each source as it goes.
pub fn load_with<P: AsRef<Path>, R: LoadReporter + ?Sized>(sources: &[P], reporter: &mut R) -> LoadReport {
    let mut roots = Vec::new();
    let mut warnings = Vec::new();

    for source in sources {
        let path = source.as_ref();
        let first_new = warnings.len();
        if let Some(nodes) = load_source(path, &mut warnings) {
            reporter.source_loaded(path, nodes.len());
            roots.extend(nodes);
        }
        for warning in &warnings[first_new..] {
            reporter.warning(warning);
        }
    }

    LoadReport {
        forest: Forest::new(roots),
        warnings,
    }
}

fn load_source(path: &Path, warnings: &mut Vec<LoadWarning>) -> Option<Vec<ConnectionNode>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warnings.push(LoadWarning::FileNotFound(path.to_path_buf()));
            return None;
        }
        Err(err) => {
            warnings.push(LoadWarning::Unreadable {
                path: path.to_path_buf(),
                error: err.to_string(),
            });
            return None;
        }
    };

    match parse_document(&content) {
        Ok(ParsedDocument::Connections { nodes, skipped }) => {
            if skipped > 0 {
                warnings.push(LoadWarning::SkippedEntries {
                    path: path.to_path_buf(),
                    count: skipped,
                });
            }
            Some(nodes)
        }
        Ok(ParsedDocument::InvalidShape) => {
            warnings.push(LoadWarning::InvalidShape(path.to_path_buf()));
            None
        }
        Err(err) => {
            warnings.push(LoadWarning::ParseFailure {
                path: path.to_path_buf(),
                error: err.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
#[path = "../test/connections/loader.rs"]
mod tests;
