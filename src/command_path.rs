//! Locating the programs the system launcher starts.
//!
//! Lookups go through `PATH` once per process and are cached. A located
//! program must be a regular file; on Unix it must also be executable, not
//! world-writable, and owned by root or the current user.

use once_cell::sync::OnceCell;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[cfg(unix)]
use std::os::unix::fs::{MetadataExt, PermissionsExt};

#[cfg(unix)]
const EXECUTE_BITS: u32 = 0o111;
#[cfg(unix)]
const WORLD_WRITABLE_BIT: u32 = 0o002;

#[cfg(windows)]
const SHELL_BINARY: &str = "cmd";
#[cfg(not(windows))]
const SHELL_BINARY: &str = "sh";

#[cfg(target_os = "macos")]
const URL_OPENER_BINARY: &str = "open";
#[cfg(windows)]
const URL_OPENER_BINARY: &str = "explorer";
#[cfg(not(any(target_os = "macos", windows)))]
const URL_OPENER_BINARY: &str = "xdg-open";

#[derive(Debug, Clone)]
struct CachedPathError {
    kind: io::ErrorKind,
    message: String,
}

impl CachedPathError {
    fn from_io(err: io::Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

static SHELL_PATH: OnceCell<Result<PathBuf, CachedPathError>> = OnceCell::new();
static URL_OPENER_PATH: OnceCell<Result<PathBuf, CachedPathError>> = OnceCell::new();

fn resolve_cached(cell: &OnceCell<Result<PathBuf, CachedPathError>>, binary: &'static str) -> io::Result<PathBuf> {
    let cached = cell.get_or_init(|| resolve_path_from_env(binary).map_err(CachedPathError::from_io));
    match cached {
        Ok(path) => Ok(path.clone()),
        Err(err) => Err(io::Error::new(err.kind, format!("{binary}: {}", err.message))),
    }
}

/// Shell used to run resolved command lines.
pub(crate) fn shell_path() -> io::Result<PathBuf> {
    resolve_cached(&SHELL_PATH, SHELL_BINARY)
}

/// Desktop program that opens URLs in the default browser.
pub(crate) fn url_opener_path() -> io::Result<PathBuf> {
    resolve_cached(&URL_OPENER_PATH, URL_OPENER_BINARY)
}

fn resolve_path_from_env(binary: &str) -> io::Result<PathBuf> {
    let located = which::which(binary).map_err(|err| io::Error::new(io::ErrorKind::NotFound, format!("{binary} not found in PATH: {err}")))?;
    validate_executable_path(&located, binary)
}

fn validate_executable_path(path: &Path, label: &str) -> io::Result<PathBuf> {
    let canonical = fs::canonicalize(path).map_err(|err| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("unable to canonicalize {label} path '{}': {err}", path.display()),
        )
    })?;

    let metadata = fs::metadata(&canonical)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{label} path '{}' is not a regular file", canonical.display()),
        ));
    }

    #[cfg(unix)]
    {
        validate_unix_permissions(&canonical, &metadata, label)?;
    }

    Ok(canonical)
}

#[cfg(unix)]
fn validate_unix_permissions(path: &Path, metadata: &fs::Metadata, label: &str) -> io::Result<()> {
    let mode = metadata.permissions().mode();
    if mode & WORLD_WRITABLE_BIT != 0 {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{label} path '{}' is world-writable", path.display()),
        ));
    }

    if mode & EXECUTE_BITS == 0 {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{label} path '{}' is not executable", path.display()),
        ));
    }

    let owner_uid = metadata.uid();
    let effective_uid = nix::unistd::Uid::effective().as_raw();
    if owner_uid != 0 && owner_uid != effective_uid {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{label} path '{}' must be owned by root or the current user", path.display()),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "test/command_path.rs"]
mod tests;
