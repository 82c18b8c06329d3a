//! Session launching
//!
//! The [`Launcher`] trait is the boundary between resolving a leaf and actually
//! starting something. [`SystemLauncher`] runs commands through the platform
//! shell and opens URLs with the desktop opener; [`DryRunLauncher`] only prints.

mod errors;
mod system;

pub use errors::LaunchError;
pub use system::SystemLauncher;

use crate::connections::Leaf;
use crate::template::{LaunchTarget, Templates, resolve_target};
use crate::{log_debug, log_info};
use std::{
    io::{self, Write},
    process::ExitCode,
};

pub trait Launcher {
    /// Run `command` interactively; `title` names the session.
    fn run_command(&self, title: &str, command: &str) -> Result<ExitCode, LaunchError>;

    fn open_url(&self, url: &str) -> Result<ExitCode, LaunchError>;
}

/// Resolve `leaf` and hand it to `launcher`.
///
/// Resolution errors return before the launcher is touched.
pub fn connect(leaf: &Leaf, templates: &Templates, launcher: &dyn Launcher) -> Result<ExitCode, LaunchError> {
    let target = resolve_target(leaf, templates)?;
    log_debug!("Resolved '{}' to {:?}", leaf.name, target);

    match target {
        LaunchTarget::Command(command) => {
            let title = leaf.target_host().unwrap_or(&leaf.name);
            log_info!("Launching '{}': {}", title, command);
            launcher.run_command(title, &command)
        }
        LaunchTarget::Url(url) => {
            log_info!("Opening URL for '{}': {}", leaf.name, url);
            launcher.open_url(&url)
        }
    }
}

/// Prints what would be launched instead of launching it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunLauncher;

impl Launcher for DryRunLauncher {
    fn run_command(&self, _title: &str, command: &str) -> Result<ExitCode, LaunchError> {
        writeln!(io::stdout(), "{}", command).map_err(LaunchError::Spawn)?;
        Ok(ExitCode::SUCCESS)
    }

    fn open_url(&self, url: &str) -> Result<ExitCode, LaunchError> {
        writeln!(io::stdout(), "{}", url).map_err(LaunchError::Spawn)?;
        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
#[path = "test/launcher.rs"]
mod tests;
