//! Launching through the operating system.

use super::{LaunchError, Launcher};
use crate::{command_path, log_debug, log_error};
use std::{
    io::{self, IsTerminal, Write},
    process::{Command, ExitCode, ExitStatus},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn run_command(&self, title: &str, command: &str) -> Result<ExitCode, LaunchError> {
        set_terminal_title(title);

        let shell = command_path::shell_path()?;
        let mut process = Command::new(&shell);
        process.args(shell_args(command));
        log_debug!("Spawning {:?} for '{}'", shell, title);

        let status = process.status().map_err(|err| {
            log_error!("Failed to spawn session shell: {}", err);
            err
        })?;
        Ok(map_exit_status(status))
    }

    fn open_url(&self, url: &str) -> Result<ExitCode, LaunchError> {
        let opener = command_path::url_opener_path()?;
        let mut process = Command::new(&opener);
        process.arg(url);
        log_debug!("Opening {} with {:?}", url, opener);

        let status = process.status().map_err(|err| {
            log_error!("Failed to spawn URL opener: {}", err);
            err
        })?;
        Ok(map_exit_status(status))
    }
}

#[cfg(not(windows))]
fn shell_args(command: &str) -> Vec<String> {
    vec!["-c".to_string(), command.to_string()]
}

#[cfg(windows)]
fn shell_args(command: &str) -> Vec<String> {
    vec!["/C".to_string(), command.to_string()]
}

fn set_terminal_title(title: &str) {
    let mut stdout = io::stdout();
    if stdout.is_terminal() {
        let sanitized: String = title.chars().filter(|ch| !ch.is_control()).collect();
        let _ = write!(stdout, "\x1b]0;{}\x07", sanitized);
        let _ = stdout.flush();
    }
}

fn map_exit_status(status: ExitStatus) -> ExitCode {
    map_exit_code(status.success(), status.code())
}

fn map_exit_code(success: bool, code: Option<i32>) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        // Signals have no code; clamp everything else into u8.
        let clamped_code = code.map_or(1, |status_code| u8::try_from(status_code).unwrap_or(255));
        ExitCode::from(clamped_code)
    }
}

#[cfg(test)]
#[path = "../test/launcher/system.rs"]
mod tests;
