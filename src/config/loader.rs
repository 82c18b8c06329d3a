//! Settings file discovery and loading
//!
//! Search order:
//! 1. an explicit `--settings` path (must exist)
//! 2. `~/.tconn/tconn-settings.yaml`
//! 3. `~/tconn-settings.yaml`
//! 4. `<config dir>/tconn-settings.yaml`
//!
//! When nothing is found the defaults apply.

use super::{errors::ConfigError, settings::Settings};
use crate::{log_debug, log_info, log_warn};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const SETTINGS_FILE_NAME: &str = "tconn-settings.yaml";

pub struct SettingsLoader {
    settings_path: Option<PathBuf>,
}

impl SettingsLoader {
    pub fn new(explicit: Option<PathBuf>, config_dir: &Path) -> Result<Self, ConfigError> {
        let settings_path = match explicit {
            Some(path) if path.is_file() => Some(path),
            Some(path) => {
                log_warn!("Explicit settings file {:?} not found", path);
                return Err(ConfigError::NotFound(path));
            }
            None => Self::find_settings_path(dirs::home_dir().as_deref(), config_dir),
        };
        Ok(Self { settings_path })
    }

    fn find_settings_path(home_dir: Option<&Path>, config_dir: &Path) -> Option<PathBuf> {
        log_debug!("Searching for settings file...");
        let mut candidates = Vec::with_capacity(3);
        if let Some(home_dir) = home_dir {
            candidates.push(home_dir.join(".tconn").join(SETTINGS_FILE_NAME));
            candidates.push(home_dir.join(SETTINGS_FILE_NAME));
        }
        candidates.push(config_dir.join(SETTINGS_FILE_NAME));

        for candidate in candidates {
            log_debug!("Checking: {:?}", candidate);
            if candidate.is_file() {
                log_info!("Found settings at: {:?}", candidate);
                return Some(candidate);
            }
        }

        log_debug!("No settings file found, using defaults");
        None
    }

    pub fn load_settings(self) -> Result<Settings, ConfigError> {
        let Some(path) = self.settings_path else {
            return Ok(Settings::default());
        };

        log_info!("Loading settings from: {:?}", path);
        let content = fs::read_to_string(&path).map_err(|err| {
            log_warn!("Failed to read settings file: {}", err);
            err
        })?;

        let mut settings = parse_settings(&content).map_err(|err| {
            log_warn!("Error parsing settings file: {}", err);
            ConfigError::ParseError {
                path: path.clone(),
                message: err.to_string(),
            }
        })?;
        settings.settings_path = Some(path);
        log_debug!("Parsed settings: {:?}", settings);
        Ok(settings)
    }
}

fn parse_settings(content: &str) -> Result<Settings, serde_yml::Error> {
    // An empty file means "all defaults" rather than a parse error.
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yml::from_str::<Settings>(content)
}

#[cfg(test)]
#[path = "../test/config/loader.rs"]
mod tests;
