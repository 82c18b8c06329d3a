use crate::connections::PRIMARY_FILE_NAME;
use crate::filter::SearchOptions;
use crate::template::{DEFAULT_GENERIC_TEMPLATE, DEFAULT_SSH_TEMPLATE, DEFAULT_TELNET_TEMPLATE, Templates};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User settings read from `tconn-settings.yaml`.
///
/// Keys are camelCase; unknown keys are rejected and missing keys take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Settings {
    pub ssh_connection_string: String,
    pub telnet_connection_string: String,
    pub generic_connection_string: String,
    /// Connection files merged after the primary `connections.yaml`, in order.
    pub extra_yaml_files: Vec<PathBuf>,
    /// Match search queries against leaf names as well.
    pub search_names: bool,
    pub debug_mode: bool,
    #[serde(skip)]
    pub settings_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ssh_connection_string: DEFAULT_SSH_TEMPLATE.to_string(),
            telnet_connection_string: DEFAULT_TELNET_TEMPLATE.to_string(),
            generic_connection_string: DEFAULT_GENERIC_TEMPLATE.to_string(),
            extra_yaml_files: Vec::new(),
            search_names: false,
            debug_mode: false,
            settings_path: None,
        }
    }
}

impl Settings {
    pub fn templates(&self) -> Templates {
        Templates {
            ssh: self.ssh_connection_string.clone(),
            telnet: self.telnet_connection_string.clone(),
            generic: self.generic_connection_string.clone(),
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            match_names: self.search_names,
        }
    }

    /// Connection sources in load order: the primary file, the configured
    /// extras, then `additional` (command-line files).
    ///
    /// Relative extras resolve against `config_dir`; `additional` paths are
    /// used as given.
    pub fn sources(&self, config_dir: &Path, additional: &[PathBuf]) -> Vec<PathBuf> {
        let mut sources = Vec::with_capacity(1 + self.extra_yaml_files.len() + additional.len());
        sources.push(config_dir.join(PRIMARY_FILE_NAME));
        sources.extend(self.extra_yaml_files.iter().map(|extra| config_dir.join(extra)));
        sources.extend(additional.iter().cloned());
        sources
    }
}

#[cfg(test)]
#[path = "../test/config/settings.rs"]
mod tests;
