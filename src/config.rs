//! Configuration management module
//!
//! Provides:
//! - Settings file discovery and YAML parsing (command templates, extra
//!   connection files, search options)
//! - Resolution of the ordered list of connection sources
//! - File watching so listings can refresh when a source changes

mod errors;
mod loader;
mod settings;
mod watcher;

pub use errors::ConfigError;
pub use loader::{SETTINGS_FILE_NAME, SettingsLoader};
pub use settings::Settings;
pub use watcher::SourceWatcher;
