use super::{SETTINGS_FILE_NAME, SettingsLoader, parse_settings};
use crate::config::ConfigError;
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_dir(prefix: &str) -> PathBuf {
    let unique = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock should be after epoch").as_nanos();
    let dir = std::env::temp_dir().join(format!("tconn-settings-{prefix}-{unique}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn empty_settings_file_means_defaults() {
    let settings = parse_settings("  \n").expect("empty settings should parse");
    assert_eq!(settings.ssh_connection_string, "ssh {variables} {host}");
}

#[test]
fn explicit_path_must_exist() {
    let dir = temp_dir("explicit-missing");
    let missing = dir.join("nope.yaml");
    let result = SettingsLoader::new(Some(missing.clone()), &dir);
    assert!(matches!(result, Err(ConfigError::NotFound(path)) if path == missing));
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn explicit_path_is_loaded_and_recorded() {
    let dir = temp_dir("explicit");
    let path = dir.join("custom.yaml");
    fs::write(&path, "telnetConnectionString: \"telnet {host} {port}\"\n").expect("write settings");

    let settings = SettingsLoader::new(Some(path.clone()), &dir).expect("loader").load_settings().expect("settings");
    assert_eq!(settings.telnet_connection_string, "telnet {host} {port}");
    assert_eq!(settings.settings_path, Some(path));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn config_dir_is_searched_after_home_locations() {
    let home = temp_dir("home");
    let config_dir = temp_dir("workspace");
    fs::write(config_dir.join(SETTINGS_FILE_NAME), "searchNames: true\n").expect("write workspace settings");

    assert_eq!(
        SettingsLoader::find_settings_path(Some(&home), &config_dir),
        Some(config_dir.join(SETTINGS_FILE_NAME))
    );

    fs::create_dir_all(home.join(".tconn")).expect("create home settings dir");
    fs::write(home.join(".tconn").join(SETTINGS_FILE_NAME), "searchNames: false\n").expect("write home settings");
    assert_eq!(
        SettingsLoader::find_settings_path(Some(&home), &config_dir),
        Some(home.join(".tconn").join(SETTINGS_FILE_NAME))
    );

    let _ = fs::remove_dir_all(home);
    let _ = fs::remove_dir_all(config_dir);
}

#[test]
fn invalid_settings_file_is_a_parse_error() {
    let dir = temp_dir("invalid");
    let path = dir.join(SETTINGS_FILE_NAME);
    fs::write(&path, "unknownKey: 1\n").expect("write settings");

    let result = SettingsLoader::new(Some(path.clone()), &dir).expect("loader").load_settings();
    assert!(matches!(result, Err(ConfigError::ParseError { path: err_path, .. }) if err_path == path));

    let _ = fs::remove_dir_all(dir);
}
