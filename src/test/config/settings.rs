use super::Settings;
use crate::template::Templates;
use std::path::{Path, PathBuf};

#[test]
fn defaults_match_builtin_templates() {
    let settings = Settings::default();
    assert_eq!(settings.templates(), Templates::default());
    assert!(!settings.search_options().match_names);
}

#[test]
fn reads_camel_case_keys_and_keeps_defaults_for_missing_ones() {
    let yaml = r#"
sshConnectionString: "ssh -p {port} {variables} {host}"
extraYamlFiles:
  - team.yaml
  - /etc/tconn/shared.yaml
searchNames: true
"#;
    let settings: Settings = serde_yml::from_str(yaml).expect("settings should parse");
    assert_eq!(settings.ssh_connection_string, "ssh -p {port} {variables} {host}");
    assert_eq!(settings.telnet_connection_string, "telnet {variables} {host}");
    assert_eq!(settings.extra_yaml_files.len(), 2);
    assert!(settings.search_options().match_names);
    assert!(!settings.debug_mode);
}

#[test]
fn rejects_unknown_keys() {
    let err = serde_yml::from_str::<Settings>("sshTemplate: ssh {host}\n").expect_err("unknown key should fail");
    assert!(err.to_string().contains("unknown field"));
}

#[test]
fn sources_put_primary_first_then_extras_then_additional() {
    let settings = Settings {
        extra_yaml_files: vec![PathBuf::from("team.yaml"), PathBuf::from("/etc/tconn/shared.yaml")],
        ..Settings::default()
    };

    let sources = settings.sources(Path::new("/work"), &[PathBuf::from("cli.yaml")]);
    assert_eq!(
        sources,
        vec![
            PathBuf::from("/work/connections.yaml"),
            PathBuf::from("/work/team.yaml"),
            PathBuf::from("/etc/tconn/shared.yaml"),
            PathBuf::from("cli.yaml"),
        ]
    );
}
