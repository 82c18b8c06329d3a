use super::{LoadReporter, LoadWarning, load, load_with};
use crate::connections::ConnectionNode;
use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_dir(prefix: &str) -> PathBuf {
    let unique = SystemTime::now().duration_since(UNIX_EPOCH).expect("clock should be after epoch").as_nanos();
    let dir = std::env::temp_dir().join(format!("tconn-loader-{prefix}-{unique}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

const PRIMARY: &str = r#"
connections:
  - name: Primary
    children:
      - name: alpha
        host: alpha.example
        protocol: ssh
"#;

const EXTRA: &str = r#"
connections:
  - name: beta
    host: beta.example
    protocol: telnet
  - name: gamma
    host: gamma.example
    protocol: ssh
"#;

fn root_names(forest: &crate::connections::Forest) -> Vec<&str> {
    forest.roots().iter().map(ConnectionNode::name).collect()
}

#[test]
fn concatenates_sources_in_order() {
    let dir = temp_dir("order");
    let primary = dir.join("connections.yaml");
    let extra = dir.join("extra.yaml");
    fs::write(&primary, PRIMARY).expect("write primary");
    fs::write(&extra, EXTRA).expect("write extra");

    let report = load(&[&primary, &extra]);
    assert!(report.warnings.is_empty(), "unexpected warnings: {:?}", report.warnings);
    assert_eq!(root_names(&report.forest), vec!["Primary", "beta", "gamma"]);

    let reversed = load(&[&extra, &primary]);
    assert_eq!(root_names(&reversed.forest), vec!["beta", "gamma", "Primary"]);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn missing_source_is_a_warning_not_a_failure() {
    let dir = temp_dir("missing");
    let present = dir.join("connections.yaml");
    let missing = dir.join("nope.yaml");
    fs::write(&present, EXTRA).expect("write source");

    let report = load(&[&missing, &present]);
    assert_eq!(report.warnings, vec![LoadWarning::FileNotFound(missing.clone())]);
    assert_eq!(root_names(&report.forest), vec!["beta", "gamma"]);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn bad_sources_are_isolated() {
    let dir = temp_dir("isolated");
    let broken = dir.join("broken.yaml");
    let wrong_shape = dir.join("shape.yaml");
    let good = dir.join("good.yaml");
    fs::write(&broken, "connections: [unclosed").expect("write broken");
    fs::write(&wrong_shape, "hosts:\n  - name: x\n").expect("write shape");
    fs::write(&good, PRIMARY).expect("write good");

    let report = load(&[&broken, &wrong_shape, &good]);
    assert_eq!(report.warnings.len(), 2);
    assert!(matches!(&report.warnings[0], LoadWarning::ParseFailure { path, .. } if path == &broken));
    assert_eq!(report.warnings[1], LoadWarning::InvalidShape(wrong_shape.clone()));
    assert_eq!(root_names(&report.forest), vec!["Primary"]);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn directory_source_is_unreadable() {
    let dir = temp_dir("unreadable");
    let report = load(&[&dir]);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0], LoadWarning::Unreadable { .. }));
    assert_eq!(report.warnings[0].path(), dir.as_path());
    assert!(report.forest.is_empty());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn skipped_entries_are_reported_alongside_loaded_nodes() {
    let dir = temp_dir("skipped");
    let source = dir.join("connections.yaml");
    fs::write(&source, "connections:\n  - stray\n  - name: ok\n    host: ok.example\n    protocol: ssh\n").expect("write source");

    let report = load(&[&source]);
    assert_eq!(
        report.warnings,
        vec![LoadWarning::SkippedEntries {
            path: source.clone(),
            count: 1
        }]
    );
    assert_eq!(root_names(&report.forest), vec!["ok"]);
    assert_eq!(report.warnings[0].to_string(), format!("{}: skipped 1 non-mapping entry", source.display()));

    let _ = fs::remove_dir_all(dir);
}

#[derive(Default)]
struct RecordingReporter {
    loaded: Vec<(PathBuf, usize)>,
    warnings: Vec<LoadWarning>,
}

impl LoadReporter for RecordingReporter {
    fn source_loaded(&mut self, path: &Path, roots: usize) {
        self.loaded.push((path.to_path_buf(), roots));
    }

    fn warning(&mut self, warning: &LoadWarning) {
        self.warnings.push(warning.clone());
    }
}

#[test]
fn reporter_sees_each_source_and_warning_in_order() {
    let dir = temp_dir("reporter");
    let missing = dir.join("nope.yaml");
    let primary = dir.join("connections.yaml");
    let extra = dir.join("extra.yaml");
    fs::write(&primary, PRIMARY).expect("write primary");
    fs::write(&extra, EXTRA).expect("write extra");

    let mut reporter = RecordingReporter::default();
    let report = load_with(&[&primary, &missing, &extra], &mut reporter);

    assert_eq!(reporter.loaded, vec![(primary.clone(), 1), (extra.clone(), 2)]);
    assert_eq!(reporter.warnings, report.warnings);
    assert_eq!(report.warnings, vec![LoadWarning::FileNotFound(missing.clone())]);
    assert_eq!(root_names(&report.forest), vec!["Primary", "beta", "gamma"]);

    let _ = fs::remove_dir_all(dir);
}
