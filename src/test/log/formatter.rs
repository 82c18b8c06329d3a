use super::LogFormatter;
use crate::log::LogLevel;

#[test]
fn formats_level_prefix_without_timestamp() {
    let formatter = LogFormatter::new(false, true);
    assert_eq!(formatter.format(Some(LogLevel::Warning), "source skipped"), "[WARN] source skipped");
    assert_eq!(formatter.format(None, "bare"), "bare");
}

#[test]
fn timestamp_precedes_level() {
    let formatter = LogFormatter::new(true, true);
    let line = formatter.format(Some(LogLevel::Info), "loaded");
    assert!(line.ends_with(" [INFO] loaded"), "unexpected line: {line}");
    assert!(line.len() > "[INFO] loaded".len() + 20);
}
