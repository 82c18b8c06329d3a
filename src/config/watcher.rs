//! Connection source watching
//!
//! Watches the parent directory of every source (so editors that save via
//! temp file + rename are seen) and reports changes to the source files.

use crate::{log_debug, log_error, log_info};
use notify::{Error, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    collections::{BTreeSet, HashSet},
    ffi::OsString,
    path::PathBuf,
    sync::mpsc::{self, Receiver},
    time::Duration,
};

const DEBOUNCE: Duration = Duration::from_millis(500);

fn should_reload_for_event(event: &Event, watched_files: &HashSet<OsString>) -> bool {
    (event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove())
        && event
            .paths
            .iter()
            .any(|path| path.file_name().is_some_and(|name| watched_files.contains(name)))
}

fn watch_directories(sources: &[PathBuf]) -> BTreeSet<PathBuf> {
    sources
        .iter()
        .map(|source| match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        })
        .collect()
}

pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<()>,
}

impl SourceWatcher {
    /// Start watching `sources`; fails when the platform watcher cannot start.
    pub fn new(sources: &[PathBuf]) -> Result<Self, Error> {
        let (tx, rx) = mpsc::channel();
        let watched_files: HashSet<OsString> = sources.iter().filter_map(|source| source.file_name().map(OsString::from)).collect();

        log_debug!("Initializing source watcher for {:?}", sources);
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, Error>| match res {
                Ok(event) if should_reload_for_event(&event, &watched_files) => {
                    log_debug!("Source change detected: {:?}", event);
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(err) => log_error!("Source watcher error: {}", err),
            },
            notify::Config::default(),
        )?;

        for directory in watch_directories(sources) {
            if !directory.is_dir() {
                log_debug!("Not watching missing directory {:?}", directory);
                continue;
            }
            log_info!("Watching directory: {:?}", directory);
            watcher.watch(&directory, RecursiveMode::NonRecursive)?;
        }

        Ok(Self { _watcher: watcher, rx })
    }

    /// Block until a source changes, then swallow the burst of events that
    /// usually follows. Returns `false` once the watcher has shut down.
    pub fn wait_for_change(&self) -> bool {
        if self.rx.recv().is_err() {
            return false;
        }
        while self.rx.recv_timeout(DEBOUNCE).is_ok() {}
        true
    }
}

#[cfg(test)]
#[path = "../test/config/watcher.rs"]
mod tests;
