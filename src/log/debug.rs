//! File-backed diagnostic log
//!
//! Entries are queued to a writer thread and land in `~/.tconn/logs/tconn.log`
//! with a timestamp and level prefix.

use super::{LogError, LogLevel, formatter::LogFormatter};
use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        mpsc::{self, Receiver, RecvTimeoutError, SyncSender},
    },
    thread,
    time::{Duration, Instant},
};

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

const LOG_FLUSH_BYTES: usize = 16 * 1024;
const LOG_FLUSH_INTERVAL: Duration = Duration::from_millis(100);
const LOG_QUEUE_CAPACITY: usize = 2048;
#[cfg(unix)]
const PRIVATE_LOG_DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const PRIVATE_LOG_FILE_MODE: u32 = 0o600;

enum LogCommand {
    Entry(LogLevel, String),
    Flush(SyncSender<Result<(), String>>),
}

struct WorkerState {
    writer: Option<BufWriter<File>>,
    pending_bytes: usize,
    last_flush: Instant,
    last_error: Option<String>,
}

impl WorkerState {
    fn new() -> Self {
        Self {
            writer: None,
            pending_bytes: 0,
            last_flush: Instant::now(),
            last_error: None,
        }
    }
}

#[derive(Clone)]
pub(super) struct DebugLogger {
    formatter: LogFormatter,
    worker_tx: Arc<Mutex<Option<SyncSender<LogCommand>>>>,
}

impl DebugLogger {
    pub(super) fn new() -> Self {
        Self {
            formatter: LogFormatter::new(true, true),
            worker_tx: Arc::new(Mutex::new(None)),
        }
    }

    pub(super) fn log(&self, level: LogLevel, message: &str) -> Result<(), LogError> {
        let tx = self.ensure_worker()?;
        tx.send(LogCommand::Entry(level, message.to_string()))
            .map_err(|err| LogError::WorkerError(format!("failed to enqueue log entry: {}", err)))
    }

    pub(super) fn flush(&self) -> Result<(), LogError> {
        let tx = {
            let guard = match self.worker_tx.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.as_ref().cloned()
        };

        // Nothing was ever logged, so there is nothing to flush.
        let Some(tx) = tx else {
            return Ok(());
        };

        let (ack_tx, ack_rx) = mpsc::sync_channel(0);
        tx.send(LogCommand::Flush(ack_tx))
            .map_err(|err| LogError::WorkerError(format!("failed to enqueue log flush: {}", err)))?;

        match ack_rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err_msg)) => Err(LogError::WorkerError(err_msg)),
            Err(err) => Err(LogError::WorkerError(format!("failed waiting for log flush ack: {}", err))),
        }
    }

    fn ensure_worker(&self) -> Result<SyncSender<LogCommand>, LogError> {
        let mut guard = match self.worker_tx.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                eprintln!("Log worker lock poisoned; continuing with recovered state");
                poisoned.into_inner()
            }
        };
        if let Some(existing_tx) = guard.as_ref() {
            return Ok(existing_tx.clone());
        }

        let (tx, rx) = mpsc::sync_channel(LOG_QUEUE_CAPACITY);
        let formatter = self.formatter.clone();

        thread::Builder::new()
            .name("log-writer".to_string())
            .spawn(move || run_worker(rx, formatter))
            .map_err(|err| LogError::WorkerError(format!("failed to spawn log worker: {}", err)))?;

        *guard = Some(tx.clone());
        Ok(tx)
    }
}

fn log_file_path() -> Result<PathBuf, LogError> {
    let home_dir = dirs::home_dir().ok_or_else(|| LogError::DirectoryCreationError("Home directory not found".to_string()))?;
    let log_dir = home_dir.join(".tconn").join("logs");
    create_private_directory(&log_dir)?;
    Ok(log_dir.join("tconn.log"))
}

fn create_private_directory(path: &Path) -> Result<(), LogError> {
    fs::create_dir_all(path)?;
    set_private_permissions(path, true)
}

fn open_private_append_file(path: &Path) -> Result<File, LogError> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        options.mode(PRIVATE_LOG_FILE_MODE);
    }
    let file = options.open(path)?;
    set_private_permissions(path, false)?;
    Ok(file)
}

#[cfg(unix)]
fn set_private_permissions(path: &Path, is_dir: bool) -> Result<(), LogError> {
    let mode = if is_dir { PRIVATE_LOG_DIR_MODE } else { PRIVATE_LOG_FILE_MODE };
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_private_permissions(_path: &Path, _is_dir: bool) -> Result<(), LogError> {
    Ok(())
}

fn run_worker(receiver: Receiver<LogCommand>, formatter: LogFormatter) {
    let mut state = WorkerState::new();

    loop {
        match receiver.recv_timeout(LOG_FLUSH_INTERVAL) {
            Ok(LogCommand::Entry(level, message)) => {
                if let Err(err) = write_entry(&mut state, &formatter, level, &message) {
                    state.last_error = Some(err.to_string());
                }
            }
            Ok(LogCommand::Flush(ack_tx)) => {
                let result = flush_worker(&mut state).map_err(|err| err.to_string());
                let _ = ack_tx.send(result);
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Err(err) = flush_if_due(&mut state) {
                    state.last_error = Some(err.to_string());
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                let _ = flush_worker(&mut state);
                break;
            }
        }
    }
}

fn write_entry(state: &mut WorkerState, formatter: &LogFormatter, level: LogLevel, message: &str) -> Result<(), LogError> {
    if state.writer.is_none() {
        state.writer = Some(BufWriter::new(open_private_append_file(&log_file_path()?)?));
    }

    let formatted = formatter.format(Some(level), message);
    if let Some(writer) = state.writer.as_mut() {
        writer.write_all(formatted.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    state.pending_bytes = state.pending_bytes.saturating_add(formatted.len() + 1);

    flush_if_due(state)
}

fn flush_if_due(state: &mut WorkerState) -> Result<(), LogError> {
    if should_flush(state.pending_bytes, state.last_flush.elapsed()) {
        flush_writer(state)?;
    }
    Ok(())
}

fn flush_writer(state: &mut WorkerState) -> Result<(), LogError> {
    if let Some(writer) = state.writer.as_mut() {
        writer.flush()?;
        state.pending_bytes = 0;
        state.last_flush = Instant::now();
    }
    Ok(())
}

fn flush_worker(state: &mut WorkerState) -> Result<(), LogError> {
    flush_writer(state)?;
    if let Some(last_error) = state.last_error.take() {
        return Err(LogError::WorkerError(last_error));
    }
    Ok(())
}

fn should_flush(pending_bytes: usize, elapsed_since_flush: Duration) -> bool {
    pending_bytes >= LOG_FLUSH_BYTES || elapsed_since_flush >= LOG_FLUSH_INTERVAL
}

#[cfg(test)]
#[path = "../test/log/debug.rs"]
mod tests;
