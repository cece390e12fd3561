//! Logging bootstrap for the core crate.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Keep events metadata-only; quote text never reaches the log.
//!
//! # Invariants
//! - Initialization is idempotent for the same directory and never panics.
//! - Re-initialization with a different directory is rejected.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "quotedeck";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Logging bootstrap failure.
#[derive(Debug)]
pub enum LoggingError {
    /// `log_dir` is empty or not absolute.
    InvalidLogDir(String),
    /// Already initialized against a different directory.
    AlreadyInitialized(PathBuf),
    /// Backend setup failed (directory creation, logger start).
    Backend(String),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogDir(dir) => {
                write!(f, "log_dir must be a non-empty absolute path, got `{dir}`")
            }
            Self::AlreadyInitialized(dir) => write!(
                f,
                "logging already initialized at `{}`; refusing to switch",
                dir.display()
            ),
            Self::Backend(message) => write!(f, "logging backend setup failed: {message}"),
        }
    }
}

impl Error for LoggingError {}

/// Initializes rolling file logging under `log_dir` at the given level
/// (a `flexi_logger` level string such as `info` or `debug`).
///
/// Idempotent for the same directory; a second call with a different
/// directory is rejected. Callers that skip initialization (tests, embedders
/// with their own logger) lose nothing: library logging is best-effort.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<(), LoggingError> {
    let log_dir = normalize_log_dir(log_dir.as_ref())?;

    let state = LOGGING_STATE.get_or_try_init(|| {
        std::fs::create_dir_all(&log_dir)
            .map_err(|err| LoggingError::Backend(err.to_string()))?;

        let logger = Logger::try_with_str(level)
            .map_err(|err| LoggingError::Backend(err.to_string()))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| LoggingError::Backend(err.to_string()))?;

        info!(
            "event=core_init module=core status=ok version={}",
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            log_dir: log_dir.clone(),
            _logger: logger,
        })
    })?;

    if state.log_dir != log_dir {
        return Err(LoggingError::AlreadyInitialized(state.log_dir.clone()));
    }
    Ok(())
}

/// Returns the active log directory, or `None` before initialization.
pub fn logging_status() -> Option<PathBuf> {
    LOGGING_STATE.get().map(|state| state.log_dir.clone())
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    if log_dir.as_os_str().is_empty() || !log_dir.is_absolute() {
        return Err(LoggingError::InvalidLogDir(
            log_dir.display().to_string(),
        ));
    }
    Ok(log_dir.to_path_buf())
}
