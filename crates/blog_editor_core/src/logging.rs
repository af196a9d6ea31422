//! Logging bootstrap for hosts that want file logs.
//!
//! # Responsibility
//! - Start the rolling file logger once per process.
//! - Capture panics as sanitized log lines.
//!
//! # Invariants
//! - Init is idempotent for an identical `(level, log_dir)` pair.
//! - Re-initialization with another level or directory is rejected.
//! - Init never panics.
//!
//! Core code only talks to the `log` facade. Without the `file-logging`
//! feature (e.g. in the wasm build) no backend is installed here.

use std::error::Error;
use std::fmt::{Display, Formatter};
#[cfg(feature = "file-logging")]
use std::path::{Path, PathBuf};

#[cfg(feature = "file-logging")]
pub use backend::{init_logging, logging_status};

/// Logging setup failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    EmptyLogDir,
    RelativeLogDir(String),
    CreateDir { path: String, reason: String },
    Backend(String),
    AlreadyInitialized { active: String, requested: String },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(path) => {
                write!(f, "log_dir must be an absolute path, got `{path}`")
            }
            Self::CreateDir { path, reason } => {
                write!(f, "failed to create log directory `{path}`: {reason}")
            }
            Self::Backend(reason) => write!(f, "failed to start logger: {reason}"),
            Self::AlreadyInitialized { active, requested } => write!(
                f,
                "logging already initialized with `{active}`; refusing to switch to `{requested}`"
            ),
        }
    }
}

impl Error for LoggingError {}

/// Default level for the current build mode (`debug` or `info`).
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Normalizes a user-supplied level name.
pub fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

#[cfg(feature = "file-logging")]
fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, LoggingError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(LoggingError::EmptyLogDir);
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(LoggingError::RelativeLogDir(trimmed.to_string()));
    }
    Ok(path.to_path_buf())
}

#[cfg_attr(not(feature = "file-logging"), allow(dead_code))]
fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

#[cfg(feature = "file-logging")]
mod backend {
    use super::{normalize_level, normalize_log_dir, sanitize_message, LoggingError};
    use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
    use log::{error, info};
    use once_cell::sync::OnceCell;
    use std::path::{Path, PathBuf};

    const LOG_FILE_BASENAME: &str = "blog_editor";
    const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
    const MAX_LOG_FILES: usize = 3;
    const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

    static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
    static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

    struct LoggingState {
        level: &'static str,
        log_dir: PathBuf,
        _logger: LoggerHandle,
    }

    impl LoggingState {
        fn check_matches(&self, level: &'static str, log_dir: &Path) -> Result<(), LoggingError> {
            if self.log_dir.as_path() != log_dir || self.level != level {
                return Err(LoggingError::AlreadyInitialized {
                    active: format!("{} at {}", self.level, self.log_dir.display()),
                    requested: format!("{} at {}", level, log_dir.display()),
                });
            }
            Ok(())
        }
    }

    /// Starts rolling file logs under `log_dir` at `level`.
    ///
    /// # Errors
    /// - Unsupported level, empty or relative directory.
    /// - Directory creation or backend start failure.
    /// - A previous call used another level or directory.
    pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
        let level = normalize_level(level)?;
        let log_dir = normalize_log_dir(log_dir)?;

        if let Some(state) = LOGGING_STATE.get() {
            return state.check_matches(level, &log_dir);
        }

        let state = LOGGING_STATE.get_or_try_init(|| start_backend(level, log_dir.clone()))?;
        state.check_matches(level, &log_dir)
    }

    /// Returns `(level, log_dir)` once logging is active.
    pub fn logging_status() -> Option<(&'static str, PathBuf)> {
        LOGGING_STATE
            .get()
            .map(|state| (state.level, state.log_dir.clone()))
    }

    fn start_backend(level: &'static str, log_dir: PathBuf) -> Result<LoggingState, LoggingError> {
        std::fs::create_dir_all(&log_dir).map_err(|err| LoggingError::CreateDir {
            path: log_dir.display().to_string(),
            reason: err.to_string(),
        })?;

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

        install_panic_hook_once();

        info!(
            "event=logging_init module=core status=ok level={} log_dir={} version={}",
            level,
            log_dir.display(),
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level,
            log_dir,
            _logger: logger,
        })
    }

    fn install_panic_hook_once() {
        if PANIC_HOOK_INSTALLED.get().is_some() {
            return;
        }

        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            // Payload may echo authored text; keep it on one short line.
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
                (*message).to_string()
            } else if let Some(message) = panic_info.payload().downcast_ref::<String>() {
                message.clone()
            } else {
                "non-string panic payload".to_string()
            };
            error!(
                "event=panic_captured module=core status=error location={} payload={}",
                location,
                sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
            );
            previous_hook(panic_info);
        }));

        let _ = PANIC_HOOK_INSTALLED.set(());
    }
}
