//! Logging infrastructure for tiny-webhook.
//!
//! Two layers work together:
//! - the global `tracing` subscriber set up by [`init`], which is the console sink
//! - the [`EventLog`] service, which gates messages by configured severity,
//!   keeps them in memory for the web portal and copies them to the log file

mod event_log;
#[cfg(test)]
mod tests;

pub use event_log::{EventLog, Severity};

use crate::config::{LogFormat, LogLevels};
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing a filter directive
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Console filter matching the event log levels.
///
/// Lines recorded at debug level are echoed as `tracing` debug events, so the
/// console has to let debug through whenever `levels.debug` is on. Chatty
/// transport crates stay at info.
pub fn default_directive(levels: &LogLevels) -> &'static str {
    if levels.debug {
        "debug,hyper=info,hyper_util=info,h2=info"
    } else {
        "info"
    }
}

/// Filter directive for the console when none was given explicitly.
///
/// Returns `None` when `RUST_LOG` is set, so [`init`] reads it from the
/// environment; otherwise [`default_directive`] for `levels`.
pub fn console_directive(levels: &LogLevels) -> Option<String> {
    match std::env::var("RUST_LOG") {
        Ok(value) if !value.trim().is_empty() => None,
        _ => Some(default_directive(levels).to_string()),
    }
}

/// Initialize the console logging system.
///
/// `directive` overrides `RUST_LOG` when given (for example `"debug"` or
/// `"tiny_webhook=trace,tower_http=warn"`). Calling this more than once is
/// harmless; later calls leave the first subscriber in place.
pub fn init(format: LogFormat, directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| LogError::InvalidFilter(e.to_string()))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let result = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .try_init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
    };

    // try_init only fails when a global subscriber is already installed
    if let Err(e) = result {
        tracing::debug!("Console logging already initialized: {}", e);
    }

    Ok(())
}

/// Create a non-blocking writer appending to `path`.
///
/// The returned guard flushes pending lines when dropped and must be kept alive
/// as long as the writer is in use.
pub(crate) fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    // Ensure the directory exists
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path.file_name().ok_or_else(|| {
        LogError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Log file path has no file name: {}", path.display()),
        ))
    })?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Never rotate: the log file keeps growing for the process lifetime
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(directory)
        .map_err(|e| LogError::IoError(std::io::Error::other(e.to_string())))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    Ok((non_blocking, guard))
}
