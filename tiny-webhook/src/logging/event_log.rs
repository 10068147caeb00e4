//! In-memory event log.
//!
//! Every component that reports something notable gets a clone of the same
//! [`EventLog`]. Recorded lines are kept for the process lifetime so the web
//! portal can show the most recent ones, echoed to the console through
//! `tracing`, and appended to the log file when one is configured.

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

use super::{Result, create_non_blocking_file};
use crate::config::{LogLevels, LoggingConfig};

/// Severity of an event log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Always recorded, used for fatal startup problems
    Critical,
    Error,
    Warning,
    Debug,
    Info,
}

impl Severity {
    /// Every severity, most severe first.
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Debug,
        Severity::Info,
    ];

    /// Prefix written in front of each recorded line.
    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::Critical => "[CRI]",
            Severity::Error => "[ERR]",
            Severity::Warning => "[WAR]",
            Severity::Debug => "[DBG]",
            Severity::Info => "[INF]",
        }
    }

    /// Key of the switch for this severity under `log.levels`.
    pub fn config_key(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Error => "errors",
            Severity::Warning => "warnings",
            Severity::Debug => "debug",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

impl LogLevels {
    /// Whether lines of `severity` are recorded. Critical always is.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        match severity {
            Severity::Critical => true,
            Severity::Error => self.errors,
            Severity::Warning => self.warnings,
            Severity::Debug => self.debug,
            Severity::Info => self.info,
        }
    }
}

struct Sinks {
    entries: Vec<String>,
    file: Option<NonBlocking>,
}

struct Inner {
    levels: LogLevels,
    sinks: Mutex<Sinks>,
    /// Flushes the file writer once the last clone is dropped
    _guard: Option<WorkerGuard>,
}

/// Process-wide event log service.
///
/// Cloning is cheap and every clone appends to the same buffer. Appends are
/// serialized, so lines from concurrent requests never interleave within a line
/// and each caller's lines keep their order.
#[derive(Clone)]
pub struct EventLog {
    inner: Arc<Inner>,
}

impl EventLog {
    /// Create the event log described by the `log` configuration section,
    /// opening the log file if one is configured.
    pub fn new(config: &LoggingConfig) -> Result<Self> {
        let (file, guard) = match &config.file {
            Some(path) => {
                let (writer, guard) = create_non_blocking_file(path)?;
                (Some(writer), Some(guard))
            }
            None => (None, None),
        };

        Ok(Self::from_parts(config.levels.clone(), file, guard))
    }

    /// Create an in-memory only event log.
    pub fn with_levels(levels: LogLevels) -> Self {
        Self::from_parts(levels, None, None)
    }

    fn from_parts(levels: LogLevels, file: Option<NonBlocking>, guard: Option<WorkerGuard>) -> Self {
        Self {
            inner: Arc::new(Inner {
                levels,
                sinks: Mutex::new(Sinks {
                    entries: Vec::new(),
                    file,
                }),
                _guard: guard,
            }),
        }
    }

    /// Whether lines of `severity` are recorded.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.inner.levels.is_enabled(severity)
    }

    /// Record a message if its severity is enabled.
    pub fn record(&self, severity: Severity, message: impl AsRef<str>) {
        if !self.is_enabled(severity) {
            return;
        }
        let message = message.as_ref();
        let line = format!("{} {}", severity.prefix(), message);

        let mut sinks = self.inner.sinks.lock().unwrap_or_else(PoisonError::into_inner);
        emit_console(severity, message);
        if let Some(file) = sinks.file.as_mut()
            && let Err(e) = writeln!(file, "{}", line)
        {
            tracing::warn!("Failed to write to log file: {}", e);
        }
        sinks.entries.push(line);
    }

    pub fn critical(&self, message: impl AsRef<str>) {
        self.record(Severity::Critical, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.record(Severity::Error, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.record(Severity::Warning, message);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.record(Severity::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.record(Severity::Info, message);
    }

    /// The last `n` recorded lines, most recent first.
    pub fn recent(&self, n: usize) -> Vec<String> {
        let sinks = self.inner.sinks.lock().unwrap_or_else(PoisonError::into_inner);
        sinks.entries.iter().rev().take(n).cloned().collect()
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.inner
            .sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_levels(LogLevels::default())
    }
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog")
            .field("levels", &self.inner.levels)
            .field("entries", &self.len())
            .finish()
    }
}

fn emit_console(severity: Severity, message: &str) {
    match severity {
        Severity::Critical => tracing::error!(critical = true, "{}", message),
        Severity::Error => tracing::error!("{}", message),
        Severity::Warning => tracing::warn!("{}", message),
        Severity::Debug => tracing::debug!("{}", message),
        Severity::Info => tracing::info!("{}", message),
    }
}
