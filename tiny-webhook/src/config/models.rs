//! Configuration model definitions.
//!
//! `RawConfig` mirrors the document as written; `validation` turns it into the
//! typed `WebhookConfig` the rest of the crate works with.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The configuration document before validation.
///
/// The required sections are kept as untyped values so validation can report
/// precisely what is missing or mistyped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `http` section
    pub http: Option<Value>,

    /// `hooks` list
    pub hooks: Option<Value>,

    /// `log` section
    pub log: Option<Value>,
}

/// Main configuration structure for tiny-webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// HTTP listener configuration
    pub http: HttpConfig,

    /// Hooks in declaration order
    pub hooks: Vec<HookSpec>,

    /// Logging configuration
    #[serde(default)]
    pub log: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Port to listen on
    pub port: u16,

    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// A hook as written in the configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HookSpec {
    /// Optional identifier used in log lines
    #[serde(default)]
    pub name: Option<String>,

    /// Requirement tree the payload has to satisfy
    pub requirements: Value,

    /// What to do when the hook matches
    #[serde(default)]
    pub action: ActionSpec,

    /// Optional message logged when the hook handles a request
    #[serde(default)]
    pub message: Option<HookMessage>,
}

/// Action of a hook.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionSpec {
    /// Shell command line to run
    #[serde(default)]
    pub command: Option<String>,

    /// Working directory for the command
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

/// A message in one of the supported markups.
///
/// Used both for the optional `message` of a hook and for the `message` field
/// many webhook senders put in their payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HookMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
}

impl HookMessage {
    /// The message body, preferring text over html over markdown.
    pub fn body(&self) -> Option<&str> {
        self.text
            .as_deref()
            .or(self.html.as_deref())
            .or(self.markdown.as_deref())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Which severities are recorded
    pub levels: LogLevels,

    /// File that receives every recorded line
    pub file: Option<PathBuf>,

    /// Viewing recent log lines over HTTP GET
    #[serde(rename = "web-portal")]
    pub web_portal: WebPortalConfig,

    /// Console output format
    pub format: LogFormat,
}

/// Per-severity switches. Critical messages are recorded regardless of `critical`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogLevels {
    pub critical: bool,
    pub errors: bool,
    pub warnings: bool,
    pub debug: bool,
    pub info: bool,
}

impl Default for LogLevels {
    fn default() -> Self {
        Self {
            critical: true,
            errors: false,
            warnings: false,
            debug: false,
            info: false,
        }
    }
}

impl LogLevels {
    /// Every level switched on.
    pub fn all() -> Self {
        Self {
            critical: true,
            errors: true,
            warnings: true,
            debug: true,
            info: true,
        }
    }
}

/// Web portal configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WebPortalConfig {
    /// Whether GET requests return the log
    pub enabled: bool,

    /// How many recent lines to return
    pub count: usize,
}

impl Default for WebPortalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            count: 20,
        }
    }
}

/// Console log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output
    Pretty,

    /// Single-line output
    #[default]
    Compact,

    /// JSON lines
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}
