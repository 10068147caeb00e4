//! Configuration system for tiny-webhook.
//!
//! The configuration document is read once at startup from a YAML, JSON or TOML
//! file, optionally overlaid with environment variables, and validated into a
//! strongly typed `WebhookConfig`. Anything malformed is rejected here rather
//! than at dispatch time.

mod loader;
mod models;
#[cfg(test)]
mod tests;
pub mod validation;

pub use loader::ConfigLoader;
pub use models::*;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "config.yaml",
    "config.yml",
    "tiny-webhook.yaml",
    "tiny-webhook.yml",
    "tiny-webhook.json",
    "tiny-webhook.toml",
];

/// Environment variable prefix for tiny-webhook configuration
pub const ENV_PREFIX: &str = "TINY_WEBHOOK_";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("{0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
