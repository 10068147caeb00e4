//! Server configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tiny_webhook::config::{ConfigError, ConfigLoader, DEFAULT_CONFIG_FILES, WebhookConfig};

/// Settings of the server process itself.
///
/// Everything about hooks and log sinks lives in the configuration document;
/// these only decide where that document is and how the listener behaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Configuration document, `None` to search the default locations
    pub config_file: Option<PathBuf>,

    /// Overrides `http.host` from the configuration document
    pub host: Option<String>,

    /// Maximum request body size in bytes
    pub max_request_size: usize,

    /// Console filter directive
    pub log_level: Option<String>,

    /// Validate the configuration and exit
    pub check: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            host: None,
            max_request_size: 16 * 1024 * 1024, // 16MB
            log_level: None,
            check: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables
    /// CLI arguments take precedence over environment variables
    pub fn from_cli_and_env(cli_args: crate::cli::CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if let Some(config_path) = cli_args.config_file {
            config.config_file = Some(config_path);
        } else if let Ok(config_path) = env::var("TINY_WEBHOOK_CONFIG") {
            config.config_file = Some(PathBuf::from(config_path));
        }

        if let Some(host) = cli_args.host {
            config.host = Some(host);
        } else if let Ok(host) = env::var("TINY_WEBHOOK_HOST") {
            config.host = Some(host);
        }

        if let Some(max_size) = cli_args.max_request_size {
            config.max_request_size = max_size;
        } else if let Ok(max_size) = env::var("TINY_WEBHOOK_MAX_REQUEST_SIZE") {
            config.max_request_size = max_size.parse()?;
        }

        config.log_level = cli_args.log_level;
        config.check = cli_args.check;

        Ok(config)
    }

    /// Load and validate the configuration document.
    ///
    /// `TINY_WEBHOOK_*` environment variables are merged over the file.
    pub fn load_webhook_config(&self) -> tiny_webhook::config::Result<WebhookConfig> {
        let mut loader = ConfigLoader::new();

        match &self.config_file {
            Some(path) => {
                loader.load_file(path)?;
            }
            None => {
                if loader.load_default_files().is_none() {
                    return Err(ConfigError::FileLoadError(format!(
                        "No configuration file found (looked for {})",
                        DEFAULT_CONFIG_FILES.join(", ")
                    )));
                }
            }
        }

        loader.load_env().extract()
    }

    /// Address to bind, given the configured `http` section.
    pub fn bind_address(&self, config: &WebhookConfig) -> String {
        let host = self.host.as_deref().unwrap_or(&config.http.host);
        if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, config.http.port)
        } else {
            format!("{}:{}", host, config.http.port)
        }
    }
}
