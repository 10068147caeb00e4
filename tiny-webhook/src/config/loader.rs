//! Configuration loader.
//!
//! This module provides functionality to load configuration from multiple sources.

use super::{ConfigError, DEFAULT_CONFIG_FILES, ENV_PREFIX, ENV_SEPARATOR, Result, models::*, validation};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use std::path::{Path, PathBuf};

/// Configuration loader that handles loading from multiple sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
    /// Human readable origin of the configuration, used in error messages
    source: String,
}

impl ConfigLoader {
    /// Create a new, empty configuration loader.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            source: "configuration".to_string(),
        }
    }

    /// Load configuration from a file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileLoadError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => self.merge(Toml::file(path)),
            Some("yaml") | Some("yml") => self.merge(Yaml::file(path)),
            Some("json") => self.merge(Json::file(path)),
            _ => {
                return Err(ConfigError::FileLoadError(format!(
                    "Unsupported file format: {}",
                    path.display()
                )));
            }
        };
        self.source = path.display().to_string();

        Ok(self)
    }

    /// Load configuration from a YAML document held in memory.
    pub fn load_yaml_str(&mut self, yaml: &str) -> &mut Self {
        self.merge(Yaml::string(yaml))
    }

    /// Attempt to load from default configuration file locations.
    ///
    /// Returns the path that was loaded, if any.
    pub fn load_default_files(&mut self) -> Option<PathBuf> {
        for file in DEFAULT_CONFIG_FILES {
            let path = PathBuf::from(file);
            if path.exists() && self.load_file(&path).is_ok() {
                return Some(path);
            }
        }

        // Also check the platform configuration directory
        if let Some(proj_dirs) = directories::ProjectDirs::from("org", "tiny-webhook", "tiny-webhook") {
            let config_dir = proj_dirs.config_dir();

            for ext in &["yaml", "yml", "json", "toml"] {
                let path = config_dir.join(format!("config.{}", ext));
                if path.exists() && self.load_file(&path).is_ok() {
                    return Some(path);
                }
            }
        }

        None
    }

    /// Load configuration from environment variables.
    ///
    /// `TINY_WEBHOOK_HTTP__PORT=9000` sets `http.port`.
    pub fn load_env(&mut self) -> &mut Self {
        self.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))
    }

    /// Load configuration from a custom source.
    pub fn merge<T: figment::Provider>(&mut self, provider: T) -> &mut Self {
        let figment = std::mem::take(&mut self.figment).merge(provider);
        self.figment = figment;
        self
    }

    /// Extract and validate the configuration.
    pub fn extract(&self) -> Result<WebhookConfig> {
        let raw: RawConfig = self
            .figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        validation::validate_config(raw, &self.source)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
