//! # tiny-webhook
//!
//! Generic automation glue: inbound JSON payloads are matched against a list of
//! configured hooks and the first hook whose requirements are satisfied gets its
//! shell action triggered.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tiny_webhook::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConfigLoader::new().load_file("config.yaml")?.extract()?;
//!
//!     let log = EventLog::new(&config.log)?;
//!     let registry = Arc::new(HookRegistry::from_specs(config.hooks, &log)?);
//!     let runner = Arc::new(ShellRunner::new(log.clone()));
//!     let dispatcher = Dispatcher::new(registry, runner, log);
//!
//!     let payload = serde_json::json!({ "event": "push" });
//!     let outcome = dispatcher.dispatch(&payload);
//!     println!("handled: {}", outcome.handled);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **value**: the structured data model and the loose scalar comparison
//! - **matcher**: recursive requirement evaluation
//! - **hooks**: the registry, the dispatcher and the action runner
//! - **logging**: the in-memory event log and tracing setup
//! - **config**: loading and validation of the configuration document
//!
//! The HTTP surface lives in the separate `tiny-webhook-server` crate.

pub mod config;
pub mod hooks;
pub mod logging;
pub mod matcher;
pub mod value;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigLoader, LoggingConfig, WebhookConfig};
    pub use crate::hooks::{
        Action, ActionRunner, DispatchOutcome, Dispatcher, Hook, HookRegistry, ShellRunner,
    };
    pub use crate::logging::{EventLog, Severity};
    pub use crate::matcher::matches;
    pub use crate::value::StructuredValue;
    pub use crate::{Result, WebhookError};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for tiny-webhook operations
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    /// The log sinks could not be set up
    #[error(transparent)]
    Logging(#[from] logging::LogError),
}

/// Result type for tiny-webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;
