//! Application state management

use std::sync::Arc;

use tiny_webhook::config::{WebPortalConfig, WebhookConfig};
use tiny_webhook::hooks::{Dispatcher, HookRegistry, ShellRunner};
use tiny_webhook::logging::EventLog;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Selects and triggers hooks
    pub dispatcher: Dispatcher,

    /// Shared event log, also served by the web portal
    pub event_log: EventLog,

    /// Web portal settings
    pub portal: WebPortalConfig,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(
        dispatcher: Dispatcher,
        event_log: EventLog,
        portal: WebPortalConfig,
        config: ServerConfig,
    ) -> Self {
        Self {
            dispatcher,
            event_log,
            portal,
            config,
        }
    }

    /// Build the event log, hook registry and shell runner from a validated
    /// configuration document.
    pub fn from_webhook_config(
        webhook: WebhookConfig,
        config: ServerConfig,
    ) -> tiny_webhook::Result<Self> {
        let event_log = EventLog::new(&webhook.log)?;
        let registry = Arc::new(HookRegistry::from_specs(webhook.hooks, &event_log)?);
        let runner = Arc::new(ShellRunner::new(event_log.clone()));
        let dispatcher = Dispatcher::new(registry, runner, event_log.clone());

        Ok(Self::new(
            dispatcher,
            event_log,
            webhook.log.web_portal,
            config,
        ))
    }
}
