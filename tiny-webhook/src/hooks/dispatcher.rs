//! Dispatching payloads to hooks.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::{ActionRunner, HookRegistry};
use crate::logging::{EventLog, Severity};
use crate::matcher::{explain, matches_key};

/// Key under which the payload is placed before matching.
pub const ROOT_KEY: &str = "root";

/// Result of dispatching one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Whether a hook matched
    pub handled: bool,
    /// Name of the matching hook
    pub hook_name: Option<String>,
}

impl DispatchOutcome {
    pub fn handled_by(name: impl Into<String>) -> Self {
        Self {
            handled: true,
            hook_name: Some(name.into()),
        }
    }

    pub fn unhandled() -> Self {
        Self {
            handled: false,
            hook_name: None,
        }
    }
}

/// Selects the first hook matching a payload and triggers its action.
///
/// Hooks are evaluated in declaration order on every call; nothing is cached
/// between calls, so identical payloads always select the same hook.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<HookRegistry>,
    runner: Arc<dyn ActionRunner>,
    log: EventLog,
}

impl Dispatcher {
    pub fn new(registry: Arc<HookRegistry>, runner: Arc<dyn ActionRunner>, log: EventLog) -> Self {
        Self {
            registry,
            runner,
            log,
        }
    }

    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Dispatch `payload` to the first matching hook.
    ///
    /// The matched hook's action is started but not awaited.
    pub fn dispatch(&self, payload: &Value) -> DispatchOutcome {
        self.log
            .info(format!("Webhook request: {}", payload_message(payload)));

        let mut scope = Map::new();
        scope.insert(ROOT_KEY.to_string(), payload.clone());
        let scope = Value::Object(scope);

        for hook in self.registry.iter() {
            self.log.debug(format!("Testing hook \"{}\"", hook.name));

            if matches_key(ROOT_KEY, &hook.requirement, &scope) {
                self.log.info(format!("Handled by hook: \"{}\"", hook.name));
                if let Some(message) = hook.message.as_ref().and_then(|m| m.body()) {
                    self.log.info(format!("Hook message: {}", message));
                }

                if hook.action.command.is_some() {
                    self.runner.run(&hook.name, &hook.action);
                } else {
                    self.log.warning(format!(
                        "No action performed! Make sure the hook \"{}\" has a valid 'action'.",
                        hook.name
                    ));
                }
                return DispatchOutcome::handled_by(&hook.name);
            }

            if self.log.is_enabled(Severity::Debug)
                && let Some(failure) = explain(&hook.requirement, payload)
            {
                self.log
                    .debug(format!("Hook \"{}\" skipped: {}", hook.name, failure));
            }
        }

        DispatchOutcome::unhandled()
    }
}

/// The human readable message carried by a payload, if any.
///
/// Looks at `message.text`, then `message.html`, then `message.markdown`.
pub fn payload_message(payload: &Value) -> String {
    let Some(Value::Object(message)) = payload.get("message") else {
        return "(No message)".to_string();
    };

    ["text", "html", "markdown"]
        .iter()
        .find_map(|key| message.get(*key))
        .map(|body| match body {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "(No message)".to_string())
}
