//! Hook registry.
//!
//! The registry is built once from the validated configuration and never
//! changes afterwards, so it can be shared between concurrent requests behind
//! an `Arc` without any locking. Hook order is the declaration order and is
//! significant: the dispatcher picks the first match, not the best one.

use serde_json::Value;

use super::Action;
use crate::config::{self, ConfigError, HookMessage, HookSpec};
use crate::logging::EventLog;

/// A configured hook.
#[derive(Debug, Clone, PartialEq)]
pub struct Hook {
    /// Position in the configuration, starting at 0
    pub index: usize,
    /// Configured name, or a positional fallback for nameless hooks
    pub name: String,
    /// Whether `name` came from the configuration
    pub named: bool,
    /// Requirement tree matched against the payload
    pub requirement: Value,
    pub action: Action,
    pub message: Option<HookMessage>,
}

impl Hook {
    /// Build a hook from its configuration entry.
    pub fn from_spec(index: usize, spec: HookSpec) -> Self {
        let (name, named) = match spec.name {
            Some(name) => (name, true),
            None => (fallback_name(index), false),
        };

        Self {
            index,
            name,
            named,
            requirement: spec.requirements,
            action: spec.action,
            message: spec.message,
        }
    }
}

/// Name used in log lines for a hook without a configured name.
pub fn fallback_name(index: usize) -> String {
    format!("Hook #{} (nameless)", index)
}

/// Ordered, read-only collection of hooks.
#[derive(Debug, Clone, Default)]
pub struct HookRegistry {
    hooks: Vec<Hook>,
}

impl HookRegistry {
    /// Build the registry from configured hooks.
    ///
    /// An empty list is an error. Nameless hooks are accepted with a warning
    /// and get a positional fallback name.
    pub fn from_specs(specs: Vec<HookSpec>, log: &EventLog) -> config::Result<Self> {
        if specs.is_empty() {
            return Err(ConfigError::ValidationError(
                "Configuration does not have any hooks!".to_string(),
            ));
        }

        let hooks: Vec<Hook> = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| Hook::from_spec(index, spec))
            .collect();

        for hook in hooks.iter().filter(|hook| !hook.named) {
            log.warning(format!("Hook #{} has no 'name'", hook.index));
        }

        Ok(Self { hooks })
    }

    /// Hooks in declaration order.
    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hook> {
        self.hooks.iter()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// First hook with the given name.
    pub fn get(&self, name: &str) -> Option<&Hook> {
        self.hooks.iter().find(|hook| hook.name == name)
    }

    /// Hook names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|hook| hook.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a HookRegistry {
    type Item = &'a Hook;
    type IntoIter = std::slice::Iter<'a, Hook>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
