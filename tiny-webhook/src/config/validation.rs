//! Configuration validation utilities.
//!
//! This module turns the raw document into a `WebhookConfig`, rejecting
//! missing or mistyped required sections with a message naming the source.

use serde_json::Value;

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
///
/// `source` names where the document came from (usually the file path).
pub fn validate_config(raw: RawConfig, source: &str) -> Result<WebhookConfig, ConfigError> {
    let http = validate_http(raw.http.as_ref(), source)?;
    let hooks = validate_hooks(raw.hooks.as_ref(), source)?;
    let log = validate_log(raw.log, source)?;

    Ok(WebhookConfig { http, hooks, log })
}

/// Validate the `http` section.
fn validate_http(http: Option<&Value>, source: &str) -> Result<HttpConfig, ConfigError> {
    let http = match http {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => {
            return Err(invalid(format!(
                "'{}' does not have data for 'http'!",
                source
            )));
        }
        Some(_) => {
            return Err(invalid(format!(
                "The value of 'http' in '{}' is not a mapping",
                source
            )));
        }
    };

    let port = match http.get("port") {
        None | Some(Value::Null) => {
            return Err(invalid(format!(
                "'{}' does not have a value for 'http.port'!",
                source
            )));
        }
        Some(Value::Number(n)) => n,
        Some(_) => {
            return Err(invalid(format!(
                "The value of 'http.port' in '{}' is not a number (eg: 8081)",
                source
            )));
        }
    };

    let port = port
        .as_u64()
        .or_else(|| port.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
        .filter(|p| (1..=u64::from(u16::MAX)).contains(p))
        .ok_or_else(|| {
            invalid(format!(
                "The value of 'http.port' in '{}' is not a valid port (1-65535): {}",
                source, port
            ))
        })? as u16;

    let host = match http.get("host") {
        None | Some(Value::Null) => "0.0.0.0".to_string(),
        Some(Value::String(host)) if !host.trim().is_empty() => host.clone(),
        Some(_) => {
            return Err(invalid(format!(
                "The value of 'http.host' in '{}' is not an address",
                source
            )));
        }
    };

    Ok(HttpConfig { port, host })
}

/// Validate the `hooks` list and every hook in it.
fn validate_hooks(hooks: Option<&Value>, source: &str) -> Result<Vec<HookSpec>, ConfigError> {
    let hooks = match hooks {
        None | Some(Value::Null) => {
            return Err(invalid(format!("'{}' does not have any hooks!", source)));
        }
        Some(Value::Array(list)) => list,
        Some(_) => {
            return Err(invalid(format!(
                "The value of 'hooks' in '{}' is not a list!",
                source
            )));
        }
    };

    if hooks.is_empty() {
        return Err(invalid(format!(
            "The list of 'hooks' in '{}' is empty!",
            source
        )));
    }

    hooks
        .iter()
        .enumerate()
        .map(|(index, hook)| validate_hook(index, hook, source))
        .collect()
}

/// Validate a single hook entry.
fn validate_hook(index: usize, hook: &Value, source: &str) -> Result<HookSpec, ConfigError> {
    let Value::Object(map) = hook else {
        return Err(invalid(format!(
            "Hook #{} in '{}' is not a mapping",
            index, source
        )));
    };

    match map.get("requirements") {
        None | Some(Value::Null) => {
            return Err(invalid(format!(
                "Hook #{} in '{}' has no 'requirements'",
                index, source
            )));
        }
        Some(_) => {}
    }

    // An explicit `action: ~` or `message: ~` means "none".
    let mut map = map.clone();
    map.retain(|key, value| !(matches!(key.as_str(), "action" | "message") && value.is_null()));

    serde_json::from_value(Value::Object(map)).map_err(|e| {
        invalid(format!(
            "Hook #{} in '{}' is malformed: {}",
            index, source, e
        ))
    })
}

/// Validate the optional `log` section.
fn validate_log(log: Option<Value>, source: &str) -> Result<LoggingConfig, ConfigError> {
    match log {
        None | Some(Value::Null) => Ok(LoggingConfig::default()),
        Some(log) => serde_json::from_value(log).map_err(|e| {
            invalid(format!(
                "The 'log' section in '{}' is malformed: {}",
                source, e
            ))
        }),
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError(message)
}
