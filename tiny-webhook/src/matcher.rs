//! Requirement matching.
//!
//! A requirement is a tree describing a structural subset the payload must
//! contain. Mapping nodes require every one of their keys to be present in the
//! payload with a matching value; scalar nodes compare loosely (see
//! [`crate::value::loose_eq`]). Keys the requirement does not mention are
//! ignored, so `{"a": {"b": 1}}` matches `{"a": {"b": 1, "c": 2}, "d": 3}`.
//!
//! Lists in a requirement behave as mappings keyed by index: `["x"]` requires
//! the payload value to have an element `"x"` at index 0.

use std::fmt;

use serde_json::Value;

use crate::value::{self, get_key, is_mapping, loose_eq};

/// Check whether `payload` satisfies `requirement`.
///
/// Never panics; any structural mismatch simply yields `false`.
pub fn matches(requirement: &Value, payload: &Value) -> bool {
    if !is_mapping(requirement) {
        return loose_eq(requirement, payload);
    }
    if !is_mapping(payload) {
        return false;
    }
    value::entries(requirement)
        .into_iter()
        .all(|(key, sub_requirement)| matches_key(&key, sub_requirement, payload))
}

/// Check that `scope` contains `key` and that its value satisfies `requirement`.
pub fn matches_key(key: &str, requirement: &Value, scope: &Value) -> bool {
    match get_key(scope, key) {
        Some(found) => matches(requirement, found),
        None => false,
    }
}

/// Why a requirement did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchReason {
    /// The payload has no value under the required key
    MissingKey,
    /// The requirement is a mapping but the payload value is not
    TypeMismatch { found: &'static str },
    /// The scalar comparison failed
    NotEqual { expected: String, found: String },
}

/// The first failing check of a requirement, with the path that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFailure {
    /// Keys from the top of the requirement down to the failing node
    pub path: Vec<String>,
    pub reason: MismatchReason,
}

impl fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "<root>".to_string()
        } else {
            self.path.join(".")
        };
        match &self.reason {
            MismatchReason::MissingKey => write!(f, "'{}' is missing", path),
            MismatchReason::TypeMismatch { found } => {
                write!(f, "'{}' is a {} but a mapping is required", path, found)
            }
            MismatchReason::NotEqual { expected, found } => {
                write!(f, "'{}' is {} but {} is required", path, found, expected)
            }
        }
    }
}

/// Like [`matches`], but reports where the match failed.
///
/// Returns `None` when the payload satisfies the requirement.
pub fn explain(requirement: &Value, payload: &Value) -> Option<MatchFailure> {
    let mut path = Vec::new();
    explain_at(requirement, payload, &mut path)
}

fn explain_at(requirement: &Value, payload: &Value, path: &mut Vec<String>) -> Option<MatchFailure> {
    if !is_mapping(requirement) {
        if loose_eq(requirement, payload) {
            return None;
        }
        return Some(MatchFailure {
            path: path.clone(),
            reason: MismatchReason::NotEqual {
                expected: requirement.to_string(),
                found: payload.to_string(),
            },
        });
    }
    if !is_mapping(payload) {
        return Some(MatchFailure {
            path: path.clone(),
            reason: MismatchReason::TypeMismatch {
                found: value::type_name(payload),
            },
        });
    }
    for (key, sub_requirement) in value::entries(requirement) {
        path.push(key.clone());
        let failure = match get_key(payload, &key) {
            Some(found) => explain_at(sub_requirement, found, path),
            None => Some(MatchFailure {
                path: path.clone(),
                reason: MismatchReason::MissingKey,
            }),
        };
        if failure.is_some() {
            return failure;
        }
        path.pop();
    }
    None
}
