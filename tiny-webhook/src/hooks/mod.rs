//! Hook dispatch.
//!
//! # Architecture
//!
//! - `registry.rs`: the ordered, read-only `HookRegistry` built from configuration
//! - `dispatcher.rs`: `Dispatcher`, which selects the first hook matching a payload
//! - `runner.rs`: the `ActionRunner` trait and the `ShellRunner` that runs commands

pub mod dispatcher;
pub mod registry;
pub mod runner;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use registry::{Hook, HookRegistry};
pub use runner::{ActionOutcome, ActionRunner, ShellRunner};

/// What a hook does when it matches.
pub use crate::config::ActionSpec as Action;
