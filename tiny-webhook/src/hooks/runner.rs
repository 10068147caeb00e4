//! Action execution.
//!
//! Actions are fire-and-forget: the dispatcher hands an action to the runner
//! and returns immediately, so the HTTP response never waits on the command.
//! When the command finishes its output and any failure are reported to the
//! event log, which is the only place they are visible.

use std::fmt;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tokio::task::JoinHandle;

use super::Action;
use crate::logging::EventLog;

/// Runs the action of a matched hook.
///
/// Implementations must not block the caller until the action completes.
pub trait ActionRunner: Send + Sync + fmt::Debug {
    /// Start `action` on behalf of the hook named `hook_name`.
    fn run(&self, hook_name: &str, action: &Action);
}

/// Result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The command line that was run
    pub command: String,
    /// Exit code, `None` if the process could not be started or was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Spawn failure or non-zero exit description
    pub error: Option<String>,
}

impl ActionOutcome {
    /// Whether the command ran and exited with status 0.
    pub fn success(&self) -> bool {
        self.error.is_none() && self.exit_code == Some(0)
    }
}

/// Runs actions as shell command lines on the tokio runtime.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    log: EventLog,
}

impl ShellRunner {
    /// Create a runner that reports to `log`.
    ///
    /// Commands without a `cwd` run in the process working directory.
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }

    /// Spawn the command of `action` on the current tokio runtime.
    ///
    /// Returns `None` when the action has no command. The task reports to the
    /// event log when the command ends; awaiting the handle is optional.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn spawn(&self, action: &Action) -> Option<JoinHandle<ActionOutcome>> {
        let command = action.command.clone()?;
        let cwd = action.cwd.clone();
        let log = self.log.clone();

        Some(tokio::spawn(async move {
            let outcome = execute(&command, cwd.as_deref()).await;
            report(&log, &outcome);
            outcome
        }))
    }
}

impl ActionRunner for ShellRunner {
    fn run(&self, hook_name: &str, action: &Action) {
        if action.command.is_none() {
            return;
        }
        if tokio::runtime::Handle::try_current().is_err() {
            self.log.error(format!(
                "Cannot run the action of hook \"{}\": no async runtime available",
                hook_name
            ));
            return;
        }
        // Detached: dropping the handle does not cancel the task
        if self.spawn(action).is_some() {
            tracing::debug!(hook = hook_name, "Action started");
        }
    }
}

fn shell_command(command: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

/// Run `command` to completion and collect its output.
async fn execute(command: &str, cwd: Option<&Path>) -> ActionOutcome {
    let mut cmd = shell_command(command);
    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    match cmd.output().await {
        Ok(output) => {
            let exit_code = output.status.code();
            let error = if output.status.success() {
                None
            } else {
                Some(match exit_code {
                    Some(code) => format!("Command failed with exit code {}: {}", code, command),
                    None => format!("Command terminated by signal: {}", command),
                })
            };
            ActionOutcome {
                command: command.to_string(),
                exit_code,
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                error,
            }
        }
        Err(e) => ActionOutcome {
            command: command.to_string(),
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            error: Some(format!("Failed to start command: {}", e)),
        },
    }
}

/// Report a finished command to the event log.
fn report(log: &EventLog, outcome: &ActionOutcome) {
    log.info(format!("Command outputs from [{}]", outcome.command));
    if !outcome.stdout.is_empty() {
        log.info(format!("stdout: {}", outcome.stdout));
    }
    if !outcome.stderr.is_empty() {
        log.error(format!("stderr: {}", outcome.stderr));
    }
    if let Some(error) = &outcome.error {
        log.error(format!("error: {}", error));
    }
}
