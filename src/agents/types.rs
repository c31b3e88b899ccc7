use serde::{Deserialize, Serialize};

/// Captured result of one shell command
///
/// A failed spawn, a non-zero exit and a timeout are all represented here
/// rather than raised, so callers can display them and move on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process never ran to completion
    pub status: Option<i32>,
    pub timed_out: bool,
}

impl CommandOutput {
    /// Successful output with the given stdout
    #[cfg(test)]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            status: Some(0),
            timed_out: false,
        }
    }

    /// Failed output with the given exit code and stderr
    #[cfg(test)]
    pub fn failed(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            status: Some(status),
            timed_out: false,
        }
    }

    /// The process could not be started at all
    pub fn spawn_error(error: impl std::fmt::Display) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("Failed to execute command: {}", error),
            status: None,
            timed_out: false,
        }
    }

    pub fn timed_out(secs: u64) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("Command timed out after {} seconds", secs),
            status: None,
            timed_out: true,
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Trimmed stdout, the form every state query consumes
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// One command the workflow attempted, in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub command: String,
    /// Where the command came from
    pub origin: CommandOrigin,
    /// `None` when the command was skipped by the allow-list
    pub output: Option<CommandOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOrigin {
    /// Issued by the workflow itself (init, commit, remote fallback, publish)
    Workflow,
    /// Proposed by the oracle
    Plan,
}
