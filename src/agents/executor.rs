use async_trait::async_trait;
use colored::Colorize;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::types::CommandOutput;

/// Host shell boundary
///
/// Everything that touches the working tree or the hosting platform goes
/// through `capture`, so tests can swap the real shell for a recording one.
#[async_trait]
pub trait Shell: Send + Sync {
    /// Run `command` through the host shell and capture both streams
    async fn capture(&self, command: &str) -> CommandOutput;

    /// Whether `program` can be found on PATH. Never runs it.
    fn is_available(&self, program: &str) -> bool;
}

/// The real host shell (`sh -c`, or `cmd /C` on Windows)
#[derive(Debug, Clone)]
pub struct SystemShell {
    working_dir: PathBuf,
    timeout: Option<Duration>,
}

impl SystemShell {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            timeout: None,
        }
    }

    /// Bound every command by `secs`; `None` waits indefinitely
    pub fn with_timeout(mut self, secs: Option<u64>) -> Self {
        self.timeout = secs.map(Duration::from_secs);
        self
    }

    fn build(&self, command: &str) -> Command {
        let (shell, shell_arg) = if cfg!(target_os = "windows") {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };

        let mut cmd = Command::new(shell);
        cmd.arg(shell_arg)
            .arg(command)
            .current_dir(&self.working_dir)
            // Interactive tools such as `gh auth login` may still read from the terminal
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Shell for SystemShell {
    async fn capture(&self, command: &str) -> CommandOutput {
        let output = self.build(command).output();

        let result = match self.timeout {
            Some(limit) => match timeout(limit, output).await {
                Ok(result) => result,
                Err(_) => return CommandOutput::timed_out(limit.as_secs()),
            },
            None => output.await,
        };

        match result {
            Ok(output) => CommandOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                status: output.status.code(),
                timed_out: false,
            },
            Err(e) => CommandOutput::spawn_error(e),
        }
    }

    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Runs commands for the user to see
///
/// Prints the command, runs it, prints whatever it captured. The returned
/// output is an audit trail; nothing here decides what happens next.
#[derive(Clone)]
pub struct CommandExecutor {
    shell: Arc<dyn Shell>,
}

impl CommandExecutor {
    pub fn new(shell: Arc<dyn Shell>) -> Self {
        Self { shell }
    }

    pub async fn run(&self, command: &str) -> CommandOutput {
        println!("{}", format!("$ {}", command).green());
        let output = self.shell.capture(command).await;

        let stdout = output.stdout.trim();
        if !stdout.is_empty() {
            println!("{}", stdout);
        }
        let stderr = output.stderr.trim();
        if !stderr.is_empty() {
            println!("{}", stderr.red());
        }

        debug!(command, status = ?output.status, timed_out = output.timed_out, "command finished");
        output
    }
}

/// Quote a value for safe interpolation into a POSIX shell command
pub fn shell_quote(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@+=,".contains(c))
    {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r"'\''"))
}
