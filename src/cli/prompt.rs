use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::Colorize;
use std::io::Write;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};

/// What a prompt is asking for; only affects presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// The main instruction prompt
    Instruction,
    /// One-off questions: identity setup, remote URL
    Setup,
}

/// Line-oriented user input
#[async_trait]
pub trait Prompter: Send {
    /// Show `prompt` and read one line. `None` means input is closed.
    async fn ask(&mut self, kind: PromptKind, prompt: &str) -> Result<Option<String>>;
}

/// Reads answers from the process's standard input
pub struct StdinPrompter {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinPrompter {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }
}

impl Default for StdinPrompter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompter for StdinPrompter {
    async fn ask(&mut self, kind: PromptKind, prompt: &str) -> Result<Option<String>> {
        let styled = match kind {
            PromptKind::Instruction => prompt.cyan(),
            PromptKind::Setup => prompt.yellow(),
        };
        print!("{}", styled);
        std::io::stdout().flush().context("Failed to flush prompt")?;

        self.lines
            .next_line()
            .await
            .context("Failed to read from standard input")
    }
}
