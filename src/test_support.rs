//! Fakes shared by unit tests: a shell that simulates a repository and
//! records commands, a scripted prompter and a canned oracle.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::agents::{CommandOutput, Shell};
use crate::cli::{PromptKind, Prompter};
use crate::models::{ChatMessage, Oracle};

/// Read-only queries the inspector issues
const STATE_QUERIES: &[&str] = &[
    "git branch --show-current",
    "git remote get-url origin",
    "git status --porcelain",
];

#[derive(Debug, Default)]
struct FakeRepo {
    branch: String,
    remote: Option<String>,
    dirty: bool,
    commits: usize,
}

/// Shell double that keeps just enough repository state to drive the workflow
pub struct FakeRepoShell {
    root: PathBuf,
    repo: Mutex<FakeRepo>,
    log: Mutex<Vec<String>>,
    programs: Vec<String>,
}

impl FakeRepoShell {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            repo: Mutex::new(FakeRepo {
                branch: "main".to_string(),
                ..FakeRepo::default()
            }),
            log: Mutex::new(Vec::new()),
            programs: Vec::new(),
        }
    }

    pub fn initialized(self, branch: &str) -> Self {
        std::fs::create_dir_all(self.root.join(".git")).unwrap();
        self.repo.lock().unwrap().branch = branch.to_string();
        self
    }

    pub fn with_remote(self, url: &str) -> Self {
        self.repo.lock().unwrap().remote = Some(url.to_string());
        self
    }

    pub fn dirty(self) -> Self {
        self.repo.lock().unwrap().dirty = true;
        self
    }

    /// Make `program` visible to PATH probes
    pub fn with_program(mut self, program: &str) -> Self {
        self.programs.push(program.to_string());
        self
    }

    /// Every command, queries included
    pub fn commands(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// Commands other than the inspector's state queries
    pub fn mutations(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|c| !STATE_QUERIES.contains(&c.as_str()))
            .collect()
    }

    pub fn commit_count(&self) -> usize {
        self.repo.lock().unwrap().commits
    }

    fn is_repo(&self) -> bool {
        self.root.join(".git").exists()
    }
}

#[async_trait]
impl Shell for FakeRepoShell {
    async fn capture(&self, command: &str) -> CommandOutput {
        self.log.lock().unwrap().push(command.to_string());
        let mut repo = self.repo.lock().unwrap();

        let not_a_repo = || CommandOutput::failed(128, "fatal: not a git repository");

        if command == "git init" {
            std::fs::create_dir_all(self.root.join(".git")).unwrap();
            CommandOutput::ok("Initialized empty Git repository")
        } else if command == "git branch --show-current" {
            if self.is_repo() {
                CommandOutput::ok(format!("{}\n", repo.branch))
            } else {
                not_a_repo()
            }
        } else if command == "git status --porcelain" {
            match (self.is_repo(), repo.dirty) {
                (false, _) => not_a_repo(),
                (true, true) => CommandOutput::ok(" M README.md\n"),
                (true, false) => CommandOutput::ok(""),
            }
        } else if command == "git remote get-url origin" {
            match &repo.remote {
                Some(url) => CommandOutput::ok(format!("{}\n", url)),
                None => CommandOutput::failed(2, "error: No such remote 'origin'"),
            }
        } else if command.starts_with("git commit") {
            if repo.dirty {
                repo.dirty = false;
                repo.commits += 1;
                CommandOutput::ok("[main (root-commit)] Initial commit")
            } else {
                CommandOutput {
                    stdout: "nothing to commit, working tree clean".to_string(),
                    status: Some(1),
                    ..CommandOutput::default()
                }
            }
        } else if let Some(rest) = command.strip_prefix("gh repo create ") {
            let name = rest.split_whitespace().next().unwrap_or("repo");
            repo.remote = Some(format!("https://github.com/me/{}.git", name));
            CommandOutput::ok(format!("Created repository me/{}", name))
        } else if let Some(url) = command.strip_prefix("git remote add origin ") {
            repo.remote = Some(url.trim_matches('\'').to_string());
            CommandOutput::ok("")
        } else if command.starts_with("git push") {
            if repo.remote.is_some() {
                CommandOutput::ok("")
            } else {
                CommandOutput::failed(128, "fatal: 'origin' does not appear to be a git repository")
            }
        } else {
            CommandOutput::ok("")
        }
    }

    fn is_available(&self, program: &str) -> bool {
        self.programs.iter().any(|p| p == program)
    }
}

/// Prompter fed from a fixed list of answers
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&mut self, _kind: PromptKind, prompt: &str) -> Result<Option<String>> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

/// Oracle returning canned responses and recording what it was asked
#[derive(Clone, Default)]
pub struct CannedOracle {
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl CannedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, text: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, error: &str) -> Self {
        self.responses.lock().unwrap().push_back(Err(error.to_string()));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Oracle for CannedOracle {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        self.requests.lock().unwrap().push(messages.to_vec());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(error)) => Err(anyhow::anyhow!(error)),
            None => Err(anyhow::anyhow!("no canned response left")),
        }
    }
}
