use anyhow::Result;
use colored::Colorize;
use tracing::{info, warn};

use crate::agents::{
    shell_quote, CommandExecutor, CommandOrigin, CommandPolicy, CommandRecord, Plan,
    RepoInspector, RepositoryState,
};
use crate::app::GitSettings;
use crate::cli::{PromptKind, Prompter};
use crate::constants::{INPUT_PROMPT, QUIT_TOKENS};
use crate::models::PlanGenerator;

/// Steps run for every instruction, always in this order
///
/// Only the state predicates gate what a step does; a failed command never
/// skips a later step. The one exception is an oracle failure, which ends the
/// iteration at [`Step::ExecutePlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnsureInitialized,
    CommitPending,
    ExecutePlan,
    Reinspect,
    RemoteFallback,
    Publish,
}

pub const PIPELINE: [Step; 6] = [
    Step::EnsureInitialized,
    Step::CommitPending,
    Step::ExecutePlan,
    Step::Reinspect,
    Step::RemoteFallback,
    Step::Publish,
];

/// What happened during one instruction
#[derive(Debug, Clone, Default)]
pub struct IterationReport {
    pub instruction: String,
    /// Steps entered, in order
    pub steps: Vec<Step>,
    /// Commands attempted (or skipped by the allow-list), in order
    pub commands: Vec<CommandRecord>,
    pub prompted_for_remote: bool,
    pub oracle_error: Option<String>,
}

impl IterationReport {
    pub fn command_lines(&self) -> Vec<&str> {
        self.commands.iter().map(|r| r.command.as_str()).collect()
    }
}

#[derive(Debug)]
pub enum Outcome {
    Quit,
    Completed(IterationReport),
}

/// Whether `input` is one of the quit tokens (case-insensitive, trimmed)
pub fn is_quit(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    QUIT_TOKENS.contains(&input.as_str())
}

/// Per-iteration scratch state; never carried into the next iteration
struct Iteration {
    before: Option<RepositoryState>,
    after: Option<RepositoryState>,
    report: IterationReport,
}

/// The instruction → plan → execute → publish loop
pub struct Workflow {
    executor: CommandExecutor,
    inspector: RepoInspector,
    planner: PlanGenerator,
    policy: CommandPolicy,
    settings: GitSettings,
}

impl Workflow {
    pub fn new(
        executor: CommandExecutor,
        inspector: RepoInspector,
        planner: PlanGenerator,
        policy: CommandPolicy,
        settings: GitSettings,
    ) -> Self {
        Self {
            executor,
            inspector,
            planner,
            policy,
            settings,
        }
    }

    /// Read instructions until a quit token or end of input
    pub async fn run(&self, prompter: &mut dyn Prompter) -> Result<()> {
        while let Some(line) = prompter.ask(PromptKind::Instruction, INPUT_PROMPT).await? {
            if let Outcome::Quit = self.handle(prompter, &line).await? {
                break;
            }
        }
        Ok(())
    }

    /// Run the full pipeline for one instruction
    pub async fn handle(&self, prompter: &mut dyn Prompter, instruction: &str) -> Result<Outcome> {
        if is_quit(instruction) {
            return Ok(Outcome::Quit);
        }

        let mut iteration = Iteration {
            before: None,
            after: None,
            report: IterationReport {
                instruction: instruction.trim().to_string(),
                ..IterationReport::default()
            },
        };

        for step in PIPELINE {
            iteration.report.steps.push(step);
            match step {
                Step::EnsureInitialized => self.ensure_initialized(&mut iteration).await,
                Step::CommitPending => self.commit_pending(&mut iteration).await,
                Step::ExecutePlan => {
                    if let Err(e) = self.execute_plan(&mut iteration).await {
                        let message = format!("{:#}", e);
                        println!("{}", format!("[ERROR] Could not get a plan: {}", message).red());
                        warn!(error = %message, "oracle failed; skipping the rest of this iteration");
                        iteration.report.oracle_error = Some(message);
                        break;
                    }
                }
                Step::Reinspect => iteration.after = Some(self.inspector.snapshot().await),
                Step::RemoteFallback => self.remote_fallback(prompter, &mut iteration).await?,
                Step::Publish => self.publish(&mut iteration).await,
            }
        }

        Ok(Outcome::Completed(iteration.report))
    }

    async fn ensure_initialized(&self, iteration: &mut Iteration) {
        let state = self.inspector.snapshot().await;
        if !state.is_initialized {
            self.run_workflow_command(iteration, "git init").await;
        }
        // Trusted for the rest of the iteration without re-querying
        iteration.before = Some(RepositoryState {
            is_initialized: true,
            ..state
        });
    }

    async fn commit_pending(&self, iteration: &mut Iteration) {
        let dirty = iteration.before.as_ref().is_some_and(|s| s.is_dirty);
        if dirty {
            self.run_workflow_command(iteration, "git add .").await;
            let commit = format!("git commit -m {}", quote_message(&self.settings.commit_message));
            self.run_workflow_command(iteration, &commit).await;
        }
    }

    async fn execute_plan(&self, iteration: &mut Iteration) -> Result<()> {
        let raw = self.planner.generate(&iteration.report.instruction).await?;
        let plan = Plan::parse(&raw);
        info!(commands = plan.len(), "executing plan");
        if plan.is_empty() {
            println!("{}", "[WARNING] The model proposed no commands".yellow());
        }

        for command in plan {
            if command.is_empty() {
                continue;
            }
            self.run_planned_command(iteration, command).await;
        }
        Ok(())
    }

    async fn remote_fallback(&self, prompter: &mut dyn Prompter, iteration: &mut Iteration) -> Result<()> {
        let needs_remote = iteration
            .after
            .as_ref()
            .is_some_and(RepositoryState::needs_manual_remote);
        if !needs_remote {
            return Ok(());
        }

        iteration.report.prompted_for_remote = true;
        let answer = prompter.ask(PromptKind::Setup, "Enter remote URL: ").await?;
        match answer.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => {
                let command = format!(
                    "git remote add {} {}",
                    shell_quote(&self.settings.remote),
                    shell_quote(url)
                );
                self.run_workflow_command(iteration, &command).await;
            }
            _ => {
                println!("{}", "[WARNING] No remote URL given; not adding a remote".yellow());
            }
        }
        Ok(())
    }

    async fn publish(&self, iteration: &mut Iteration) {
        let branch = iteration
            .after
            .as_ref()
            .map(|s| s.current_branch.clone())
            .unwrap_or_else(|| self.settings.default_branch.clone());
        let command = format!(
            "git push -u {} {}",
            shell_quote(&self.settings.remote),
            shell_quote(&branch)
        );
        self.run_workflow_command(iteration, &command).await;
    }

    async fn run_workflow_command(&self, iteration: &mut Iteration, command: &str) {
        let output = self.executor.run(command).await;
        iteration.report.commands.push(CommandRecord {
            command: command.to_string(),
            origin: CommandOrigin::Workflow,
            output: Some(output),
        });
    }

    async fn run_planned_command(&self, iteration: &mut Iteration, command: String) {
        if let Err(violation) = self.policy.check(&command) {
            if self.policy.is_enforced() {
                println!("{}", format!("[SKIPPED] {} ({})", command, violation).yellow());
                warn!(%command, %violation, "planned command blocked");
                iteration.report.commands.push(CommandRecord {
                    command,
                    origin: CommandOrigin::Plan,
                    output: None,
                });
                return;
            }
            println!("{}", format!("[WARNING] Running out-of-policy command: {}", violation).yellow());
            warn!(%command, %violation, "running out-of-policy command");
        }

        let output = self.executor.run(&command).await;
        iteration.report.commands.push(CommandRecord {
            command,
            origin: CommandOrigin::Plan,
            output: Some(output),
        });
    }
}

/// Double-quote a commit message the way a user would type it
fn quote_message(message: &str) -> String {
    let escaped = message
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('`', "\\`");
    format!("\"{}\"", escaped)
}
