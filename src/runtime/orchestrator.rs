use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    agents::{CommandExecutor, CommandPolicy, RepoInspector, Shell, SystemShell},
    app::{load_config, load_config_file, Config},
    cli::{handle_command, Cli, StdinPrompter},
    models::{ModelFactory, PlanGenerator},
    ollama::ensure_model as ensure_ollama_model,
    session::{ensure_identity, CredentialStore},
    utils::GitmateError,
};

use super::workflow::{Outcome, Workflow};

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        let mut config = if let Some(config_path) = &cli.config {
            load_config_file(config_path)?
        } else {
            match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("[WARNING] Failed to load config: {:#}. Using defaults.", e);
                    Config::default()
                }
            }
        };

        // Flags only ever tighten or override
        if cli.enforce_allowlist {
            config.execution.enforce_allowlist = true;
        }
        if let Some(model) = &cli.model {
            config.model.name = model.clone();
        }

        Ok(Self { cli, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the orchestrator
    pub async fn run(self) -> Result<()> {
        if let Some(command) = &self.cli.command {
            if handle_command(command, &self.config).await? {
                return Ok(()); // Command handled, exit
            }
        }

        let working_dir = self.cli.path.clone().unwrap_or_else(|| PathBuf::from("."));
        if !working_dir.is_dir() {
            return Err(GitmateError::ConfigError(format!(
                "Working directory {} does not exist",
                working_dir.display()
            ))
            .into());
        }
        let model_name = self.config.model.name.clone();

        println!("Starting gitmate with model: {}", model_name.green());
        println!(
            "Working tree: {}",
            working_dir
                .canonicalize()
                .unwrap_or_else(|_| working_dir.clone())
                .display()
        );
        if !self.config.execution.enforce_allowlist {
            println!(
                "{}",
                "[WARNING] Model-proposed commands run verbatim. Use --enforce-allowlist to restrict them."
                    .yellow()
            );
        }

        if !self.cli.skip_model_check && self.config.ollama.is_local() {
            ensure_ollama_model(&model_name, self.cli.no_auto_install).await?;
        }

        let shell: Arc<dyn Shell> = Arc::new(
            SystemShell::new(&working_dir).with_timeout(self.config.execution.command_timeout_secs),
        );
        let executor = CommandExecutor::new(Arc::clone(&shell));
        let inspector = RepoInspector::new(shell, &working_dir, self.config.git.clone());
        let oracle = ModelFactory::create(&model_name, &self.config)
            .context("Failed to initialize model")?;
        let workflow = Workflow::new(
            executor.clone(),
            inspector,
            PlanGenerator::new(oracle, &self.config.git),
            CommandPolicy::new(self.config.execution.enforce_allowlist),
            self.config.git.clone(),
        );

        let mut prompter = StdinPrompter::new();

        // Global identity is settled before the first instruction
        let store = CredentialStore::new(&self.config.credentials.file);
        ensure_identity(&store, &mut prompter, &executor).await?;

        match &self.cli.prompt {
            Some(instruction) => {
                if let Outcome::Completed(report) = workflow.handle(&mut prompter, instruction).await? {
                    if let Some(error) = report.oracle_error {
                        anyhow::bail!("Model request failed: {}", error);
                    }
                }
            }
            None => {
                println!("Type an instruction, or `exit` to quit.");
                workflow.run(&mut prompter).await?;
            }
        }

        Ok(())
    }
}
