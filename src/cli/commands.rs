use anyhow::Result;
use colored::Colorize;

use crate::{
    app::{get_config_dir, init_config, Config},
    models::ModelFactory,
    ollama::{has_model, is_installed as is_ollama_installed, list_models as get_ollama_models},
};

use super::Commands;

/// Handle CLI subcommands. `Ok(true)` means the command is done.
pub async fn handle_command(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing gitmate configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(true)
        }
        Commands::Version => {
            show_version();
            Ok(true)
        }
        Commands::Status => {
            show_status(config).await?;
            Ok(true)
        }
        Commands::Chat => Ok(false), // Continue to the instruction loop
    }
}

/// Show version information
pub fn show_version() {
    println!("gitmate v{}", env!("CARGO_PKG_VERSION"));
    println!("   A conversational git assistant driven by a local language model");
}

fn report(ok: bool, label: &str, detail: impl std::fmt::Display) {
    if ok {
        println!("  {} {}: {}", "[OK]".green(), label, detail);
    } else {
        println!("  {} {}: {}", "[MISSING]".red(), label, detail);
    }
}

/// Show status of all dependencies
async fn show_status(config: &Config) -> Result<()> {
    println!("gitmate Status:");
    println!();

    report(which::which("git").is_ok(), "git", "required");
    let cli = &config.git.hosting_cli;
    report(
        which::which(cli).is_ok(),
        cli,
        "optional, creates hosted repositories",
    );

    // Prefer what the server reports; fall back to the local CLI
    let models = match ModelFactory::list_available(config).await {
        Ok(models) => Some(models),
        Err(_) if is_ollama_installed() => get_ollama_models().ok(),
        Err(_) => None,
    };
    match models {
        Some(models) => {
            report(true, "Ollama", format!("{} ({} models)", config.ollama.base_url(), models.len()));
            let installed = has_model(&models, &config.model.name);
            report(installed, "Model", &config.model.name);
        }
        None => report(false, "Ollama", format!("not reachable at {}", config.ollama.base_url())),
    }

    if let Ok(dir) = get_config_dir() {
        let path = dir.join("config.toml");
        if path.exists() {
            println!("\n  Configuration: {}", path.display());
        } else {
            println!("\n  Configuration: defaults (run `gitmate init` to create one)");
        }
    }
    let credentials = &config.credentials.file;
    println!(
        "  Credentials:   {} ({})",
        credentials.display(),
        if credentials.exists() { "present" } else { "will be created" }
    );
    println!(
        "  Allow-list:    {}",
        if config.execution.enforce_allowlist { "enforced" } else { "advisory" }
    );
    let limit = |secs: Option<u64>| secs.map_or("none".to_string(), |s| format!("{}s", s));
    println!(
        "  Timeouts:      commands {}, oracle {}",
        limit(config.execution.command_timeout_secs),
        limit(config.execution.oracle_timeout_secs)
    );

    println!();
    Ok(())
}
