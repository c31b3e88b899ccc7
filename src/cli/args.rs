use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gitmate")]
#[command(version)]
#[command(about = "Tell gitmate what you want done with your repository", long_about = None)]
pub struct Cli {
    /// Ollama model that turns instructions into git commands (e.g. qwen:4b)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Working tree to operate on (defaults to current directory)
    #[arg(short = 'C', long)]
    pub path: Option<PathBuf>,

    /// Run a single instruction and exit
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Don't check that the model is installed locally
    #[arg(long)]
    pub skip_model_check: bool,

    /// Never pull a missing model automatically
    #[arg(long)]
    pub no_auto_install: bool,

    /// Skip model-proposed commands that are not on the allow-list
    #[arg(long)]
    pub enforce_allowlist: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Start the instruction loop (default)
    Chat,
    /// Show version information
    Version,
    /// Check status of dependencies
    Status,
}
