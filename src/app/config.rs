use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_BRANCH, DEFAULT_COMMIT_MESSAGE, DEFAULT_CREDENTIALS_FILE, DEFAULT_HOSTING_CLI,
    DEFAULT_MODEL, DEFAULT_OLLAMA_HOST, DEFAULT_OLLAMA_PORT, DEFAULT_REMOTE, DEFAULT_TEMPERATURE,
    GIT_METADATA_DIR,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Oracle model configuration
    #[serde(default)]
    pub model: ModelSettings,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Git workflow configuration
    #[serde(default)]
    pub git: GitSettings,

    /// Credential file configuration
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Command and oracle execution limits
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Oracle model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Model name as known to Ollama
    pub name: String,
    /// Temperature for generation
    pub temperature: Option<f32>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
        }
    }
}

/// Ollama configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Ollama server host
    pub host: String,
    /// Ollama server port
    pub port: u16,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OLLAMA_HOST.to_string(),
            port: DEFAULT_OLLAMA_PORT,
        }
    }
}

impl OllamaConfig {
    /// Base URL of the Ollama HTTP API
    pub fn base_url(&self) -> String {
        let (scheme, host) = self.split_host();
        // IPv6 literals need brackets before a port can follow
        if host.contains(':') && !host.starts_with('[') {
            format!("{}://[{}]:{}", scheme, host, self.port)
        } else {
            format!("{}://{}:{}", scheme, host, self.port)
        }
    }

    /// Whether the server is expected on this machine
    pub fn is_local(&self) -> bool {
        let (_, host) = self.split_host();
        matches!(host, "localhost" | "127.0.0.1" | "::1" | "[::1]")
    }

    fn split_host(&self) -> (&str, &str) {
        let (scheme, host) = match self.host.split_once("://") {
            Some((scheme, host)) => (scheme, host),
            None => ("http", self.host.as_str()),
        };
        (scheme, host.trim_end_matches('/'))
    }
}

/// Git workflow settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitSettings {
    /// Branch name used when the current branch cannot be determined
    pub default_branch: String,
    /// Remote every publish goes to
    pub remote: String,
    /// Message used for automatic commits
    pub commit_message: String,
    /// Hosting CLI binary able to create a hosted repository
    pub hosting_cli: String,
    /// Metadata directory marking an initialized repository
    pub metadata_dir: String,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            default_branch: DEFAULT_BRANCH.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            hosting_cli: DEFAULT_HOSTING_CLI.to_string(),
            metadata_dir: GIT_METADATA_DIR.to_string(),
        }
    }
}

/// Credential file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Path of the KEY=VALUE file, relative to the invocation directory
    pub file: PathBuf,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
        }
    }
}

/// Execution limits. `None` means wait indefinitely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Upper bound for any spawned shell command
    pub command_timeout_secs: Option<u64>,
    /// Upper bound for a single oracle request
    pub oracle_timeout_secs: Option<u64>,
    /// Skip oracle commands outside the allow-list instead of running them
    pub enforce_allowlist: bool,
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let global_config = get_config_dir()?.join("config.toml");
    let local_config = PathBuf::from(".gitmate/config.toml");
    build_figment(&global_config, &local_config)
        .extract()
        .context("Failed to load configuration")
}

/// Load configuration from a single explicit TOML file
pub fn load_config_file(path: &Path) -> Result<Config> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn build_figment(global_config: &Path, local_config: &Path) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if global_config.exists() {
        figment = figment.merge(Toml::file(global_config));
    }

    if local_config.exists() {
        figment = figment.merge(Toml::file(local_config));
    }

    // GITMATE_GIT__REMOTE=upstream -> git.remote
    figment.merge(Env::prefixed("GITMATE_").split("__"))
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "gitmate") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("gitmate");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<PathBuf> {
    let config_file = get_config_dir()?.join("config.toml");

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    } else {
        println!("Configuration already exists at: {}", config_file.display());
    }

    Ok(config_file)
}
