use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

use super::ollama_chat::OllamaChat;
use super::traits::Oracle;
use super::types::ModelConfig;
use crate::app::Config;

/// Factory for creating oracle instances from configuration
pub struct ModelFactory;

impl ModelFactory {
    /// Create the oracle for `model_name` using the configured Ollama server
    pub fn create(model_name: &str, config: &Config) -> Result<Box<dyn Oracle>> {
        if model_name.trim().is_empty() {
            anyhow::bail!("Model name is empty. Set [model] name in the config or pass --model");
        }

        let model_config = ModelConfig {
            temperature: config.model.temperature,
            timeout_secs: config.execution.oracle_timeout_secs,
        };

        let oracle = OllamaChat::new(&config.ollama.base_url(), model_name, model_config)?;
        Ok(Box::new(oracle))
    }

    /// List models the configured Ollama server reports
    pub async fn list_available(config: &Config) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct TagsResponse {
            models: Vec<ModelInfo>,
        }

        #[derive(Deserialize)]
        struct ModelInfo {
            name: String,
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(3))
            .build()?;
        let url = format!("{}/api/tags", config.ollama.base_url());

        let response = client.get(&url).send().await?.error_for_status()?;
        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}
