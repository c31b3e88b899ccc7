use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::traits::Oracle;
use super::types::{ChatMessage, ModelConfig};
use crate::utils::GitmateError;

/// Oracle backed by an Ollama server's `/api/chat` endpoint
pub struct OllamaChat {
    client: Client,
    base_url: String,
    model_name: String,
    config: ModelConfig,
}

impl OllamaChat {
    pub fn new(base_url: &str, model_name: &str, config: ModelConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build().context("Failed to build HTTP client")?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_name: model_name.to_string(),
            config,
        })
    }

    /// A timeout at any stage of the exchange is reported as such
    fn transport_error(&self, error: reqwest::Error, what: &str) -> GitmateError {
        match self.config.timeout_secs {
            Some(secs) if error.is_timeout() => GitmateError::OracleTimeout(secs),
            _ => GitmateError::OracleError(format!("{} ({})", what, error)),
        }
    }

    fn request_body<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model_name,
            messages,
            stream: false,
            options: self.config.temperature.map(|temperature| ChatOptions { temperature }),
        }
    }
}

#[async_trait]
impl Oracle for OllamaChat {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        debug!(model = %self.model_name, %url, "sending chat request");

        let response = self
            .client
            .post(&url)
            .json(&self.request_body(messages))
            .send()
            .await
            .map_err(|e| {
                self.transport_error(
                    e,
                    &format!("Failed to reach Ollama at {}. Is it running? Try: ollama serve", self.base_url),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GitmateError::OracleError(format!("Ollama returned {}: {}", status, error_text)).into());
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(e, "Malformed Ollama response"))?;

        debug!(model = %self.model_name, chars = body.message.content.len(), "oracle responded");
        Ok(body.message.content)
    }
}

// Request/response structures for the Ollama chat API

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ChatOptions>,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}
