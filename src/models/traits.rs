use anyhow::Result;
use async_trait::async_trait;

use super::types::ChatMessage;

/// A chat endpoint that turns messages into a single text reply
///
/// The reply is free text; nothing here knows about plans or commands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send the conversation and return the reply verbatim
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String>;
}
