//! Model backends
//!
//! One trait, two providers. `config.provider` picks the backend at
//! startup; everything past `from_config` is provider-agnostic.

mod ollama;
mod openai;

pub use ollama::OllamaClient;
pub use openai::OpenAiCompatClient;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;

/// One turn of a conversation.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A chat-capable model backend.
#[async_trait]
pub trait Llm: Send + Sync {
    /// One-shot completion with no prior context.
    async fn chat(&self, message: &str) -> Result<String>;

    /// Completion over `history`; appends both the user turn and the
    /// assistant reply to it.
    async fn chat_with_history(&self, history: &mut Vec<Message>, message: &str) -> Result<String>;

    fn model(&self) -> &str;
}

/// Build the backend selected by `config.provider`.
pub fn from_config(config: &Config) -> Result<Box<dyn Llm>> {
    match config.provider.as_str() {
        "ollama" => Ok(Box::new(OllamaClient::new(&config.ollama_url, &config.model))),
        "openai" => Ok(Box::new(OpenAiCompatClient::new(
            &config.openai_base_url,
            &config.model,
            std::env::var("OPENAI_API_KEY").ok(),
            config.temperature,
            config.max_tokens,
        ))),
        other => anyhow::bail!("unknown provider: {} (expected \"ollama\" or \"openai\")", other),
    }
}
