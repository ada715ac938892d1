//! OpenAI-compatible chat-completions backend
//!
//! Works against any endpoint implementing the `/chat/completions` shape
//! (OpenAI, vLLM, llama.cpp server, and friends).

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Llm, Message, Role};

pub struct OpenAiCompatClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OpenAiCompatClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            temperature,
            max_tokens,
        }
    }

    async fn complete(&self, messages: Vec<WireMessage<'_>>) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response: ChatResponse = builder
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("Chat completion response contained no choices")
    }
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

#[async_trait]
impl Llm for OpenAiCompatClient {
    async fn chat(&self, message: &str) -> Result<String> {
        self.complete(vec![WireMessage {
            role: "user",
            content: message,
        }])
        .await
    }

    async fn chat_with_history(&self, history: &mut Vec<Message>, message: &str) -> Result<String> {
        history.push(Message {
            role: Role::User,
            content: message.to_string(),
        });

        let messages = history
            .iter()
            .map(|m| WireMessage {
                role: wire_role(m.role),
                content: &m.content,
            })
            .collect();

        let response = self.complete(messages).await?;

        history.push(Message {
            role: Role::Assistant,
            content: response.clone(),
        });

        Ok(response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
