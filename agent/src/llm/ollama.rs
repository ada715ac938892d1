//! Local models via the Ollama HTTP API

use anyhow::Result;
use async_trait::async_trait;
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage},
    Ollama,
};

use super::{Llm, Message, Role};

pub struct OllamaClient {
    client: Ollama,
    model: String,
}

impl OllamaClient {
    /// Point at an Ollama daemon. A malformed `url` falls back to the
    /// stock local daemon address rather than failing construction.
    pub fn new(url: &str, model: &str) -> Self {
        // ollama-rs wants host and port separately, not a full URL.
        let url = url::Url::parse(url)
            .unwrap_or_else(|_| url::Url::parse("http://localhost:11434").unwrap());

        let host = url.host_str().unwrap_or("localhost").to_string();
        let port = url.port().unwrap_or(11434);

        Self {
            client: Ollama::new(format!("http://{}", host), port),
            model: model.to_string(),
        }
    }
}

fn to_wire(message: &Message) -> ChatMessage {
    match message.role {
        Role::System => ChatMessage::system(message.content.clone()),
        Role::User => ChatMessage::user(message.content.clone()),
        Role::Assistant => ChatMessage::assistant(message.content.clone()),
    }
}

#[async_trait]
impl Llm for OllamaClient {
    async fn chat(&self, message: &str) -> Result<String> {
        let request = ChatMessageRequest::new(
            self.model.clone(),
            vec![ChatMessage::user(message.to_string())],
        );
        let response = self.client.send_chat_messages(request).await?;
        Ok(response.message.content)
    }

    async fn chat_with_history(&self, history: &mut Vec<Message>, message: &str) -> Result<String> {
        history.push(Message {
            role: Role::User,
            content: message.to_string(),
        });

        let request = ChatMessageRequest::new(
            self.model.clone(),
            history.iter().map(to_wire).collect(),
        );
        let response = self.client.send_chat_messages(request).await?;

        history.push(Message {
            role: Role::Assistant,
            content: response.message.content.clone(),
        });
        Ok(response.message.content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
