//! Chat agent: an LLM backend plus MCP tool access
//!
//! `ChatAgent` wires the configured backend and the MCP client components
//! together behind one facade for the CLI.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::config::Config;
use crate::llm::{self, Llm, Message};
use crate::mcp::{McpError, ServerRegistry, SessionRunner, ToolCatalog, ToolInvoker};

pub struct ChatAgent {
    config: Config,
    llm: Box<dyn Llm>,
    registry: Arc<ServerRegistry>,
    catalog: ToolCatalog,
    invoker: ToolInvoker,
}

impl ChatAgent {
    /// Build an agent from config. Fails on an unknown provider.
    pub fn new(config: Config) -> Result<Self> {
        let llm = llm::from_config(&config)?;
        let registry = Arc::new(ServerRegistry::new(config.mcp_servers.clone()));
        let runner = SessionRunner::new();

        Ok(Self {
            catalog: ToolCatalog::new(Arc::clone(&registry), runner.clone()),
            invoker: ToolInvoker::new(Arc::clone(&registry), runner),
            config,
            llm,
            registry,
        })
    }

    pub fn provider(&self) -> &str {
        &self.config.provider
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Names of the configured MCP servers, in failover order.
    pub fn server_names(&self) -> Vec<String> {
        self.registry
            .all()
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    /// Single-turn generation.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.llm.chat(prompt).await
    }

    /// Multi-turn generation; appends to `history`.
    pub async fn generate_with_history(
        &self,
        history: &mut Vec<Message>,
        prompt: &str,
    ) -> Result<String> {
        self.llm.chat_with_history(history, prompt).await
    }

    /// Advertised tool names per server.
    pub async fn list_tools(
        &self,
        server_name: Option<&str>,
    ) -> Result<HashMap<String, Vec<String>>, McpError> {
        self.catalog.list_tools(server_name).await
    }

    /// Invoke an MCP tool, scanning servers in configured order unless pinned.
    pub async fn use_tool(
        &self,
        name: &str,
        arguments: Option<Value>,
        server_name: Option<&str>,
    ) -> Result<Value, McpError> {
        self.invoker.call_tool(name, arguments, server_name).await
    }
}
