//! Tool discovery across configured MCP servers

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::Value;

use super::error::McpError;
use super::registry::{ServerDescriptor, ServerRegistry};
use super::session::{McpSession, SessionRunner};

/// A tool advertised by an MCP server
#[derive(Debug, Clone)]
pub struct McpTool {
    /// Server this tool belongs to
    pub server: String,
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: Option<String>,
    /// Input schema (JSON)
    pub input_schema: Option<Value>,
}

/// Queries one or all configured servers for their advertised tools.
///
/// Each query is an independent single-use session. A server that fails to
/// answer maps to an empty entry; discovery only fails outright when no
/// servers are configured at all.
pub struct ToolCatalog {
    registry: Arc<ServerRegistry>,
    runner: SessionRunner,
}

impl ToolCatalog {
    pub fn new(registry: Arc<ServerRegistry>, runner: SessionRunner) -> Self {
        Self { registry, runner }
    }

    /// List advertised tool names per server.
    ///
    /// With `server_name` the query is limited to that server (fails with
    /// `ServerNotFound` if unconfigured). The returned map has exactly one
    /// entry per queried server; failing servers map to an empty list.
    pub async fn list_tools(
        &self,
        server_name: Option<&str>,
    ) -> Result<HashMap<String, Vec<String>>, McpError> {
        let detailed = self.list_tools_detailed(server_name).await?;
        Ok(detailed
            .into_iter()
            .map(|(server, tools)| (server, tools.into_iter().map(|t| t.name).collect()))
            .collect())
    }

    /// Like [`list_tools`](Self::list_tools) but with full tool metadata,
    /// for the agent loop and CLI display.
    pub async fn list_tools_detailed(
        &self,
        server_name: Option<&str>,
    ) -> Result<HashMap<String, Vec<McpTool>>, McpError> {
        let candidates: Vec<&ServerDescriptor> = match server_name {
            Some(name) => vec![self.registry.named(name)?],
            None => self.registry.all().iter().collect(),
        };
        if candidates.is_empty() {
            return Err(McpError::NoServersConfigured);
        }

        let mut result: HashMap<String, Vec<McpTool>> = HashMap::new();
        for descriptor in candidates {
            let tools = match self.query_server(descriptor).await {
                Ok(tools) => {
                    tracing::debug!("server '{}': {} tools", descriptor.name, tools.len());
                    tools
                }
                Err(e) => {
                    tracing::warn!("failed to list tools from '{}': {}", descriptor.name, e);
                    Vec::new()
                }
            };
            // Earlier entries win when a name is duplicated.
            result.entry(descriptor.name.clone()).or_insert(tools);
        }

        Ok(result)
    }

    /// One session: handshake, list tools, teardown.
    async fn query_server(&self, descriptor: &ServerDescriptor) -> Result<Vec<McpTool>, McpError> {
        let server = descriptor.name.clone();
        self.runner
            .run(descriptor, move |session: &McpSession| {
                async move {
                    let response =
                        session
                            .list_tools(Default::default())
                            .await
                            .map_err(|e| McpError::Protocol {
                                server: server.clone(),
                                source: e.into(),
                            })?;

                    Ok(response
                        .tools
                        .into_iter()
                        .map(|t| McpTool {
                            server: server.clone(),
                            name: t.name.to_string(),
                            description: t.description.map(|d| d.to_string()),
                            input_schema: serde_json::to_value(&t.input_schema).ok(),
                        })
                        .collect())
                }
                .boxed()
            })
            .await
    }
}
