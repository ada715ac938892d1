//! MCP server implementation for the echo tools

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Env var naming the tools to advertise, comma separated. Unset means all.
pub const TOOLS_ENV: &str = "ECHO_MCP_TOOLS";

/// The echo MCP server
#[derive(Clone)]
pub struct EchoMcpServer {
    tool_router: ToolRouter<Self>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EchoParams {
    #[schemars(description = "Text to echo back")]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReverseParams {
    #[schemars(description = "Text to reverse")]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FailParams {
    #[schemars(description = "Error message to fail with")]
    pub message: Option<String>,
}

// One router per tool so instances can advertise a subset. The client's
// failover tests need a server that is reachable but missing a tool.

#[tool_router(router = echo_tool_router)]
impl EchoMcpServer {
    #[tool(description = "Echo the given text back unchanged")]
    async fn echo(
        &self,
        Parameters(params): Parameters<EchoParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(params.text)]))
    }
}

#[tool_router(router = reverse_tool_router)]
impl EchoMcpServer {
    #[tool(description = "Reverse the given text")]
    async fn reverse(
        &self,
        Parameters(params): Parameters<ReverseParams>,
    ) -> Result<CallToolResult, McpError> {
        let reversed: String = params.text.chars().rev().collect();
        Ok(CallToolResult::success(vec![Content::text(reversed)]))
    }
}

#[tool_router(router = fail_tool_router)]
impl EchoMcpServer {
    #[tool(description = "Always fail, for exercising client error paths")]
    async fn fail(
        &self,
        Parameters(params): Parameters<FailParams>,
    ) -> Result<CallToolResult, McpError> {
        let message = params
            .message
            .unwrap_or_else(|| "requested failure".to_string());
        Err(McpError::internal_error(message, None))
    }
}

impl EchoMcpServer {
    /// Full tool set.
    pub fn new() -> Self {
        Self {
            tool_router: Self::echo_tool_router()
                + Self::reverse_tool_router()
                + Self::fail_tool_router(),
        }
    }

    /// Only the named tools. Unknown names are ignored with a warning; an
    /// empty selection yields a server that advertises nothing.
    pub fn with_tools(names: &[&str]) -> Self {
        let mut router = ToolRouter::new();
        for name in names {
            match *name {
                "echo" => router += Self::echo_tool_router(),
                "reverse" => router += Self::reverse_tool_router(),
                "fail" => router += Self::fail_tool_router(),
                other => tracing::warn!("ignoring unknown tool name '{other}'"),
            }
        }
        Self { tool_router: router }
    }

    /// Honor `ECHO_MCP_TOOLS` when set, otherwise serve everything.
    pub fn from_env() -> Self {
        match std::env::var(TOOLS_ENV) {
            Ok(spec) => {
                let names: Vec<&str> = spec
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect();
                Self::with_tools(&names)
            }
            Err(_) => Self::new(),
        }
    }
}

#[tool_handler]
impl rmcp::ServerHandler for EchoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Echo MCP Server - trivial text tools for exercising MCP clients.".into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

impl Default for EchoMcpServer {
    fn default() -> Self {
        Self::new()
    }
}
