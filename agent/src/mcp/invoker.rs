//! Tool invocation with ordered failover
//!
//! Resolves a tool name to a target server (explicit pin, or a scan of the
//! registry in configured order), verifies the tool is advertised, and
//! performs the call. All per-candidate failures become "try the next
//! candidate"; only exhausting every candidate surfaces an error.

use std::sync::Arc;

use futures_util::FutureExt;
use rmcp::model::CallToolRequestParam;
use serde_json::Value;

use super::error::McpError;
use super::registry::{ServerDescriptor, ServerRegistry};
use super::session::{McpSession, SessionRunner};

pub struct ToolInvoker {
    registry: Arc<ServerRegistry>,
    runner: SessionRunner,
}

impl ToolInvoker {
    pub fn new(registry: Arc<ServerRegistry>, runner: SessionRunner) -> Self {
        Self { registry, runner }
    }

    /// Call `name` with `arguments`, optionally pinned to one server.
    ///
    /// Unpinned calls scan the registry in configured order and return the
    /// first successful result; candidates after the first success are never
    /// contacted. The returned payload is the response's `content` field
    /// when present, otherwise the raw response.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Value>,
        server_name: Option<&str>,
    ) -> Result<Value, McpError> {
        let candidates: Vec<&ServerDescriptor> = match server_name {
            Some(pinned) => vec![self.registry.named(pinned)?],
            None => self.registry.all().iter().collect(),
        };
        if candidates.is_empty() {
            return Err(McpError::NoServersConfigured);
        }

        let args = arguments.as_ref().and_then(|v| v.as_object()).cloned();

        let mut last_error: Option<McpError> = None;
        for descriptor in candidates {
            match self.try_server(descriptor, name, args.clone()).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(
                        "candidate '{}' failed for tool '{}': {}",
                        descriptor.name,
                        name,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(last) => McpError::InvocationFailed {
                tool: name.to_string(),
                last: Box::new(last),
            },
            None => McpError::NoServersConfigured,
        })
    }

    /// One candidate attempt, inside a single session: verify the tool is
    /// advertised, then call it. Servers reject unknown tool names in
    /// inconsistent ways, so verifying first keeps failover deterministic:
    /// the first server that advertises the tool wins.
    async fn try_server(
        &self,
        descriptor: &ServerDescriptor,
        tool: &str,
        arguments: Option<serde_json::Map<String, Value>>,
    ) -> Result<Value, McpError> {
        let server = descriptor.name.clone();
        let tool_name = tool.to_string();

        self.runner
            .run(descriptor, move |session: &McpSession| {
                async move {
                    let listing =
                        session
                            .list_tools(Default::default())
                            .await
                            .map_err(|e| McpError::Protocol {
                                server: server.clone(),
                                source: e.into(),
                            })?;

                    if !listing
                        .tools
                        .iter()
                        .any(|t| t.name.as_ref() == tool_name.as_str())
                    {
                        return Err(McpError::ToolNotFound {
                            tool: tool_name,
                            server,
                        });
                    }

                    let result = session
                        .call_tool(CallToolRequestParam {
                            name: tool_name.clone().into(),
                            arguments,
                            task: None,
                        })
                        .await
                        .map_err(|e| McpError::Protocol {
                            server: server.clone(),
                            source: e.into(),
                        })?;

                    let payload =
                        serde_json::to_value(&result).map_err(|e| McpError::Protocol {
                            server: server.clone(),
                            source: e.into(),
                        })?;

                    Ok(extract_content(payload))
                }
                .boxed()
            })
            .await
    }
}

/// Surface the payload's `content` field directly when present.
fn extract_content(payload: Value) -> Value {
    match payload {
        Value::Object(mut map) => match map.remove("content") {
            Some(content) => content,
            None => Value::Object(map),
        },
        other => other,
    }
}
