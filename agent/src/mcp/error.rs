//! MCP error taxonomy
//!
//! Per-candidate failures (spawn, handshake, timeout, missing tool) are
//! ordinary values consumed by the failover scan in `ToolInvoker`; only
//! exhaustion of every candidate surfaces to the caller.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by the MCP client subsystem.
#[derive(Debug, Error)]
pub enum McpError {
    /// A pinned server name is not present in the registry.
    #[error("MCP server '{0}' is not configured")]
    ServerNotFound(String),

    /// The registry is empty, so there is nothing to scan.
    #[error("no MCP servers configured")]
    NoServersConfigured,

    /// The server subprocess could not be spawned.
    #[error("failed to spawn MCP server '{server}': {source}")]
    Spawn {
        server: String,
        #[source]
        source: std::io::Error,
    },

    /// The subprocess started but the initialize exchange failed.
    #[error("handshake with MCP server '{server}' failed: {source}")]
    Handshake { server: String, source: anyhow::Error },

    /// A session step did not complete within its bounded wait.
    #[error("MCP server '{server}' did not respond within {timeout:?}")]
    Timeout { server: String, timeout: Duration },

    /// A list-tools or call-tool exchange failed inside an established session.
    #[error("protocol exchange with MCP server '{server}' failed: {source}")]
    Protocol { server: String, source: anyhow::Error },

    /// The server is reachable but does not advertise the requested tool.
    #[error("tool '{tool}' is not advertised by server '{server}'")]
    ToolNotFound { tool: String, server: String },

    /// Every candidate server was tried and failed.
    #[error("tool call '{tool}' failed on all candidate servers; last error: {last}")]
    InvocationFailed { tool: String, last: Box<McpError> },
}
