//! Configured MCP server descriptors
//!
//! The registry preserves configuration order, and that order is the
//! failover scan order: first listed, first tried.

use std::collections::HashMap;

use serde::Deserialize;

use super::error::McpError;

/// Launch description for one MCP server, as loaded from `.quill.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerDescriptor {
    /// Unique server name (earlier entries win on duplicates)
    pub name: String,
    /// Executable to spawn
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Environment overrides, merged onto the inherited environment.
    /// Values may reference `$VARS`; they are expanded at spawn time.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// Ordered, read-only collection of configured servers.
#[derive(Debug, Default)]
pub struct ServerRegistry {
    servers: Vec<ServerDescriptor>,
}

impl ServerRegistry {
    pub fn new(servers: Vec<ServerDescriptor>) -> Self {
        Self { servers }
    }

    /// All descriptors in configuration order.
    pub fn all(&self) -> &[ServerDescriptor] {
        &self.servers
    }

    /// Look up a server by name. First match wins, so duplicate names
    /// resolve to the earlier entry.
    pub fn named(&self, name: &str) -> Result<&ServerDescriptor, McpError> {
        self.servers
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| McpError::ServerNotFound(name.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }
}
