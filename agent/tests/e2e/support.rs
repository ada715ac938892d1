//! Shared helpers for the e2e tests

use std::collections::HashMap;
use std::path::PathBuf;

use quill_agent::mcp::ServerDescriptor;

/// Path to the built echo-mcp binary (debug preferred, release fallback).
pub fn echo_mcp_binary() -> PathBuf {
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..");
    let debug = workspace.join("target/debug/echo-mcp");
    if debug.exists() {
        return debug;
    }
    workspace.join("target/release/echo-mcp")
}

/// Descriptor pointing at the built echo-mcp binary.
pub fn echo_descriptor(name: &str) -> ServerDescriptor {
    ServerDescriptor {
        name: name.to_string(),
        command: echo_mcp_binary().to_string_lossy().into_owned(),
        args: Vec::new(),
        env: HashMap::new(),
    }
}

/// Descriptor for an echo-mcp instance restricted to the given tools via
/// its `ECHO_MCP_TOOLS` environment variable.
pub fn restricted_echo_descriptor(name: &str, tools: &str) -> ServerDescriptor {
    let mut descriptor = echo_descriptor(name);
    descriptor
        .env
        .insert("ECHO_MCP_TOOLS".to_string(), tools.to_string());
    descriptor
}

/// Descriptor whose command cannot be spawned.
pub fn broken_descriptor(name: &str) -> ServerDescriptor {
    ServerDescriptor {
        name: name.to_string(),
        command: "quill-no-such-binary-exists".to_string(),
        args: Vec::new(),
        env: HashMap::new(),
    }
}
