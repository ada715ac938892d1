//! Minimal Rust chat agent with Ollama and MCP tool support

pub mod agent;
pub mod cli;
pub mod config;
pub mod llm;
pub mod mcp;
