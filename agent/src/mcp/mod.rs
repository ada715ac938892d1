//! Multi-server MCP (Model Context Protocol) client
//!
//! Drives external tool servers spawned as subprocesses speaking MCP over
//! their standard streams. Components:
//!
//! - [`ServerRegistry`] — ordered, read-only server descriptors from config
//! - [`SessionRunner`] — single-use spawn/handshake/operation/teardown sessions
//! - [`ToolCatalog`] — per-server tool discovery
//! - [`ToolInvoker`] — name resolution, existence check, ordered failover
//! - [`ProcessSupervisor`] — optional background process lifecycle, decoupled
//!   from invocation

mod catalog;
mod error;
mod invoker;
mod registry;
mod session;
mod supervisor;

pub use catalog::{McpTool, ToolCatalog};
pub use error::McpError;
pub use invoker::ToolInvoker;
pub use registry::{ServerDescriptor, ServerRegistry};
pub use session::{McpSession, SessionRunner};
pub use supervisor::ProcessSupervisor;
