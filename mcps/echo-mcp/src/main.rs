//! Echo MCP Server
//!
//! Trivial text tools (echo, reverse, fail) over stdio, used by the agent's
//! end-to-end tests as a real tool-provider subprocess.
//!
//! Configure in `.quill.toml`:
//! ```toml
//! [[mcp_servers]]
//! name = "echo"
//! command = "./target/debug/echo-mcp"
//! ```
//!
//! Set `ECHO_MCP_TOOLS` (comma separated) to advertise only a subset of
//! the tools, e.g. `ECHO_MCP_TOOLS=echo,fail`.

mod server;

use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use server::EchoMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the MCP protocol; logs go to stderr.
    let filter = EnvFilter::from_default_env().add_directive("echo_mcp=info".parse()?);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();

    tracing::info!("Starting echo MCP server");

    let service = EchoMcpServer::from_env()
        .serve(rmcp::transport::stdio())
        .await?;
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
