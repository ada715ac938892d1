//! Session-scoped MCP connections
//!
//! `SessionRunner` is the only place that opens a live connection to a
//! server. Every session is single-use: spawn the subprocess, perform the
//! initialize handshake, run the caller-supplied operation, tear down.
//! Teardown happens on every exit path, including handshake failure and
//! timeout, so no call ever leaks a process or an open stream.

use std::time::Duration;

use futures_util::future::BoxFuture;
use rmcp::{service::RunningService, transport::TokioChildProcess, RoleClient, ServiceExt};
use tokio::process::Command;

use super::error::McpError;
use super::registry::ServerDescriptor;

/// An established, initialized client session with one MCP server.
pub type McpSession = RunningService<RoleClient, ()>;

/// Default timeout for spawning and initializing an MCP server
const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for the operation run inside the session
const DEFAULT_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Opens short-lived protocol sessions against single server descriptors.
#[derive(Debug, Clone)]
pub struct SessionRunner {
    startup_timeout: Duration,
    exchange_timeout: Duration,
}

impl Default for SessionRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRunner {
    pub fn new() -> Self {
        Self {
            startup_timeout: DEFAULT_STARTUP_TIMEOUT,
            exchange_timeout: DEFAULT_EXCHANGE_TIMEOUT,
        }
    }

    pub fn with_timeouts(startup_timeout: Duration, exchange_timeout: Duration) -> Self {
        Self {
            startup_timeout,
            exchange_timeout,
        }
    }

    /// Build the launch command: configured args, inherited environment,
    /// `$VAR`-expanded overrides on top.
    fn command_for(descriptor: &ServerDescriptor) -> Command {
        let mut cmd = Command::new(&descriptor.command);
        if !descriptor.args.is_empty() {
            cmd.args(&descriptor.args);
        }
        for (key, value) in &descriptor.env {
            let expanded = shellexpand::env(value).unwrap_or_else(|_| value.clone().into());
            cmd.env(key, expanded.as_ref());
        }
        cmd
    }

    /// Open a session against `descriptor`, run `op` inside it, and tear the
    /// session down regardless of the outcome.
    ///
    /// Spawn and handshake share the startup timeout; `op` gets the exchange
    /// timeout. A timed-out handshake future is dropped, which kills the
    /// half-initialized subprocess along with its transport.
    pub async fn run<T>(
        &self,
        descriptor: &ServerDescriptor,
        op: impl for<'a> FnOnce(&'a McpSession) -> BoxFuture<'a, Result<T, McpError>>,
    ) -> Result<T, McpError> {
        tracing::debug!("opening MCP session with '{}'", descriptor.name);

        let cmd = Self::command_for(descriptor);
        let service = tokio::time::timeout(self.startup_timeout, async {
            let transport = TokioChildProcess::new(cmd).map_err(|e| McpError::Spawn {
                server: descriptor.name.clone(),
                source: e,
            })?;
            ().serve(transport).await.map_err(|e| McpError::Handshake {
                server: descriptor.name.clone(),
                source: e.into(),
            })
        })
        .await
        .map_err(|_| McpError::Timeout {
            server: descriptor.name.clone(),
            timeout: self.startup_timeout,
        })??;

        let outcome = tokio::time::timeout(self.exchange_timeout, op(&service)).await;

        // Teardown must never mask the operation's outcome.
        if let Err(e) = service.cancel().await {
            tracing::debug!("failed to cancel session with '{}': {}", descriptor.name, e);
        }

        match outcome {
            Ok(result) => result,
            Err(_) => Err(McpError::Timeout {
                server: descriptor.name.clone(),
                timeout: self.exchange_timeout,
            }),
        }
    }
}
