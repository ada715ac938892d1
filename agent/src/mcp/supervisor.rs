//! Best-effort lifecycle management for background MCP server processes
//!
//! Decoupled from tool invocation: `ToolCatalog` and `ToolInvoker` always
//! open their own short-lived sessions and never touch these processes.
//! The tracked-process table is the only long-lived mutable state in the
//! MCP subsystem; a single async mutex serializes start/stop so concurrent
//! calls cannot double-spawn or double-kill a server.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use super::registry::ServerRegistry;

struct ManagedProcess {
    child: Child,
    started_at: Instant,
}

impl ManagedProcess {
    fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }
}

/// Starts, tracks, and stops long-lived MCP server processes.
pub struct ProcessSupervisor {
    registry: Arc<ServerRegistry>,
    processes: Mutex<HashMap<String, ManagedProcess>>,
}

impl ProcessSupervisor {
    pub fn new(registry: Arc<ServerRegistry>) -> Self {
        Self {
            registry,
            processes: Mutex::new(HashMap::new()),
        }
    }

    /// Launch every configured server that is not already tracked with a
    /// live process. Returns the names launched by this call; spawn
    /// failures are logged and omitted, never propagated.
    pub async fn start_all(&self) -> Vec<String> {
        let mut table = self.processes.lock().await;
        let mut started = Vec::new();

        for descriptor in self.registry.all() {
            if let Some(managed) = table.get_mut(&descriptor.name) {
                if managed.is_alive() {
                    continue;
                }
                table.remove(&descriptor.name);
            }

            let mut cmd = Command::new(&descriptor.command);
            if !descriptor.args.is_empty() {
                cmd.args(&descriptor.args);
            }
            for (key, value) in &descriptor.env {
                let expanded = shellexpand::env(value).unwrap_or_else(|_| value.clone().into());
                cmd.env(key, expanded.as_ref());
            }

            match cmd.spawn() {
                Ok(child) => {
                    tracing::info!("started MCP server '{}'", descriptor.name);
                    table.insert(
                        descriptor.name.clone(),
                        ManagedProcess {
                            child,
                            started_at: Instant::now(),
                        },
                    );
                    started.push(descriptor.name.clone());
                }
                Err(e) => {
                    tracing::warn!("failed to start MCP server '{}': {}", descriptor.name, e);
                }
            }
        }

        started
    }

    /// Liveness per configured server. Servers never started report `false`.
    pub async fn status(&self) -> HashMap<String, bool> {
        let mut table = self.processes.lock().await;
        let mut status = HashMap::new();

        for descriptor in self.registry.all() {
            let alive = table
                .get_mut(&descriptor.name)
                .map(ManagedProcess::is_alive)
                .unwrap_or(false);
            status.entry(descriptor.name.clone()).or_insert(alive);
        }

        status
    }

    /// How long the tracked process for `name` has been running.
    pub async fn uptime(&self, name: &str) -> Option<Duration> {
        self.processes
            .lock()
            .await
            .get(name)
            .map(|m| m.started_at.elapsed())
    }

    /// Signal every tracked process to terminate and drop it from the
    /// table. Returns the names signaled; termination failures are logged
    /// and swallowed per process.
    pub async fn stop_all(&self) -> Vec<String> {
        let mut table = self.processes.lock().await;
        let mut stopped = Vec::new();

        for (name, mut managed) in table.drain() {
            if let Err(e) = managed.child.start_kill() {
                tracing::debug!("failed to signal MCP server '{}': {}", name, e);
            }
            // Reap if it already exited; otherwise the kill lands shortly.
            let _ = managed.child.try_wait();
            stopped.push(name);
        }

        stopped
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap as StdHashMap;

    use super::*;
    use crate::mcp::registry::ServerDescriptor;

    fn descriptor(name: &str, command: &str, args: &[&str]) -> ServerDescriptor {
        ServerDescriptor {
            name: name.to_string(),
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            env: StdHashMap::new(),
        }
    }

    fn supervisor(servers: Vec<ServerDescriptor>) -> ProcessSupervisor {
        ProcessSupervisor::new(Arc::new(ServerRegistry::new(servers)))
    }

    #[tokio::test]
    async fn start_all_reports_launched_servers() {
        let sup = supervisor(vec![descriptor("sleeper", "sleep", &["30"])]);

        let started = sup.start_all().await;
        assert_eq!(started, vec!["sleeper"]);

        let status = sup.status().await;
        assert_eq!(status["sleeper"], true);

        sup.stop_all().await;
    }

    #[tokio::test]
    async fn start_all_does_not_double_spawn_live_servers() {
        let sup = supervisor(vec![descriptor("sleeper", "sleep", &["30"])]);

        let first = sup.start_all().await;
        assert_eq!(first.len(), 1);

        // Second call: the process is still alive, so nothing new starts.
        let second = sup.start_all().await;
        assert!(second.is_empty());

        sup.stop_all().await;
    }

    #[tokio::test]
    async fn spawn_failures_are_omitted_not_fatal() {
        let sup = supervisor(vec![
            descriptor("broken", "quill-no-such-binary-exists", &[]),
            descriptor("sleeper", "sleep", &["30"]),
        ]);

        let started = sup.start_all().await;
        assert_eq!(started, vec!["sleeper"]);

        let status = sup.status().await;
        assert_eq!(status["broken"], false);
        assert_eq!(status["sleeper"], true);

        sup.stop_all().await;
    }

    #[tokio::test]
    async fn status_reports_false_for_never_started_servers() {
        let sup = supervisor(vec![descriptor("idle", "sleep", &["30"])]);
        let status = sup.status().await;
        assert_eq!(status["idle"], false);
    }

    #[tokio::test]
    async fn stop_all_returns_signaled_names_and_clears_table() {
        let sup = supervisor(vec![descriptor("sleeper", "sleep", &["30"])]);
        sup.start_all().await;

        let stopped = sup.stop_all().await;
        assert_eq!(stopped, vec!["sleeper"]);

        // Idempotent: nothing left to signal.
        let again = sup.stop_all().await;
        assert!(again.is_empty());
    }

    #[tokio::test]
    async fn stop_all_on_empty_table_returns_empty() {
        let sup = supervisor(vec![descriptor("idle", "sleep", &["30"])]);
        assert!(sup.stop_all().await.is_empty());
    }

    #[tokio::test]
    async fn exited_process_can_be_restarted() {
        let sup = supervisor(vec![descriptor("quick", "true", &[])]);

        let first = sup.start_all().await;
        assert_eq!(first, vec!["quick"]);

        // Give the process time to exit.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(sup.status().await["quick"], false);

        let second = sup.start_all().await;
        assert_eq!(second, vec!["quick"]);

        sup.stop_all().await;
    }
}
