//! E2E test: tool invocation and ordered failover against a real MCP server

use std::sync::Arc;

use serde_json::json;

use quill_agent::mcp::{McpError, ServerRegistry, SessionRunner, ToolInvoker};

use crate::support::{broken_descriptor, echo_descriptor, restricted_echo_descriptor};

fn invoker(servers: Vec<quill_agent::mcp::ServerDescriptor>) -> ToolInvoker {
    ToolInvoker::new(
        Arc::new(ServerRegistry::new(servers)),
        SessionRunner::new(),
    )
}

#[tokio::test]
#[ignore = "requires built echo-mcp binary"]
async fn call_returns_content_payload() {
    let invoker = invoker(vec![echo_descriptor("echo")]);

    let result = invoker
        .call_tool("echo", Some(json!({"text": "hi"})), None)
        .await
        .expect("call failed");

    // The `content` field is surfaced directly: a list of content blocks.
    assert!(result.is_array(), "expected content array, got {result}");
    assert_eq!(result[0]["text"], "hi");
}

#[tokio::test]
#[ignore = "requires built echo-mcp binary"]
async fn failover_advances_past_unreachable_candidate() {
    // First candidate cannot spawn; the scan must reach the second.
    let invoker = invoker(vec![broken_descriptor("fs"), echo_descriptor("web")]);

    let result = invoker
        .call_tool("reverse", Some(json!({"text": "abc"})), None)
        .await
        .expect("failover did not reach the working server");

    assert_eq!(result[0]["text"], "cba");
}

#[tokio::test]
#[ignore = "requires built echo-mcp binary"]
async fn failover_skips_candidate_that_lacks_the_tool() {
    // "fs" is reachable but advertises only `echo`; the scan must move on
    // to "web", which advertises `reverse`.
    let invoker = invoker(vec![
        restricted_echo_descriptor("fs", "echo"),
        echo_descriptor("web"),
    ]);

    let result = invoker
        .call_tool("reverse", Some(json!({"text": "abc"})), None)
        .await
        .expect("scan did not reach the advertising server");

    assert_eq!(result[0]["text"], "cba");
}

#[tokio::test]
#[ignore = "requires built echo-mcp binary"]
async fn call_failure_advances_scan_and_surfaces_last_candidate() {
    // Both candidates advertise `fail` and both calls error, so the scan
    // runs to exhaustion and reports the last candidate tried.
    let invoker = invoker(vec![echo_descriptor("a"), echo_descriptor("b")]);

    let err = invoker
        .call_tool("fail", Some(json!({"message": "boom"})), None)
        .await
        .unwrap_err();

    match err {
        McpError::InvocationFailed { tool, last } => {
            assert_eq!(tool, "fail");
            assert!(
                matches!(*last, McpError::Protocol { ref server, .. } if server == "b"),
                "expected a protocol error on 'b', got {last}"
            );
        }
        other => panic!("expected InvocationFailed, got {other}"),
    }
}

#[tokio::test]
#[ignore = "requires built echo-mcp binary"]
async fn unadvertised_tool_fails_without_invoking() {
    let invoker = invoker(vec![echo_descriptor("echo")]);

    let err = invoker
        .call_tool("read_file", Some(json!({"path": "a.txt"})), None)
        .await
        .unwrap_err();

    match err {
        McpError::InvocationFailed { tool, last } => {
            assert_eq!(tool, "read_file");
            assert!(
                matches!(*last, McpError::ToolNotFound { ref server, .. } if server == "echo"),
                "expected ToolNotFound on 'echo'"
            );
        }
        other => panic!("expected InvocationFailed, got {other}"),
    }
}

#[tokio::test]
#[ignore = "requires built echo-mcp binary"]
async fn pinned_call_does_not_fail_over() {
    // "echo" (pinned) does not advertise "read_file"; the other configured
    // server must never be contacted.
    let invoker = invoker(vec![echo_descriptor("echo"), echo_descriptor("other")]);

    let err = invoker
        .call_tool("read_file", None, Some("echo"))
        .await
        .unwrap_err();

    match err {
        McpError::InvocationFailed { last, .. } => {
            assert!(matches!(*last, McpError::ToolNotFound { ref server, .. } if server == "echo"));
        }
        other => panic!("expected InvocationFailed, got {other}"),
    }
}
