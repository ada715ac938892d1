//! E2E test: MCP access through the `ChatAgent` facade

use serde_json::json;

use quill_agent::agent::ChatAgent;
use quill_agent::config::Config;

use crate::support::echo_descriptor;

fn agent_with_echo() -> ChatAgent {
    let config = Config {
        mcp_servers: vec![echo_descriptor("echo")],
        ..Config::default()
    };
    ChatAgent::new(config).expect("agent construction failed")
}

#[tokio::test]
#[ignore = "requires built echo-mcp binary"]
async fn agent_lists_configured_server_tools() {
    let agent = agent_with_echo();
    assert_eq!(agent.server_names(), vec!["echo"]);

    let tools = agent.list_tools(None).await.expect("listing failed");
    assert!(tools["echo"].iter().any(|n| n == "echo"));
}

#[tokio::test]
#[ignore = "requires built echo-mcp binary"]
async fn agent_invokes_tools() {
    let agent = agent_with_echo();

    let result = agent
        .use_tool("echo", Some(json!({"text": "ping"})), None)
        .await
        .expect("tool call failed");

    assert_eq!(result[0]["text"], "ping");
}
