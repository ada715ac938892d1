//! E2E test: tool discovery against a real MCP server

use std::sync::Arc;

use quill_agent::mcp::{ServerRegistry, SessionRunner, ToolCatalog};

use crate::support::{broken_descriptor, echo_descriptor};

#[tokio::test]
#[ignore = "requires built echo-mcp binary"]
async fn lists_advertised_tools() {
    let catalog = ToolCatalog::new(
        Arc::new(ServerRegistry::new(vec![echo_descriptor("echo")])),
        SessionRunner::new(),
    );

    let tools = catalog.list_tools(None).await.expect("listing failed");

    let names = &tools["echo"];
    for expected in ["echo", "reverse", "fail"] {
        assert!(
            names.iter().any(|n| n == expected),
            "missing tool '{}', found: {:?}",
            expected,
            names
        );
    }
}

#[tokio::test]
#[ignore = "requires built echo-mcp binary"]
async fn failing_server_yields_empty_entry_next_to_working_one() {
    let catalog = ToolCatalog::new(
        Arc::new(ServerRegistry::new(vec![
            broken_descriptor("broken"),
            echo_descriptor("echo"),
        ])),
        SessionRunner::new(),
    );

    let tools = catalog.list_tools(None).await.expect("listing failed");

    assert_eq!(tools.len(), 2);
    assert!(tools["broken"].is_empty());
    assert!(!tools["echo"].is_empty());
}

#[tokio::test]
#[ignore = "requires built echo-mcp binary"]
async fn detailed_listing_carries_descriptions_and_schemas() {
    let catalog = ToolCatalog::new(
        Arc::new(ServerRegistry::new(vec![echo_descriptor("echo")])),
        SessionRunner::new(),
    );

    let tools = catalog
        .list_tools_detailed(Some("echo"))
        .await
        .expect("listing failed");

    let echo = tools["echo"]
        .iter()
        .find(|t| t.name == "echo")
        .expect("echo tool missing");
    assert_eq!(echo.server, "echo");
    assert!(echo.description.is_some());
    assert!(echo.input_schema.is_some());
}
