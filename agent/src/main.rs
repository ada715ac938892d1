use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill_agent::agent::ChatAgent;
use quill_agent::cli::{is_exit_request, Cli, Commands, ToolsCommands};
use quill_agent::config::Config;
use quill_agent::mcp::{ProcessSupervisor, ServerRegistry, SessionRunner, ToolCatalog, ToolInvoker};

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;
    if let Some(provider) = cli.provider {
        config.provider = provider;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    match cli.command {
        Commands::Chat => run_chat(config).await?,
        Commands::Run { prompt } => run_once(config, &prompt).await?,
        Commands::Batch { input_file, output } => {
            run_batch(config, &input_file, output.as_deref()).await?
        }
        Commands::Tools { command } => run_tools(config, command).await?,
    }

    Ok(())
}

async fn run_chat(config: Config) -> Result<()> {
    use std::io::{self, BufRead, Write};

    let agent = ChatAgent::new(config)?;

    println!("Provider: {}, Model: {}", agent.provider(), agent.model());
    let servers = agent.server_names();
    if !servers.is_empty() {
        println!("MCP servers: {}", servers.join(", "));
    }
    println!("Type 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut history = Vec::new();

    loop {
        print!("You> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if is_exit_request(input) {
            break;
        }

        match agent.generate_with_history(&mut history, input).await {
            Ok(response) => println!("\n{}\n", response),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}

async fn run_once(config: Config, prompt: &str) -> Result<()> {
    let agent = ChatAgent::new(config)?;
    println!("Provider: {}, Model: {}", agent.provider(), agent.model());

    let response = agent.generate(prompt).await?;
    println!("{}", response);
    Ok(())
}

async fn run_batch(config: Config, input_file: &Path, output: Option<&Path>) -> Result<()> {
    let content = std::fs::read_to_string(input_file)
        .with_context(|| format!("Failed to read input file: {}", input_file.display()))?;

    let agent = ChatAgent::new(config)?;
    println!("Provider: {}, Model: {}", agent.provider(), agent.model());

    let mut results = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let prompt = line.trim();
        if prompt.is_empty() {
            continue;
        }

        println!("\n# {} Prompt: {}", idx + 1, prompt);
        let result = agent.generate(prompt).await?;
        println!("{}", result);

        results.push(serde_json::json!({ "prompt": prompt, "result": result }));
    }

    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&results)?)?;
        println!("\nWrote results to {}", path.display());
    }

    Ok(())
}

async fn run_tools(config: Config, command: ToolsCommands) -> Result<()> {
    let registry = Arc::new(ServerRegistry::new(config.mcp_servers.clone()));

    if registry.is_empty() {
        println!("No MCP servers configured.");
        println!("Add [[mcp_servers]] entries to .quill.toml to configure them.");
        return Ok(());
    }

    match command {
        ToolsCommands::List { server } => {
            let catalog = ToolCatalog::new(registry, SessionRunner::new());
            let tools = catalog.list_tools_detailed(server.as_deref()).await?;

            for (server, tools) in tools {
                println!("=== {} ({} tools) ===", server, tools.len());
                for tool in tools {
                    let desc = tool
                        .description
                        .as_deref()
                        .unwrap_or("No description")
                        .lines()
                        .next()
                        .unwrap_or("");
                    println!("  {} - {}", tool.name, desc);
                }
                println!();
            }
        }
        ToolsCommands::Call { tool, args, server } => {
            let arguments = match args {
                Some(json) => {
                    Some(serde_json::from_str(&json).context("Arguments must be valid JSON")?)
                }
                None => None,
            };

            println!("Calling tool: {}", tool);
            let invoker = ToolInvoker::new(registry, SessionRunner::new());
            let result = invoker
                .call_tool(&tool, arguments, server.as_deref())
                .await?;

            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        ToolsCommands::Start => {
            let supervisor = ProcessSupervisor::new(registry);
            let started = supervisor.start_all().await;
            if started.is_empty() {
                println!("No servers started.");
            } else {
                println!("Started: {}", started.join(", "));
            }
        }
        ToolsCommands::Status => {
            let supervisor = ProcessSupervisor::new(registry);
            let status = supervisor.status().await;
            let mut names: Vec<_> = status.keys().cloned().collect();
            names.sort();
            for name in names {
                let state = if status[&name] { "running" } else { "stopped" };
                match supervisor.uptime(&name).await {
                    Some(uptime) if status[&name] => {
                        println!("{}: {} (up {:?})", name, state, uptime)
                    }
                    _ => println!("{}: {}", name, state),
                }
            }
        }
        ToolsCommands::Stop => {
            let supervisor = ProcessSupervisor::new(registry);
            let stopped = supervisor.stop_all().await;
            if stopped.is_empty() {
                println!("Nothing to stop.");
            } else {
                println!("Stopped: {}", stopped.join(", "));
            }
        }
    }

    Ok(())
}
