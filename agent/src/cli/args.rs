//! CLI argument definitions
//!
//! Contains the main CLI struct and Commands enums for clap parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Minimal chat agent with Ollama and MCP tool support")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Model provider: "ollama" or "openai" (overrides config)
    #[arg(long, env = "QUILL_PROVIDER", global = true)]
    pub provider: Option<String>,

    /// Model name (overrides config)
    #[arg(short = 'm', long, env = "QUILL_MODEL", global = true)]
    pub model: Option<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat session
    Chat,
    /// One-shot generation for a single prompt
    Run {
        /// Prompt to send
        prompt: String,
    },
    /// Run every prompt in a file (one per line)
    Batch {
        /// File with one prompt per line
        input_file: PathBuf,
        /// Write results as JSON to this file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// MCP tool and server management
    Tools {
        #[command(subcommand)]
        command: ToolsCommands,
    },
}

#[derive(Subcommand)]
pub enum ToolsCommands {
    /// List tools advertised by configured MCP servers
    List {
        /// Only query this server
        #[arg(long)]
        server: Option<String>,
    },
    /// Call a tool directly
    Call {
        /// Tool name
        tool: String,
        /// Arguments as JSON
        #[arg(long, short)]
        args: Option<String>,
        /// Pin the call to this server (no failover)
        #[arg(long)]
        server: Option<String>,
    },
    /// Start all configured MCP server processes
    Start,
    /// Show liveness of supervised MCP server processes
    Status,
    /// Stop all supervised MCP server processes
    Stop,
}
