//! CLI argument definitions

pub mod args;

pub use args::{Cli, Commands, ToolsCommands};

/// True when a chat line asks to leave the REPL. Matching is
/// case-insensitive, so "QUIT" and "Exit" work too.
pub fn is_exit_request(input: &str) -> bool {
    let lowered = input.trim().to_lowercase();
    lowered == "quit" || lowered == "exit"
}
