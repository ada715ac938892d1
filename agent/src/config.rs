//! Configuration loading

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::mcp::ServerDescriptor;

/// Find a config file by walking up the directory tree, then checking the
/// global config at `~/.config/quill/`.
fn find_config_file(filename: &str) -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let candidate = current.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break, // Reached filesystem root
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_path = config_dir.join("quill").join(filename);
        if global_path.exists() {
            return Some(global_path);
        }
    }

    None
}

/// Top-level configuration (from `.quill.toml`)
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Model provider: "ollama" or "openai"
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    /// Base URL for the OpenAI-compatible provider (the API key is only
    /// ever read from `OPENAI_API_KEY`)
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    /// MCP servers, in failover priority order
    #[serde(default)]
    pub mcp_servers: Vec<ServerDescriptor>,
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_model() -> String {
    "llama3.1:8b".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    256
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            ollama_url: default_ollama_url(),
            openai_base_url: default_openai_base_url(),
            mcp_servers: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from `.quill.toml`, then apply environment overrides.
    ///
    /// Search order:
    /// 1. Walk up the directory tree from cwd looking for `.quill.toml`
    /// 2. Check `~/.config/quill/.quill.toml` (global fallback)
    /// 3. Fall back to defaults
    pub fn load() -> Result<Self> {
        let mut config = if let Some(config_path) = find_config_file(".quill.toml") {
            tracing::debug!("loading config from: {}", config_path.display());
            Self::load_from_path(&config_path)?
        } else {
            tracing::debug!("no .quill.toml found, using defaults");
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from a specific path (no environment overrides)
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Overrides for running on hosts where editing the file is awkward.
    /// Unparseable numeric values are ignored.
    fn apply_env_overrides(&mut self) {
        if let Ok(provider) = std::env::var("QUILL_PROVIDER") {
            self.provider = provider;
        }
        if let Ok(model) = std::env::var("QUILL_MODEL") {
            self.model = model;
        }
        if let Ok(url) = std::env::var("QUILL_OLLAMA_URL") {
            self.ollama_url = url;
        }
        if let Ok(value) = std::env::var("QUILL_TEMPERATURE") {
            if let Ok(temperature) = value.parse() {
                self.temperature = temperature;
            }
        }
        if let Ok(value) = std::env::var("QUILL_MAX_TOKENS") {
            if let Ok(max_tokens) = value.parse() {
                self.max_tokens = max_tokens;
            }
        }
    }
}
