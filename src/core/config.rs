//! Configuration management for the MCP server.
//!
//! Configuration comes from environment variables only (a `.env` file is
//! loaded first if present). The Perplexity API key is the one required
//! value: without it the server refuses to start.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable holding the Perplexity API key.
pub const API_KEY_VAR: &str = "PERPLEXITY_API_KEY";

const DEFAULT_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";
const DEFAULT_MODEL: &str = "sonar";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream search provider configuration.
    pub perplexity: PerplexityConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the Perplexity API client.
#[derive(Clone, Serialize, Deserialize)]
pub struct PerplexityConfig {
    /// Bearer token sent with every request.
    pub api_key: String,

    /// Chat-completions endpoint URL.
    pub endpoint: String,

    /// Model identifier sent in the request body.
    pub model: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for PerplexityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerplexityConfig")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for PerplexityConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "perplexity-search-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            perplexity: PerplexityConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Fails if `PERPLEXITY_API_KEY` is missing or blank.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.perplexity.api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::config(format!("{API_KEY_VAR} environment variable is required")))?;

        if let Some(name) = lookup("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = lookup("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(endpoint) = lookup("MCP_PERPLEXITY_ENDPOINT") {
            config.perplexity.endpoint = endpoint;
        }

        if let Some(model) = lookup("MCP_PERPLEXITY_MODEL") {
            config.perplexity.model = model;
        }

        if let Some(timeout) = lookup("MCP_PERPLEXITY_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) if secs > 0 => config.perplexity.timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid MCP_PERPLEXITY_TIMEOUT_SECS={:?}, using {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config.transport = TransportConfig::from_lookup(&lookup);

        Ok(config)
    }
}
