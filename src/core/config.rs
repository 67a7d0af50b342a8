//! Configuration management for the server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tools domain configuration.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the tools domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Timeout for outbound page fetches, in seconds.
    pub fetch_timeout_secs: u64,

    /// User-Agent header sent with outbound page fetches.
    pub user_agent: String,

    /// Fixed seed for the greeting tool's language picker.
    /// If None, the generator is seeded from OS entropy.
    pub greeting_seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 10,
            user_agent: format!("utility-tools-server/{}", env!("CARGO_PKG_VERSION")),
            greeting_seed: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "utility-tools-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            tools: ToolsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Most variables are prefixed with `MCP_` (e.g. `MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`); the HTTP port is read from `PORT`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(timeout) = std::env::var("MCP_FETCH_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.tools.fetch_timeout_secs = secs,
                _ => warn!(
                    "Ignoring invalid MCP_FETCH_TIMEOUT_SECS={:?}, using {}s",
                    timeout, config.tools.fetch_timeout_secs
                ),
            }
        }

        if let Ok(user_agent) = std::env::var("MCP_USER_AGENT") {
            config.tools.user_agent = user_agent;
        }

        if let Ok(seed) = std::env::var("MCP_GREETING_SEED") {
            match seed.parse() {
                Ok(seed) => {
                    config.tools.greeting_seed = Some(seed);
                    info!("Greeting language picker seeded with {}", seed);
                }
                Err(_) => warn!("Ignoring invalid MCP_GREETING_SEED={:?}", seed),
            }
        }

        config
    }
}
