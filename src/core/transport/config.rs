//! Transport configuration types.

use serde::{Deserialize, Serialize};
#[cfg(feature = "http")]
use tracing::warn;

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (MCP only).
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP transport with discovery, invocation and JSON-RPC endpoints.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
fn default_port() -> u16 {
    3000
}

#[cfg(feature = "http")]
fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "http")]
        {
            Self::Http(HttpConfig::default())
        }

        #[cfg(all(not(feature = "http"), feature = "stdio"))]
        {
            Self::Stdio
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
fn parse_port(raw: &str) -> u16 {
    raw.parse().unwrap_or_else(|_| {
        warn!("Ignoring invalid port {:?}, using {}", raw, default_port());
        default_port()
    })
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Load HTTP settings from environment variables.
    ///
    /// `PORT` wins over `MCP_HTTP_PORT`; unparsable values fall back to 3000.
    pub fn from_env() -> Self {
        let port = match std::env::var("PORT").or_else(|_| std::env::var("MCP_HTTP_PORT")) {
            Ok(raw) => parse_port(&raw),
            Err(_) => default_port(),
        };
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
        let rpc_path = std::env::var("MCP_HTTP_PATH").unwrap_or_else(|_| default_rpc_path());
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or_else(|_| default_cors());

        Self {
            port,
            host,
            rpc_path,
            enable_cors,
        }
    }

    /// Base URL clients use to reach the server.
    pub fn base_url(&self) -> String {
        let host = match self.host.as_str() {
            "0.0.0.0" | "::" => "localhost",
            host => host,
        };
        format!("http://{}:{}", host, self.port)
    }
}

impl TransportConfig {
    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "http")]
            _ => Self::Http(HttpConfig::from_env()),
            #[cfg(not(feature = "http"))]
            _ => Self::default(),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}", cfg.host, cfg.port),
        }
    }

    /// Check if this transport is the standard STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;
    use crate::core::config::tests::ENV_TEST_LOCK;

    fn clear_env() {
        unsafe {
            for key in ["PORT", "MCP_HTTP_PORT", "MCP_TRANSPORT", "MCP_HTTP_HOST"] {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_port_defaults_to_3000() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        match TransportConfig::from_env() {
            TransportConfig::Http(cfg) => assert_eq!(cfg.port, 3000),
            #[allow(unreachable_patterns)]
            other => panic!("expected HTTP transport, got {:?}", other),
        }
    }

    #[test]
    fn test_port_env_precedence() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_HTTP_PORT", "4000");
        }
        assert_eq!(HttpConfig::from_env().port, 4000);

        unsafe {
            std::env::set_var("PORT", "5000");
        }
        assert_eq!(HttpConfig::from_env().port, 5000);

        unsafe {
            std::env::set_var("PORT", "not-a-port");
        }
        assert_eq!(HttpConfig::from_env().port, 3000);
        clear_env();
    }

    #[cfg(feature = "stdio")]
    #[test]
    fn test_stdio_selected_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "STDIO");
        }
        assert!(TransportConfig::from_env().is_stdio());
        clear_env();
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        assert_eq!(parse_port("8080"), 8080);
        assert_eq!(parse_port("not-a-port"), 3000);
        assert_eq!(parse_port("70000"), 3000);
        assert_eq!(parse_port(""), 3000);
    }

    #[test]
    fn test_base_url_for_wildcard_host() {
        let cfg = HttpConfig::default();
        assert_eq!(cfg.base_url(), "http://localhost:3000");
        let cfg = HttpConfig {
            host: "127.0.0.1".to_string(),
            port: 8081,
            ..HttpConfig::default()
        };
        assert_eq!(cfg.base_url(), "http://127.0.0.1:8081");
    }
}
