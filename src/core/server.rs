//! Server implementation and lifecycle management.
//!
//! This module contains the main server handler. It owns the tool registry
//! and exposes it two ways: as an rmcp `ServerHandler` (STDIO transport) and
//! through plain methods used by the HTTP transport.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered in `ToolRegistry::with_defaults()`. The rmcp ToolRouter is
//! derived from the registry in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::instrument;

use super::config::Config;
use super::error::Result as ServerResult;
use crate::domains::tools::{ToolDescriptor, ToolError, ToolRegistry, build_tool_router};

const INSTRUCTIONS: &str = "Utility tools server. Tools: greeting (greet a person in English, \
     Spanish or French), todays-date (format today's date) and assess-page-title-for-seo \
     (fetch a page and assess its <title>).";

/// The main server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and is shared
/// (cheaply cloned) across HTTP requests.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools, read-only after startup.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new server with the built-in tools.
    ///
    /// Fails if tool registration fails (e.g. duplicate names).
    pub fn new(config: Config) -> ServerResult<Self> {
        let registry = ToolRegistry::with_defaults(&config.tools)?;
        Ok(Self::with_registry(config, registry))
    }

    /// Create a server around an already-built registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        let registry = Arc::new(registry);

        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Server instructions sent to MCP clients.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// Tool descriptors in registration order (discovery).
    pub fn discovery(&self) -> Vec<ToolDescriptor> {
        self.registry.descriptors().into_iter().cloned().collect()
    }

    /// List all available tools in MCP form (for JSON-RPC over HTTP).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "outputSchema": t.output_schema
                })
            })
            .collect()
    }

    /// Call a tool by name.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        self.registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
